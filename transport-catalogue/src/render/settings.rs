//! Map rendering configuration.

use serde::{Deserialize, Serialize};

use super::svg::{Color, Point};

/// Visual parameters for the network map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Image width in pixels.
    pub width: f64,

    /// Image height in pixels.
    pub height: f64,

    /// Margin kept clear on every side.
    pub padding: f64,

    /// Stroke width of bus lines.
    pub line_width: f64,

    /// Radius of stop circles.
    pub stop_radius: f64,

    pub bus_label_font_size: u32,
    pub bus_label_offset: Point,

    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,

    /// Halo drawn beneath every label.
    pub underlayer_color: Color,
    pub underlayer_width: f64,

    /// Bus line colours, cycled in bus name order.
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    /// Palette colour for the `index`-th drawn bus.
    ///
    /// An empty palette yields [`Color::None`].
    pub fn palette_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            return Color::None;
        }
        self.color_palette[index % self.color_palette.len()].clone()
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: Point::new(7.0, 15.0),
            stop_label_font_size: 20,
            stop_label_offset: Point::new(7.0, -3.0),
            underlayer_color: Color::Rgba {
                red: 255,
                green: 255,
                blue: 255,
                opacity: 0.85,
            },
            underlayer_width: 3.0,
            color_palette: vec![
                Color::named("green"),
                Color::Rgb {
                    red: 255,
                    green: 160,
                    blue: 0,
                },
                Color::named("red"),
            ],
        }
    }
}
