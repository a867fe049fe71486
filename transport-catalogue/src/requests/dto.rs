//! JSON input documents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::render::{Color, Point, RenderSettings};
use crate::router::RoutingSettings;

/// Input of the `make_base` phase.
#[derive(Debug, Deserialize)]
pub struct BaseDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Without routing settings no route graph is built and every route
    /// query answers "not found".
    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,

    #[serde(default)]
    pub render_settings: Option<RenderSettingsDto>,

    pub serialization_settings: SerializationSettings,
}

/// Input of the `process_requests` phase.
#[derive(Debug, Deserialize)]
pub struct StatDocument {
    pub serialization_settings: SerializationSettings,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// Where the snapshot lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

impl SerializationSettings {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }
}

/// One entry of `base_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Road distance in metres to neighbouring stops, keyed by stop name.
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

/// One entry of `stat_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

/// A colour as written in JSON: a name, `[r, g, b]` or `[r, g, b, opacity]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorDto {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl From<ColorDto> for Color {
    fn from(dto: ColorDto) -> Self {
        match dto {
            ColorDto::Named(name) if name == "none" => Color::None,
            ColorDto::Named(name) => Color::Named(name),
            ColorDto::Rgb(red, green, blue) => Color::Rgb { red, green, blue },
            ColorDto::Rgba(red, green, blue, opacity) => Color::Rgba {
                red,
                green,
                blue,
                opacity,
            },
        }
    }
}

/// `render_settings` as written in JSON. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettingsDto {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: f64,
    pub bus_label_offset: [f64; 2],
    pub stop_label_font_size: f64,
    pub stop_label_offset: [f64; 2],
    pub underlayer_color: ColorDto,
    pub underlayer_width: f64,
    pub color_palette: Vec<ColorDto>,
}

impl Default for RenderSettingsDto {
    fn default() -> Self {
        let defaults = RenderSettings::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            padding: defaults.padding,
            line_width: defaults.line_width,
            stop_radius: defaults.stop_radius,
            bus_label_font_size: f64::from(defaults.bus_label_font_size),
            bus_label_offset: [defaults.bus_label_offset.x, defaults.bus_label_offset.y],
            stop_label_font_size: f64::from(defaults.stop_label_font_size),
            stop_label_offset: [defaults.stop_label_offset.x, defaults.stop_label_offset.y],
            underlayer_color: color_to_dto(&defaults.underlayer_color),
            underlayer_width: defaults.underlayer_width,
            color_palette: defaults.color_palette.iter().map(color_to_dto).collect(),
        }
    }
}

fn color_to_dto(color: &Color) -> ColorDto {
    match color {
        Color::None => ColorDto::Named("none".to_string()),
        Color::Named(name) => ColorDto::Named(name.clone()),
        Color::Rgb { red, green, blue } => ColorDto::Rgb(*red, *green, *blue),
        Color::Rgba {
            red,
            green,
            blue,
            opacity,
        } => ColorDto::Rgba(*red, *green, *blue, *opacity),
    }
}

impl From<RenderSettingsDto> for RenderSettings {
    fn from(dto: RenderSettingsDto) -> Self {
        Self {
            width: dto.width,
            height: dto.height,
            padding: dto.padding,
            line_width: dto.line_width,
            stop_radius: dto.stop_radius,
            bus_label_font_size: font_size(dto.bus_label_font_size),
            bus_label_offset: Point::new(dto.bus_label_offset[0], dto.bus_label_offset[1]),
            stop_label_font_size: font_size(dto.stop_label_font_size),
            stop_label_offset: Point::new(dto.stop_label_offset[0], dto.stop_label_offset[1]),
            underlayer_color: dto.underlayer_color.into(),
            underlayer_width: dto.underlayer_width,
            color_palette: dto.color_palette.into_iter().map(Color::from).collect(),
        }
    }
}

// Saturating: negative and NaN sizes become 0
fn font_size(size: f64) -> u32 {
    size.round() as u32
}
