//! Minimal SVG document model.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// A point in SVG user space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An SVG paint value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb {
        red: u8,
        green: u8,
        blue: u8,
    },
    Rgba {
        red: u8,
        green: u8,
        blue: u8,
        opacity: f64,
    },
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => f.write_str("none"),
            Color::Named(name) => f.write_str(name),
            Color::Rgb { red, green, blue } => write!(f, "rgb({red},{green},{blue})"),
            Color::Rgba {
                red,
                green,
                blue,
                opacity,
            } => write!(f, "rgba({red},{green},{blue},{opacity})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl fmt::Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineCap::Butt => "butt",
            StrokeLineCap::Round => "round",
            StrokeLineCap::Square => "square",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineJoin::Arcs => "arcs",
            StrokeLineJoin::Bevel => "bevel",
            StrokeLineJoin::Miter => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round => "round",
        })
    }
}

/// Fill and stroke attributes shared by every shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathProps {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub line_cap: Option<StrokeLineCap>,
    pub line_join: Option<StrokeLineJoin>,
}

impl PathProps {
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Round caps and joins, used for every line and underlayer.
    pub fn rounded(mut self) -> Self {
        self.line_cap = Some(StrokeLineCap::Round);
        self.line_join = Some(StrokeLineJoin::Round);
        self
    }

    fn write_attrs(&self, out: &mut String) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(out, " fill=\"{fill}\"")?;
        }
        if let Some(stroke) = &self.stroke {
            write!(out, " stroke=\"{stroke}\"")?;
        }
        if let Some(width) = self.stroke_width {
            write!(out, " stroke-width=\"{width}\"")?;
        }
        if let Some(cap) = self.line_cap {
            write!(out, " stroke-linecap=\"{cap}\"")?;
        }
        if let Some(join) = self.line_join {
            write!(out, " stroke-linejoin=\"{join}\"")?;
        }
        Ok(())
    }
}

/// A drawable SVG element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Circle {
        center: Point,
        radius: f64,
        props: PathProps,
    },
    Polyline {
        points: Vec<Point>,
        props: PathProps,
    },
    Text {
        position: Point,
        offset: Point,
        font_size: u32,
        font_family: Option<String>,
        font_weight: Option<String>,
        data: String,
        props: PathProps,
    },
}

impl Element {
    fn write_to(&self, out: &mut String) -> fmt::Result {
        match self {
            Element::Circle {
                center,
                radius,
                props,
            } => {
                write!(
                    out,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    center.x, center.y, radius
                )?;
                props.write_attrs(out)?;
                out.write_str("/>")
            }
            Element::Polyline { points, props } => {
                out.write_str("<polyline points=\"")?;
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        out.write_char(' ')?;
                    }
                    write!(out, "{},{}", p.x, p.y)?;
                }
                out.write_char('"')?;
                props.write_attrs(out)?;
                out.write_str("/>")
            }
            Element::Text {
                position,
                offset,
                font_size,
                font_family,
                font_weight,
                data,
                props,
            } => {
                out.write_str("<text")?;
                props.write_attrs(out)?;
                write!(
                    out,
                    " x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    position.x, position.y, offset.x, offset.y, font_size
                )?;
                if let Some(family) = font_family {
                    write!(out, " font-family=\"{family}\"")?;
                }
                if let Some(weight) = font_weight {
                    write!(out, " font-weight=\"{weight}\"")?;
                }
                out.write_char('>')?;
                write_escaped(out, data)?;
                out.write_str("</text>")
            }
        }
    }
}

fn write_escaped(out: &mut String, data: &str) -> fmt::Result {
    for c in data.chars() {
        match c {
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&apos;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '&' => out.write_str("&amp;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

/// An ordered list of elements; later elements paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Serialize the document as standalone SVG.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        out.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n")?;
        out.write_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n")?;
        for element in &self.elements {
            out.write_str("  ")?;
            element.write_to(out)?;
            out.write_char('\n')?;
        }
        out.write_str("</svg>")
    }
}
