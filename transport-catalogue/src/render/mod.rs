//! SVG map of the bus network.
//!
//! The map is drawn in layers: bus lines, bus name labels, stop circles,
//! stop name labels. Buses are drawn in name order and take palette colours
//! in that order; stops are drawn in name order.

mod projector;
mod settings;
mod svg;

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalogue::TransportCatalogue;
use crate::domain::{Stop, StopId};

pub use projector::SphereProjector;
pub use settings::RenderSettings;
pub use svg::{Color, Document, Element, PathProps, Point, StrokeLineCap, StrokeLineJoin};

const LABEL_FONT: &str = "Verdana";

/// Draws a catalogue as an SVG map.
pub struct MapRenderer<'a> {
    catalogue: &'a TransportCatalogue,
    settings: &'a RenderSettings,
}

impl<'a> MapRenderer<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: &'a RenderSettings) -> Self {
        Self {
            catalogue,
            settings,
        }
    }

    /// Render the map as SVG text.
    pub fn render(&self) -> String {
        self.document().render()
    }

    /// Build the map document.
    pub fn document(&self) -> Document {
        let served = self.served_stops();
        let projector = SphereProjector::new(
            served.values().map(|stop| stop.coordinates),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut doc = Document::new();
        self.draw_bus_lines(&projector, &mut doc);
        self.draw_bus_labels(&projector, &mut doc);
        self.draw_stop_points(&projector, &served, &mut doc);
        self.draw_stop_labels(&projector, &served, &mut doc);

        debug!(
            buses = self.catalogue.bus_count(),
            stops = served.len(),
            elements = doc.len(),
            "map rendered"
        );
        doc
    }

    /// Stops visited by at least one bus, keyed by name.
    fn served_stops(&self) -> BTreeMap<&'a str, &'a Stop> {
        let catalogue = self.catalogue;
        catalogue
            .buses_by_name()
            .flat_map(|bus| bus.stops.iter())
            .map(|&id| {
                let stop = catalogue.stop_by_id(id);
                (stop.name.as_str(), stop)
            })
            .collect()
    }

    fn draw_bus_lines(&self, projector: &SphereProjector, doc: &mut Document) {
        let drawn = self
            .catalogue
            .buses_by_name()
            .filter(|bus| !bus.stops.is_empty());

        for (index, bus) in drawn.enumerate() {
            let points = bus
                .stops
                .iter()
                .map(|&id| projector.project(self.catalogue.stop_by_id(id).coordinates))
                .collect();
            doc.add(Element::Polyline {
                points,
                props: PathProps::default()
                    .fill(Color::None)
                    .stroke(self.settings.palette_color(index))
                    .stroke_width(self.settings.line_width)
                    .rounded(),
            });
        }
    }

    fn draw_bus_labels(&self, projector: &SphereProjector, doc: &mut Document) {
        let drawn = self
            .catalogue
            .buses_by_name()
            .filter(|bus| !bus.stops.is_empty());

        for (index, bus) in drawn.enumerate() {
            let color = self.settings.palette_color(index);
            let first = bus.stops[0];
            self.add_bus_label(projector, doc, &bus.name, first, &color);

            if let Some(turnaround) = bus.turnaround().filter(|&t| t != first) {
                self.add_bus_label(projector, doc, &bus.name, turnaround, &color);
            }
        }
    }

    fn add_bus_label(
        &self,
        projector: &SphereProjector,
        doc: &mut Document,
        name: &str,
        at: StopId,
        color: &Color,
    ) {
        let position = projector.project(self.catalogue.stop_by_id(at).coordinates);
        let settings = self.settings;
        let label = |props: PathProps| Element::Text {
            position,
            offset: settings.bus_label_offset,
            font_size: settings.bus_label_font_size,
            font_family: Some(LABEL_FONT.to_string()),
            font_weight: Some("bold".to_string()),
            data: name.to_string(),
            props,
        };

        doc.add(label(self.underlayer()));
        doc.add(label(PathProps::default().fill(color.clone())));
    }

    fn draw_stop_points(
        &self,
        projector: &SphereProjector,
        served: &BTreeMap<&str, &Stop>,
        doc: &mut Document,
    ) {
        for stop in served.values() {
            doc.add(Element::Circle {
                center: projector.project(stop.coordinates),
                radius: self.settings.stop_radius,
                props: PathProps::default().fill(Color::named("white")),
            });
        }
    }

    fn draw_stop_labels(
        &self,
        projector: &SphereProjector,
        served: &BTreeMap<&str, &Stop>,
        doc: &mut Document,
    ) {
        for (name, stop) in served {
            let position = projector.project(stop.coordinates);
            let settings = self.settings;
            let label = |props: PathProps| Element::Text {
                position,
                offset: settings.stop_label_offset,
                font_size: settings.stop_label_font_size,
                font_family: Some(LABEL_FONT.to_string()),
                font_weight: None,
                data: name.to_string(),
                props,
            };

            doc.add(label(self.underlayer()));
            doc.add(label(PathProps::default().fill(Color::named("black"))));
        }
    }

    fn underlayer(&self) -> PathProps {
        PathProps::default()
            .fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .rounded()
    }
}
