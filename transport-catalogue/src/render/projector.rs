//! Projection of geographic coordinates onto the image plane.

use super::svg::Point;
use crate::domain::{COORDINATE_EPSILON, Coordinates};

/// Scales a set of coordinates to fit an image, preserving aspect ratio.
///
/// Longitude maps to x and latitude to y (north up). The zoom is the
/// smaller of the horizontal and vertical fits, or whichever one is defined
/// when all points share a latitude or a longitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new<I>(points: I, width: f64, height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter().peekable();
        if points.peek().is_none() {
            return Self {
                padding,
                ..Self::default()
            };
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let width_zoom = (max_lng - min_lng > COORDINATE_EPSILON)
            .then(|| (width - 2.0 * padding) / (max_lng - min_lng));
        let height_zoom = (max_lat - min_lat > COORDINATE_EPSILON)
            .then(|| (height - 2.0 * padding) / (max_lat - min_lat));

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point::new(
            (coordinates.lng - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        )
    }
}
