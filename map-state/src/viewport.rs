use shared_types::{
    Coordinate, Place, ServiceError, Viewport, DEVICE_FIX_ZOOM, SEARCH_RESULT_ZOOM,
};

/// Sole writer of the map viewport. The last completed call wins; nothing
/// else in the client mutates center or zoom.
#[derive(Debug, Default, Clone)]
pub struct ViewportController {
    viewport: Viewport,
}

impl ViewportController {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// A failed or denied geolocation request falls back to the world view
    /// rather than surfacing an error.
    pub fn apply_device_fix(&mut self, fix: Result<Coordinate, ServiceError>) {
        self.viewport = match fix {
            Ok(center) => Viewport {
                center,
                zoom: DEVICE_FIX_ZOOM,
            },
            Err(err) => {
                tracing::debug!("geolocation failed ({err}), using fallback viewport");
                Viewport::default()
            }
        };
    }

    pub fn center_on_search_result(&mut self, place: &Place) {
        self.viewport = Viewport {
            center: place.coordinate,
            zoom: SEARCH_RESULT_ZOOM,
        };
    }

    /// Re-centers on the centroid of the bounding box covering `places`.
    /// An empty collection leaves the viewport untouched so the map never
    /// jumps to an undefined location. Zoom is not changed.
    pub fn fit_to_overlay(&mut self, places: &[Place]) {
        let Some(first) = places.first() else {
            return;
        };
        let mut min_lat = first.coordinate.latitude;
        let mut max_lat = first.coordinate.latitude;
        let mut min_lng = first.coordinate.longitude;
        let mut max_lng = first.coordinate.longitude;
        for place in &places[1..] {
            min_lat = min_lat.min(place.coordinate.latitude);
            max_lat = max_lat.max(place.coordinate.latitude);
            min_lng = min_lng.min(place.coordinate.longitude);
            max_lng = max_lng.max(place.coordinate.longitude);
        }
        self.viewport.center = Coordinate::new((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0);
    }

    pub fn reset(&mut self) {
        self.viewport = Viewport::default();
    }
}
