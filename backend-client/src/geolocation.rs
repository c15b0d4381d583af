//! Device position for a terminal client. There is no GPS capability to
//! ask; the position comes from the environment or is simply unavailable,
//! which the core resolves to its fallback viewport.

use async_trait::async_trait;
use map_state::GeolocationProvider;
use shared_types::{Coordinate, ServiceError};
use std::env;

const LAT_ENV: &str = "DEVICE_LAT";
const LNG_ENV: &str = "DEVICE_LNG";

pub struct FixedGeolocationProvider {
    position: Option<Coordinate>,
}

impl FixedGeolocationProvider {
    /// Out-of-range or non-finite coordinates are treated as no position.
    pub fn new(position: Option<Coordinate>) -> Self {
        Self {
            position: position.filter(Coordinate::is_valid),
        }
    }

    /// Position from `DEVICE_LAT`/`DEVICE_LNG`; unset or unparsable values
    /// leave the provider unavailable.
    pub fn from_env() -> Self {
        let parse = |key: &str| env::var(key).ok().and_then(|v| v.parse::<f64>().ok());
        let position = match (parse(LAT_ENV), parse(LNG_ENV)) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        };
        Self::new(position)
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocationProvider {
    async fn current(&self) -> Result<Coordinate, ServiceError> {
        self.position.ok_or(ServiceError::Unavailable)
    }
}
