pub mod client;
pub mod engine;
pub mod overlays;
pub mod save;
pub mod services;
pub mod viewport;

pub use client::MapClient;
pub use engine::{Command, Effect, Event, MapEngine, MapSnapshot};
pub use services::{GeolocationProvider, LocationService};
