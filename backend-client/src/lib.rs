pub mod dto;
pub mod geolocation;
pub mod http;

pub use geolocation::FixedGeolocationProvider;
pub use http::HttpLocationService;
