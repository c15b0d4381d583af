use async_trait::async_trait;
use shared_types::{Coordinate, NearbyCategory, Place, SaveOutcome, ServiceError};

/// Backend contract for place search, the saved-location list, and nearby
/// lookups. The core only ever talks to the backend through this trait.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Resolve a free-text query to a single place. `NotFound` when there
    /// is no match.
    async fn search(&self, query: &str) -> Result<Place, ServiceError>;

    /// The full saved list, each entry carrying its persistence id.
    async fn list_saved(&self) -> Result<Vec<Place>, ServiceError>;

    /// Persist a transient place. A duplicate comes back as
    /// `SaveOutcome::Duplicate`, not as an error.
    async fn create(&self, place: &Place) -> Result<SaveOutcome, ServiceError>;

    /// `NotFound` when no saved place has that id.
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;

    async fn nearby(
        &self,
        category: NearbyCategory,
        center: Coordinate,
    ) -> Result<Vec<Place>, ServiceError>;

    /// Destructive: drops every saved location on the backend.
    async fn reset_all(&self) -> Result<(), ServiceError>;
}

/// Device position source. `Unavailable` when the capability is absent or
/// the user denies access.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current(&self) -> Result<Coordinate, ServiceError>;
}
