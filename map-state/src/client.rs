use std::collections::VecDeque;
use std::sync::Arc;

use crate::engine::{Command, Effect, Event, MapEngine, MapSnapshot};
use crate::services::{GeolocationProvider, LocationService};

/// Wires the engine to real collaborators. `dispatch` runs a command to
/// quiescence: every emitted effect is executed, its completion absorbed,
/// and any follow-up effects (such as the post-save list refresh) run in
/// turn. The caller gets back the final snapshot.
///
/// The driver awaits its own requests one at a time, matching the
/// cooperative single-threaded model of the client; overlapping fetches
/// are reconciled inside the engine via its request tickets.
pub struct MapClient {
    engine: MapEngine,
    locations: Arc<dyn LocationService>,
    geolocation: Arc<dyn GeolocationProvider>,
}

impl MapClient {
    pub fn new(locations: Arc<dyn LocationService>, geolocation: Arc<dyn GeolocationProvider>) -> Self {
        Self {
            engine: MapEngine::new(),
            locations,
            geolocation,
        }
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.engine.snapshot()
    }

    pub async fn dispatch(&mut self, command: Command) -> MapSnapshot {
        let mut pending: VecDeque<Effect> = self.engine.handle(command).into();
        while let Some(effect) = pending.pop_front() {
            let event = self.run_effect(effect).await;
            pending.extend(self.engine.absorb(event));
        }
        self.engine.snapshot()
    }

    async fn run_effect(&self, effect: Effect) -> Event {
        match effect {
            Effect::Search { query } => Event::SearchFinished(self.locations.search(&query).await),
            Effect::LoadSaved => Event::SavedListLoaded(self.locations.list_saved().await),
            Effect::Persist { place } => Event::PersistFinished(self.locations.create(&place).await),
            Effect::Remove { id } => Event::RemoveFinished {
                id,
                result: self.locations.delete(id).await,
            },
            Effect::FetchNearby {
                category,
                center,
                ticket,
            } => Event::NearbyFinished {
                category,
                ticket,
                result: self.locations.nearby(category, center).await,
            },
            Effect::Locate => Event::Located(self.geolocation.current().await),
            Effect::ResetBackend => Event::ResetFinished(self.locations.reset_all().await),
        }
    }
}
