use serde::{Deserialize, Serialize};
use shared_types::{Coordinate, NearbyCategory, Place, SaveOutcome, ServiceError, Viewport};

use crate::overlays::{OverlaySet, OverlayStore};
use crate::save::{SaveState, SaveWorkflow};
use crate::viewport::ViewportController;

/// A user intent. Commands never perform IO themselves; handling one
/// yields the side-effect requests to run against the collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Mount behavior: load the saved list and locate the device.
    Initialize,
    Search { query: String },
    SaveCurrent,
    Delete { id: i64 },
    ShowRestaurants,
    FetchGasStations,
    Select { place: Place },
    ClearSelection,
    ResetAll,
}

/// An outbound request to a collaborator, produced by the engine and
/// executed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search { query: String },
    LoadSaved,
    Persist { place: Place },
    Remove { id: i64 },
    FetchNearby {
        category: NearbyCategory,
        center: Coordinate,
        ticket: u64,
    },
    Locate,
    ResetBackend,
}

/// Completion of an outbound request, fed back into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Located(Result<Coordinate, ServiceError>),
    SearchFinished(Result<Place, ServiceError>),
    SavedListLoaded(Result<Vec<Place>, ServiceError>),
    PersistFinished(Result<SaveOutcome, ServiceError>),
    RemoveFinished {
        id: i64,
        result: Result<(), ServiceError>,
    },
    NearbyFinished {
        category: NearbyCategory,
        ticket: u64,
        result: Result<Vec<Place>, ServiceError>,
    },
    ResetFinished(Result<(), ServiceError>),
}

/// The one immutable view handed to the presentation layer after every
/// mutation. The core never pushes partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapSnapshot {
    pub viewport: Viewport,
    pub overlays: OverlaySet,
    pub save_state: SaveState,
    pub is_loading_gas_stations: bool,
    /// Transient, non-blocking message for failed fetches. Replaced on the
    /// next command.
    pub notice: Option<String>,
}

/// Reconciles independently-timed fetch completions into a single
/// consistent viewport and overlay set.
#[derive(Debug, Default)]
pub struct MapEngine {
    viewport: ViewportController,
    overlays: OverlayStore,
    save: SaveWorkflow,
    is_loading_gas_stations: bool,
    notice: Option<String>,
}

impl MapEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            viewport: self.viewport.viewport(),
            overlays: self.overlays.overlays().clone(),
            save_state: self.save.state().clone(),
            is_loading_gas_stations: self.is_loading_gas_stations,
            notice: self.notice.clone(),
        }
    }

    /// Apply a user intent, returning the requests to issue. Selection
    /// commands complete synchronously and return no effects.
    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        self.notice = None;
        match command {
            Command::Initialize => vec![Effect::LoadSaved, Effect::Locate],
            Command::Search { query } => {
                tracing::info!(%query, "searching");
                vec![Effect::Search { query }]
            }
            Command::SaveCurrent => match self.save.begin_save() {
                Some(place) => vec![Effect::Persist { place }],
                None => Vec::new(),
            },
            Command::Delete { id } => vec![Effect::Remove { id }],
            Command::ShowRestaurants => {
                let ticket = self.overlays.issue_restaurants();
                vec![Effect::FetchNearby {
                    category: NearbyCategory::Restaurant,
                    center: self.viewport.viewport().center,
                    ticket,
                }]
            }
            Command::FetchGasStations => {
                self.is_loading_gas_stations = true;
                let ticket = self.overlays.issue_gas_stations();
                vec![Effect::FetchNearby {
                    category: NearbyCategory::GasStation,
                    center: self.viewport.viewport().center,
                    ticket,
                }]
            }
            Command::Select { place } => {
                self.overlays.select(place);
                Vec::new()
            }
            Command::ClearSelection => {
                self.overlays.clear_selection();
                Vec::new()
            }
            Command::ResetAll => vec![Effect::ResetBackend],
        }
    }

    /// Absorb a completion. Some completions chain follow-up effects, e.g.
    /// a successful save or any delete re-fetches the saved list so it
    /// stays authoritative from the backend.
    pub fn absorb(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Located(fix) => {
                self.viewport.apply_device_fix(fix);
                Vec::new()
            }
            Event::SearchFinished(Ok(place)) => {
                self.overlays.set_search_result(Some(place.clone()));
                self.save.on_new_search_result(Some(place.clone()));
                self.viewport.center_on_search_result(&place);
                Vec::new()
            }
            Event::SearchFinished(Err(ServiceError::NotFound)) => {
                // a failed search clears the pin but never jumps the map
                self.overlays.set_search_result(None);
                self.save.on_new_search_result(None);
                Vec::new()
            }
            Event::SearchFinished(Err(err)) => {
                self.raise_notice("search failed", &err);
                Vec::new()
            }
            Event::SavedListLoaded(Ok(list)) => {
                self.overlays.load_saved(list);
                Vec::new()
            }
            Event::SavedListLoaded(Err(err)) => {
                self.raise_notice("could not load saved locations", &err);
                Vec::new()
            }
            Event::PersistFinished(Ok(outcome)) => {
                self.save.complete_save(&outcome);
                match outcome {
                    SaveOutcome::Created(_) => {
                        self.overlays.set_search_result(None);
                        vec![Effect::LoadSaved]
                    }
                    // duplicate is silent and recoverable; nothing changed
                    // on the backend, so there is nothing to re-fetch
                    SaveOutcome::Duplicate => Vec::new(),
                }
            }
            Event::PersistFinished(Err(err)) => {
                self.raise_notice("save failed", &err);
                Vec::new()
            }
            Event::RemoveFinished { id, result } => {
                if let Err(err) = result {
                    tracing::warn!(id, "delete reported {err}");
                    if matches!(err, ServiceError::Transport(_)) {
                        self.raise_notice("delete failed", &err);
                    }
                }
                // resynchronize regardless of the reported outcome
                vec![Effect::LoadSaved]
            }
            Event::NearbyFinished {
                category: NearbyCategory::Restaurant,
                ticket,
                result,
            } => {
                match result {
                    Ok(list) => {
                        self.overlays.load_restaurants(ticket, list);
                    }
                    Err(err) => {
                        if self.overlays.is_current_restaurants(ticket) {
                            self.raise_notice("could not load restaurants", &err);
                        }
                    }
                }
                Vec::new()
            }
            Event::NearbyFinished {
                category: NearbyCategory::GasStation,
                ticket,
                result,
            } => {
                // a stale completion must not load data, touch the loading
                // flag, or re-enable the control while a newer fetch is
                // still pending
                if !self.overlays.is_current_gas_stations(ticket) {
                    tracing::debug!(ticket, "ignoring superseded gas-station completion");
                    return Vec::new();
                }
                self.is_loading_gas_stations = false;
                match result {
                    Ok(list) => {
                        self.overlays.load_gas_stations(ticket, list);
                        self.viewport
                            .fit_to_overlay(&self.overlays.overlays().gas_stations);
                    }
                    Err(err) => self.raise_notice("could not load gas stations", &err),
                }
                Vec::new()
            }
            Event::ResetFinished(Ok(())) => {
                self.overlays.reset_all();
                self.save.reset();
                self.viewport.reset();
                self.is_loading_gas_stations = false;
                Vec::new()
            }
            Event::ResetFinished(Err(err)) => {
                self.raise_notice("reset failed", &err);
                Vec::new()
            }
        }
    }

    fn raise_notice(&mut self, context: &str, err: &ServiceError) {
        tracing::warn!("{context}: {err}");
        self.notice = Some(format!("{context}: {err}"));
    }
}
