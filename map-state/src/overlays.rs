use serde::{Deserialize, Serialize};
use shared_types::Place;

/// The marker collections rendered on the map, plus the single selected
/// gas station. Every load is a wholesale replace of one collection, so
/// the set always mirrors the most recent accepted fetch exactly.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySet {
    pub search_result: Option<Place>,
    pub saved: Vec<Place>,
    pub restaurants: Vec<Place>,
    pub gas_stations: Vec<Place>,
    pub selected: Option<Place>,
}

/// Owns the overlay collections and the per-collection request tickets
/// that guard against stale nearby responses: a fetch issued later always
/// beats one issued earlier, regardless of arrival order.
#[derive(Debug, Default, Clone)]
pub struct OverlayStore {
    overlays: OverlaySet,
    restaurants_ticket: u64,
    gas_stations_ticket: u64,
}

impl OverlayStore {
    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    /// Clearing the search pin never touches the saved list.
    pub fn set_search_result(&mut self, place: Option<Place>) {
        self.overlays.search_result = place;
    }

    /// The saved list is authoritative from the backend; it is refetched
    /// and replaced after every mutating operation rather than patched
    /// locally.
    pub fn load_saved(&mut self, list: Vec<Place>) {
        self.overlays.saved = list;
    }

    pub fn issue_restaurants(&mut self) -> u64 {
        self.restaurants_ticket += 1;
        self.restaurants_ticket
    }

    pub fn issue_gas_stations(&mut self) -> u64 {
        self.gas_stations_ticket += 1;
        self.gas_stations_ticket
    }

    pub fn is_current_restaurants(&self, ticket: u64) -> bool {
        ticket == self.restaurants_ticket
    }

    pub fn is_current_gas_stations(&self, ticket: u64) -> bool {
        ticket == self.gas_stations_ticket
    }

    /// Returns false and leaves the collection untouched when `ticket` is
    /// not the latest issued.
    pub fn load_restaurants(&mut self, ticket: u64, list: Vec<Place>) -> bool {
        if !self.is_current_restaurants(ticket) {
            tracing::debug!(ticket, "discarding stale restaurant response");
            return false;
        }
        self.overlays.restaurants = list;
        true
    }

    /// Accepting a gas-station load always drops the current selection;
    /// the selected marker must reference a member of the live collection.
    pub fn load_gas_stations(&mut self, ticket: u64, list: Vec<Place>) -> bool {
        if !self.is_current_gas_stations(ticket) {
            tracing::debug!(ticket, "discarding stale gas-station response");
            return false;
        }
        self.overlays.gas_stations = list;
        self.overlays.selected = None;
        true
    }

    /// No-op unless `place` is currently in the gas-station collection.
    pub fn select(&mut self, place: Place) {
        if self.overlays.gas_stations.contains(&place) {
            self.overlays.selected = Some(place);
        }
    }

    pub fn clear_selection(&mut self) {
        self.overlays.selected = None;
    }

    /// Empties every collection. Tickets keep counting up so a nearby
    /// response still in flight at reset time arrives stale.
    pub fn reset_all(&mut self) {
        self.overlays = OverlaySet::default();
        self.restaurants_ticket += 1;
        self.gas_stations_ticket += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Coordinate;

    fn station(id: i64, name: &str) -> Place {
        Place {
            id: Some(id),
            name: name.to_string(),
            coordinate: Coordinate::new(40.0 + id as f64 * 0.01, -74.0),
            address: Some("12 Main St".to_string()),
        }
    }

    #[test]
    fn stale_restaurant_response_is_discarded() {
        let mut store = OverlayStore::default();
        let first = store.issue_restaurants();
        let second = store.issue_restaurants();

        assert!(store.load_restaurants(second, vec![station(2, "Burger Joint")]));
        assert!(!store.load_restaurants(first, vec![station(1, "Pizza Place")]));
        assert_eq!(store.overlays().restaurants, vec![station(2, "Burger Joint")]);
    }

    #[test]
    fn loading_gas_stations_clears_selection() {
        let mut store = OverlayStore::default();
        let ticket = store.issue_gas_stations();
        store.load_gas_stations(ticket, vec![station(1, "Shell")]);
        store.select(station(1, "Shell"));
        assert!(store.overlays().selected.is_some());

        let ticket = store.issue_gas_stations();
        store.load_gas_stations(ticket, vec![station(2, "BP")]);

        assert_eq!(store.overlays().selected, None);
    }

    #[test]
    fn selecting_a_place_outside_the_collection_is_rejected() {
        let mut store = OverlayStore::default();
        let ticket = store.issue_gas_stations();
        store.load_gas_stations(ticket, vec![station(1, "Shell")]);

        store.select(station(9, "Not Loaded"));

        assert_eq!(store.overlays().selected, None);
    }

    #[test]
    fn reset_empties_collections_and_invalidates_inflight_tickets() {
        let mut store = OverlayStore::default();
        store.load_saved(vec![station(1, "Home")]);
        let inflight = store.issue_gas_stations();

        store.reset_all();

        assert_eq!(store.overlays(), &OverlaySet::default());
        assert!(!store.load_gas_stations(inflight, vec![station(2, "BP")]));
        assert!(store.overlays().gas_stations.is_empty());
    }
}
