//! Wire shapes of the location backend. The backend speaks flat
//! `latitude`/`longitude` JSON; these map into the domain `Place`.

use serde::{Deserialize, Serialize};
use shared_types::{Coordinate, Place};

/// Row from `GET /locations`; always carries its persistence id.
#[derive(Debug, Deserialize)]
pub struct SavedLocationDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<SavedLocationDto> for Place {
    fn from(dto: SavedLocationDto) -> Self {
        Place {
            id: Some(dto.id),
            name: dto.name,
            coordinate: Coordinate::new(dto.latitude, dto.longitude),
            address: None,
        }
    }
}

/// Response of `GET /search` — a transient place, no id yet.
#[derive(Debug, Deserialize)]
pub struct SearchResultDto {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<SearchResultDto> for Place {
    fn from(dto: SearchResultDto) -> Self {
        Place {
            id: None,
            name: dto.name,
            coordinate: Coordinate::new(dto.latitude, dto.longitude),
            address: None,
        }
    }
}

/// Nearby POI entry. Restaurant ids are numeric; gas stations come back
/// with an opaque provider string id, which is not a persistence id and is
/// dropped on conversion.
#[derive(Debug, Deserialize)]
pub struct NearbyPlaceDto {
    #[serde(default)]
    pub id: Option<NearbyId>,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NearbyId {
    Numeric(i64),
    Provider(String),
}

impl From<NearbyPlaceDto> for Place {
    fn from(dto: NearbyPlaceDto) -> Self {
        let id = match dto.id {
            Some(NearbyId::Numeric(n)) => Some(n),
            _ => None,
        };
        Place {
            id,
            name: dto.name,
            coordinate: Coordinate::new(dto.latitude, dto.longitude),
            address: dto.address,
        }
    }
}

/// Body of `POST /save`.
#[derive(Debug, Serialize)]
pub struct SaveLocationDto<'a> {
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> SaveLocationDto<'a> {
    pub fn from_place(place: &'a Place) -> Self {
        Self {
            name: &place.name,
            latitude: place.coordinate.latitude,
            longitude: place.coordinate.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_row_maps_to_persisted_place() {
        let body = r#"{"id": 7, "name": "Paris", "latitude": 48.8566, "longitude": 2.3522}"#;
        let dto: SavedLocationDto = serde_json::from_str(body).expect("row should decode");

        let place = Place::from(dto);
        assert_eq!(place.id, Some(7));
        assert_eq!(place.coordinate, Coordinate::new(48.8566, 2.3522));
    }

    #[test]
    fn search_result_maps_to_transient_place() {
        let body = r#"{"name": "Paris", "latitude": 48.8566, "longitude": 2.3522}"#;
        let dto: SearchResultDto = serde_json::from_str(body).expect("result should decode");

        let place = Place::from(dto);
        assert_eq!(place.id, None);
        assert_eq!(place.name, "Paris");
    }

    #[test]
    fn gas_station_with_provider_id_keeps_address_drops_id() {
        let body = r#"{
            "id": "ChIJabc123",
            "name": "Shell",
            "latitude": 40.1,
            "longitude": -74.0,
            "address": "12 Main St"
        }"#;
        let dto: NearbyPlaceDto = serde_json::from_str(body).expect("station should decode");

        let place = Place::from(dto);
        assert_eq!(place.id, None);
        assert_eq!(place.address.as_deref(), Some("12 Main St"));
    }

    #[test]
    fn restaurant_with_numeric_id_is_preserved() {
        let body = r#"{"id": 2, "name": "Burger Joint", "latitude": 39.99, "longitude": -74.01}"#;
        let dto: NearbyPlaceDto = serde_json::from_str(body).expect("restaurant should decode");

        assert_eq!(Place::from(dto).id, Some(2));
    }

    #[test]
    fn save_body_serializes_flat_coordinates() {
        let place = Place {
            id: None,
            name: "Paris".to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
            address: None,
        };

        let body = serde_json::to_value(SaveLocationDto::from_place(&place))
            .expect("body should serialize");
        assert_eq!(body["name"], "Paris");
        assert_eq!(body["latitude"], 48.8566);
        assert_eq!(body["longitude"], 2.3522);
    }
}
