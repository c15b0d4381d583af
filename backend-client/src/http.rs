//! Reqwest adapter for the location backend. Owns transport details only:
//! route layout, status mapping, and JSON decoding into domain places.

use async_trait::async_trait;
use map_state::LocationService;
use reqwest::{Client, StatusCode};
use shared_types::{Coordinate, NearbyCategory, Place, SaveOutcome, ServiceError};
use std::env;

use crate::dto::{NearbyPlaceDto, SaveLocationDto, SavedLocationDto, SearchResultDto};

const BASE_URL_ENV: &str = "MAPS_BACKEND_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub struct HttpLocationService {
    client: Client,
    base_url: String,
}

impl HttpLocationService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Base URL from `MAPS_BACKEND_URL`, defaulting to the local backend.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LocationService for HttpLocationService {
    async fn search(&self, query: &str) -> Result<Place, ServiceError> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));
        tracing::debug!(%url, "searching backend");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ServiceError::NotFound),
            status if status.is_success() => {
                let dto: SearchResultDto = response.json().await.map_err(map_transport_error)?;
                Ok(dto.into())
            }
            status => Err(unexpected_status("search", status)),
        }
    }

    async fn list_saved(&self) -> Result<Vec<Place>, ServiceError> {
        let response = self
            .client
            .get(self.url("/locations"))
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(unexpected_status("locations", response.status()));
        }
        let rows: Vec<SavedLocationDto> = response.json().await.map_err(map_transport_error)?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn create(&self, place: &Place) -> Result<SaveOutcome, ServiceError> {
        let response = self
            .client
            .post(self.url("/save"))
            .json(&SaveLocationDto::from_place(place))
            .send()
            .await
            .map_err(map_transport_error)?;
        match response.status() {
            StatusCode::CREATED => {
                // the backend acknowledges a create with a message only;
                // recover the assigned id from the authoritative list
                let saved = self.list_saved().await?;
                let created = saved
                    .into_iter()
                    .rev()
                    .find(|p| p.name == place.name && p.coordinate == place.coordinate)
                    .unwrap_or_else(|| place.clone());
                Ok(SaveOutcome::Created(created))
            }
            StatusCode::OK => Ok(SaveOutcome::Duplicate),
            status => Err(unexpected_status("save", status)),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let response = self
            .client
            .delete(self.url(&format!("/delete/{id}")))
            .send()
            .await
            .map_err(map_transport_error)?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ServiceError::NotFound),
            status if status.is_success() => Ok(()),
            status => Err(unexpected_status("delete", status)),
        }
    }

    async fn nearby(
        &self,
        category: NearbyCategory,
        center: Coordinate,
    ) -> Result<Vec<Place>, ServiceError> {
        let url = format!(
            "{}{}?lat={}&lng={}",
            self.base_url,
            nearby_path(category),
            center.latitude,
            center.longitude
        );
        tracing::debug!(%url, "fetching nearby places");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(unexpected_status("nearby", response.status()));
        }
        let rows: Vec<NearbyPlaceDto> = response.json().await.map_err(map_transport_error)?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    async fn reset_all(&self) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.url("/reset"))
            .send()
            .await
            .map_err(map_transport_error)?;
        if !response.status().is_success() {
            return Err(unexpected_status("reset", response.status()));
        }
        Ok(())
    }
}

fn nearby_path(category: NearbyCategory) -> &'static str {
    match category {
        NearbyCategory::Restaurant => "/restaurants",
        NearbyCategory::GasStation => "/gas-stations",
    }
}

fn map_transport_error(error: reqwest::Error) -> ServiceError {
    ServiceError::Transport(error.to_string())
}

fn unexpected_status(context: &str, status: StatusCode) -> ServiceError {
    ServiceError::Transport(format!("{context} returned status {}", status.as_u16()))
}
