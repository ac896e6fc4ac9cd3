#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use pet_booking::{
    config::Config,
    domain::models::{
        availability::{AvailabilityMap, AvailabilityRecord},
        booking::BookingRequest,
        pet::PetRecord,
        slot::TimeSlot,
    },
    domain::ports::{AvailabilityApi, AvailabilityView, BookingApi, PetApi},
    error::AppError,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn slot(s: &str) -> TimeSlot {
    TimeSlot::parse(s).unwrap()
}

pub fn slots(raw: &[&str]) -> Vec<TimeSlot> {
    raw.iter().map(|s| slot(s)).collect()
}

pub fn rendered(slots: &[TimeSlot]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

pub fn map_of(entries: &[(&str, &[&str])]) -> AvailabilityMap {
    AvailabilityMap::from_records(entries.iter().map(|(d, times)| AvailabilityRecord {
        date: date(d),
        time: slots(times),
    }))
}

pub fn pet(id: &str, name: &str) -> PetRecord {
    PetRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind: "Dog".to_string(),
        breed: Some("Beagle".to_string()),
        image: None,
    }
}

// In-memory ports

#[derive(Default)]
pub struct MockAvailabilityApi {
    pub stored: Mutex<AvailabilityMap>,
    pub commits: Mutex<Vec<Vec<AvailabilityRecord>>>,
    pub fail_commit: Mutex<bool>,
    pub fail_fetch: Mutex<bool>,
}

impl MockAvailabilityApi {
    pub fn with(map: AvailabilityMap) -> Self {
        Self { stored: Mutex::new(map), ..Default::default() }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.lock().unwrap().len()
    }
}

#[async_trait]
impl AvailabilityApi for MockAvailabilityApi {
    async fn fetch(&self, _provider_id: &str, _view: AvailabilityView) -> Result<AvailabilityMap, AppError> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(AppError::Transport("connection refused".into()));
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn commit(&self, _provider_id: &str, availability: &AvailabilityMap) -> Result<(), AppError> {
        if *self.fail_commit.lock().unwrap() {
            return Err(AppError::Server { status: 500, message: "boom".into() });
        }
        self.commits.lock().unwrap().push(availability.to_records());
        *self.stored.lock().unwrap() = availability.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBookingApi {
    pub requests: Mutex<Vec<(String, BookingRequest)>>,
    pub reject_with: Mutex<Option<String>>,
}

impl MockBookingApi {
    pub fn rejecting(reason: &str) -> Self {
        Self { reject_with: Mutex::new(Some(reason.to_string())), ..Default::default() }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn book(&self, provider_id: &str, request: &BookingRequest) -> Result<(), AppError> {
        self.requests.lock().unwrap().push((provider_id.to_string(), request.clone()));
        match self.reject_with.lock().unwrap().clone() {
            Some(reason) => Err(AppError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MockPetApi {
    pub pets: Vec<PetRecord>,
    pub fail: bool,
}

#[async_trait]
impl PetApi for MockPetApi {
    async fn list_pets(&self) -> Result<Vec<PetRecord>, AppError> {
        if self.fail {
            return Err(AppError::Transport("timed out".into()));
        }
        Ok(self.pets.clone())
    }
}

// Mock REST server

pub struct ServerState {
    pub availability: Mutex<Value>,
    pub pets: Mutex<Value>,
    pub commits: Mutex<Vec<Value>>,
    pub bookings: Mutex<Vec<(String, Value)>>,
    pub booking_reply: Mutex<(StatusCode, Value)>,
    pub commit_reply: Mutex<(StatusCode, Value)>,
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub request_ids: Mutex<Vec<String>>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            availability: Mutex::new(json!({ "success": true, "data": { "providerId": "prov-1", "availability": [] } })),
            pets: Mutex::new(json!([])),
            commits: Mutex::new(Vec::new()),
            bookings: Mutex::new(Vec::new()),
            booking_reply: Mutex::new((StatusCode::OK, json!({ "success": true }))),
            commit_reply: Mutex::new((StatusCode::OK, json!({ "success": true }))),
            auth_headers: Mutex::new(Vec::new()),
            request_ids: Mutex::new(Vec::new()),
        }
    }
}

impl ServerState {
    fn record(&self, headers: &HeaderMap) {
        let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string);
        self.auth_headers.lock().unwrap().push(auth);
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            self.request_ids.lock().unwrap().push(id.to_string());
        }
    }
}

async fn get_availability(
    State(state): State<Arc<ServerState>>,
    Path(_provider_id): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    state.record(&headers);
    Json(state.availability.lock().unwrap().clone())
}

async fn put_availability(
    State(state): State<Arc<ServerState>>,
    Path(_provider_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(&headers);
    state.commits.lock().unwrap().push(body);
    let (status, reply) = state.commit_reply.lock().unwrap().clone();
    (status, Json(reply))
}

async fn post_booking(
    State(state): State<Arc<ServerState>>,
    Path(provider_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(&headers);
    state.bookings.lock().unwrap().push((provider_id, body));
    let (status, reply) = state.booking_reply.lock().unwrap().clone();
    (status, Json(reply))
}

async fn list_pets(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Json<Value> {
    state.record(&headers);
    Json(state.pets.lock().unwrap().clone())
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<ServerState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(ServerState::default());

        let app = Router::new()
            .route(
                "/api/services/availability/{provider_id}",
                get(get_availability).put(put_availability),
            )
            .route("/api/service/{provider_id}", post(post_booking))
            .route("/api/myanimal", get(list_pets))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            api_base_url: self.base_url.clone(),
            ..Config::default()
        }
    }
}
