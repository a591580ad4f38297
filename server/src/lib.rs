pub mod config;
pub mod error;

use anyhow::Result;
use axum::{extract::{Path, Query, State}, routing::{get, post}, Json, Router};
use client::{ApiClient, PriceQuery};
use serde::{Deserialize, Serialize};
use stay_core::dates::{format_display, StayDates};
use stay_core::destination::load_destinations;
use stay_core::guests::GuestCounter;
use stay_core::pricing::{price_breakdown, PriceBreakdown};
use stay_core::{Destination, DestinationIndex, Hotel, RoomOffer};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Destination>,
}

/// Upstream hotel object plus the derived gallery URLs.
#[derive(Serialize)]
pub struct HotelView {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub images: Vec<String>,
}

impl HotelView {
    /// Derived gallery URLs replace any `images` the upstream sent.
    pub fn new(mut hotel: Hotel) -> Self {
        hotel.extra.remove("images");
        Self { images: hotel.image_urls(), hotel }
    }
}

#[derive(Deserialize)]
pub struct PricesParams {
    pub destination_id: String,
    pub checkin: String,
    pub checkout: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    pub currency: Option<String>,
}
fn default_adults() -> u32 { 2 }
fn default_rooms() -> u32 { 1 }

#[derive(Serialize)]
pub struct RoomView {
    pub room_name: String,
    #[serde(flatten)]
    pub offer: RoomOffer,
}

#[derive(Serialize)]
pub struct PricesResponse {
    /// `ready`, `empty` or `timed_out`; the last two both carry no rooms.
    pub outcome: &'static str,
    pub rooms: Vec<RoomView>,
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub room: Option<RoomOffer>,
    pub quantity: u32,
    pub checkin: String,
    pub checkout: String,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub room_name: String,
    pub quantity: u32,
    pub nights: u32,
    pub checkin: String,
    pub checkout: String,
    pub breakdown: PriceBreakdown,
}

#[derive(Clone)]
pub struct AppState {
    pub destinations: Arc<Vec<Destination>>,
    pub index: Arc<DestinationIndex>,
    pub api: ApiClient,
}

pub fn build_app(config: &Config, destinations_path: &std::path::Path) -> Result<Router> {
    // Index the destination snapshot once at startup
    let destinations = load_destinations(destinations_path)?;
    let index = DestinationIndex::build(&destinations);
    tracing::info!(num_destinations = destinations.len(), num_tokens = index.len(), "destination index ready");

    let api = ApiClient::new(&config.client_config())?;
    let app_state = AppState { destinations: Arc::new(destinations), index: Arc::new(index), api };

    // CORS: comma-separated CORS_ALLOW_ORIGIN, or allow Any by default
    let origins: Vec<_> = config
        .cors_allow_origin
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/destinations/search", get(search_handler))
        .route("/api/hotels/:id", get(hotel_handler))
        .route("/api/hotels/:id/prices", get(prices_handler))
        .route("/checkout/quote", post(quote_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, 100);
    let hits = state.index.search(&params.q, usize::MAX);
    let total_hits = hits.len();
    let results = hits
        .into_iter()
        .take(k)
        .filter_map(|doc_id| state.destinations.get(doc_id).cloned())
        .collect();
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn hotel_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<HotelView>, ApiError> {
    let hotel = state.api.hotel_details(&id).await?;
    Ok(Json(HotelView::new(hotel)))
}

pub async fn prices_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PricesParams>,
) -> Result<Json<PricesResponse>, ApiError> {
    let stay = StayDates::parse(&params.checkin, &params.checkout)?;
    stay.validate(today())?;
    let guests = GuestCounter::new(params.adults, params.children, params.rooms);
    let mut query = PriceQuery::new(params.destination_id, &stay, &guests);
    if let Some(currency) = params.currency {
        query = query.with_currency(currency);
    }

    let outcome = state.api.room_prices(&id, &query).await?;
    let label = outcome.label();
    let rooms = outcome
        .into_items()
        .into_iter()
        .map(|offer| RoomView { room_name: offer.display_name(), offer })
        .collect();
    Ok(Json(PricesResponse { outcome: label, rooms }))
}

pub async fn quote_handler(Json(req): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, ApiError> {
    if req.quantity == 0 {
        return Err(ApiError::BadRequest("quantity must be at least 1".into()));
    }
    let stay = StayDates::parse(&req.checkin, &req.checkout)?;
    stay.validate(today())?;
    let nights = stay.nights();
    let breakdown = price_breakdown(req.room.as_ref(), req.quantity, nights)
        .ok_or_else(|| ApiError::BadRequest("room offer required".into()))?;
    Ok(Json(QuoteResponse {
        room_name: req.room.as_ref().map(RoomOffer::display_name).unwrap_or_default(),
        quantity: req.quantity,
        nights,
        checkin: format_display(stay.checkin),
        checkout: format_display(stay.checkout),
        breakdown,
    }))
}

fn today() -> time::Date {
    time::OffsetDateTime::now_utc().date()
}
