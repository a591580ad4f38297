use anyhow::{bail, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use stay_core::dates::{format_iso, StayDates};
use stay_core::fetch::{fetch_with_retry, poll_until_ready, PollOutcome, PollPayload, RetryPolicy};
use stay_core::guests::GuestCounter;
use stay_core::{FetchError, Hotel, RoomOffer};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://hotelapi.loyalty.dev";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub details_policy: RetryPolicy,
    pub prices_policy: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("stay-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 12,
            details_policy: RetryPolicy::details(),
            prices_policy: RetryPolicy::polling(),
        }
    }
}

/// Query for `GET /api/hotels/{id}/prices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub destination_id: String,
    pub checkin: String,
    pub checkout: String,
    pub lang: String,
    pub currency: String,
    pub country_code: String,
    pub guests: String,
    pub partner_id: String,
    pub landing_page: String,
    pub product_type: String,
}

impl PriceQuery {
    pub fn new(destination_id: impl Into<String>, stay: &StayDates, guests: &GuestCounter) -> Self {
        Self {
            destination_id: destination_id.into(),
            checkin: format_iso(stay.checkin),
            checkout: format_iso(stay.checkout),
            lang: "en_US".into(),
            currency: "SGD".into(),
            country_code: "SG".into(),
            guests: guests.query_param(),
            partner_id: "1".into(),
            landing_page: "wl-acme-earn".into(),
            product_type: "earn".into(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("destination_id", self.destination_id.as_str()),
            ("checkin", self.checkin.as_str()),
            ("checkout", self.checkout.as_str()),
            ("lang", self.lang.as_str()),
            ("currency", self.currency.as_str()),
            ("country_code", self.country_code.as_str()),
            ("guests", self.guests.as_str()),
            ("partner_id", self.partner_id.as_str()),
            ("landing_page", self.landing_page.as_str()),
            ("product_type", self.product_type.as_str()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    details_policy: RetryPolicy,
    prices_policy: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            bail!("base URL {} cannot carry a path", config.base_url);
        }
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, base, details_policy: config.details_policy, prices_policy: config.prices_policy })
    }

    /// `GET /api/hotels/{id}`, retried per the details policy.
    pub async fn hotel_details(&self, hotel_id: &str) -> Result<Hotel, FetchError> {
        let url = self.endpoint(&["api", "hotels", hotel_id])?;
        tracing::debug!(%url, "fetching hotel details");
        fetch_with_retry(self.details_policy, || self.get_json(url.clone(), &[])).await
    }

    /// `GET /api/hotels/{id}/prices`, polled until the upstream job completes.
    pub async fn room_prices(&self, hotel_id: &str, query: &PriceQuery) -> Result<PollOutcome<RoomOffer>, FetchError> {
        let url = self.endpoint(&["api", "hotels", hotel_id, "prices"])?;
        let pairs = query.to_pairs();
        tracing::debug!(%url, checkin = %query.checkin, checkout = %query.checkout, "polling room prices");
        let outcome = poll_until_ready(self.prices_policy, || {
            self.get_json::<PollPayload<RoomOffer>>(url.clone(), &pairs)
        })
        .await?;
        tracing::info!(hotel_id, outcome = outcome.label(), "room prices resolved");
        Ok(outcome)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::transport(format!("base URL {} cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T, FetchError> {
        let resp = self.http.get(url).query(query).send().await.map_err(FetchError::transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus { status: status.as_u16() });
        }
        let bytes = resp.bytes().await.map_err(FetchError::transport)?;
        serde_json::from_slice(&bytes).map_err(FetchError::body)
    }
}
