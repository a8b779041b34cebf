//! HTTP client for the Marketstack end-of-day API.

use std::time::Duration;

use async_trait::async_trait;
use vol_core::series::{PricePoint, PriceSeries};

use crate::error::{FeedError, Result};
use crate::models::{ApiErrorEnvelope, EodResponse, EodRow};
use crate::source::{DateRange, EodSource};

/// Default API endpoint; the free tier is plain HTTP.
pub const DEFAULT_BASE_URL: &str = "http://api.marketstack.com/v1";

/// Environment variable holding the access key.
pub const API_KEY_VAR: &str = "MARKETSTACK_API_KEY";

/// Largest page size the API allows.
const PAGE_LIMIT: u64 = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Marketstack `/eod` endpoint.
///
/// Pages through the full result set, then sorts and validates the rows
/// into a [`PriceSeries`]. Cloning is cheap; the underlying connection
/// pool is shared.
#[derive(Debug, Clone)]
pub struct MarketstackClient {
    http: reqwest::Client,
    access_key: String,
    base_url: String,
}

impl MarketstackClient {
    /// Creates a client with the given access key.
    pub fn new(access_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            access_key: access_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Creates a client from the [`API_KEY_VAR`] environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(FeedError::MissingApiKey { var: API_KEY_VAR })?;
        Self::new(key)
    }

    /// Overrides the API endpoint, e.g. to point at a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The endpoint requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches all EOD rows for `symbol` in `range`, following pagination.
    ///
    /// Rows come back in the server's order, most recent first; use
    /// [`MarketstackClient::series_from_rows`] to turn them into a series.
    pub async fn fetch_eod(&self, symbol: &str, range: DateRange) -> Result<Vec<EodRow>> {
        let mut rows = Vec::new();
        let mut offset = 0u64;
        loop {
            let page = self.fetch_page(symbol, range, offset).await?;
            let count = page.data.len() as u64;
            let total = page.pagination.total;
            tracing::debug!(symbol, offset, count, total, "fetched eod page");
            rows.extend(page.data);
            offset += count;
            if count == 0 || offset >= total {
                break;
            }
        }
        Ok(rows)
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        range: DateRange,
        offset: u64,
    ) -> Result<EodResponse> {
        let url = format!("{}/eod", self.base_url);
        let date_from = range.start.to_string();
        let date_to = range.end.to_string();
        let limit = PAGE_LIMIT.to_string();
        let offset = offset.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("symbols", symbol),
                ("date_from", date_from.as_str()),
                ("date_to", date_to.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;
        Self::decode_response(response).await
    }

    async fn decode_response(response: reqwest::Response) -> Result<EodResponse> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
                return Err(FeedError::Api {
                    code: envelope.error.code,
                    message: envelope.error.message,
                });
            }
            return Err(FeedError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Converts raw API rows into a validated series.
    ///
    /// Sorts by trade date, drops duplicate dates (first row wins), and
    /// runs full series validation. Empty input maps to
    /// [`FeedError::EmptyData`].
    pub fn series_from_rows(symbol: &str, rows: Vec<EodRow>) -> Result<PriceSeries> {
        if rows.is_empty() {
            return Err(FeedError::EmptyData {
                symbol: symbol.to_string(),
            });
        }
        let mut points = Vec::with_capacity(rows.len());
        for row in &rows {
            points.push(PricePoint::new(row.trade_date()?, row.close));
        }
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Ok(PriceSeries::new(points)?)
    }
}

#[async_trait]
impl EodSource for MarketstackClient {
    fn name(&self) -> &'static str {
        "marketstack"
    }

    async fn eod_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        tracing::info!(symbol, %range, "requesting eod closes");
        let rows = self.fetch_eod(symbol, range).await?;
        let series = Self::series_from_rows(symbol, rows)?;
        tracing::info!(symbol, closes = series.len(), "eod closes ready");
        Ok(series)
    }
}

fn truncate_body(body: String) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body
    } else {
        body.chars().take(MAX).collect()
    }
}
