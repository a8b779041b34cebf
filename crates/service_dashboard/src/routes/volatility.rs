//! Realized volatility analytics endpoints
//!
//! Every endpoint resolves missing query parameters from the server
//! configuration, fetches closes through the shared price feed, and runs the
//! estimators over the result. Rejected parameters come back as 400 with a
//! JSON error body; feed failures map to 404 or 502.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use adapter_marketstack::source::DateRange;
use vol_core::series::PriceSeries;
use vol_core::types::Date;
use vol_core::vol::horizons::{default_horizons, horizon_report};
use vol_core::vol::{realized_volatility, rolling_volatility, EstimatorConfig, VolMethod};
use vol_report::chart::render_chart_png;
use vol_report::export::{write_rolling_csv, SymbolReport};

use super::{ApiError, AppState};

/// Bounds accepted for the rolling window parameter (trading days).
const MIN_WINDOW: usize = 1;
const MAX_WINDOW: usize = 252;

/// Bounds accepted for the lookback parameter (calendar years).
const MIN_YEARS: u32 = 1;
const MAX_YEARS: u32 = 50;

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolatilityQuery {
    /// Ticker symbol; falls back to the configured default
    pub symbol: Option<String>,
    /// Rolling window in trading days
    pub window: Option<usize>,
    /// Estimator formula ("sum-of-squares" or "sample-std")
    pub method: Option<String>,
    /// Whether to scale estimates to annual terms
    pub annualize: Option<bool>,
    /// How many calendar years of history to fetch
    pub years: Option<u32>,
}

/// Response for GET /api/v1/volatility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityResponse {
    /// Symbol the analytics describe
    pub symbol: String,
    /// Name of the feed that served the closes
    pub source: String,
    /// Estimator formula used
    pub method: String,
    /// Whether estimates are in annual terms
    pub annualize: bool,
    /// Rolling window in trading days
    pub window: usize,
    /// Number of closes in the fetched series
    pub observations: usize,
    /// First close date
    pub start_date: Date,
    /// Last close date
    pub end_date: Date,
    /// Estimate over the whole sample; null when there are too few returns
    pub full_sample: Option<f64>,
    /// Most recent defined rolling estimate, if the window ever filled
    pub latest: Option<RollingPoint>,
    /// Trailing-horizon estimates (horizons longer than the sample are omitted)
    pub horizons: Vec<HorizonRow>,
}

/// One dated rolling estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingPoint {
    /// Date of the last return in the window
    pub date: Date,
    /// Volatility estimate
    pub volatility: f64,
}

/// One trailing-horizon estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonRow {
    /// Horizon label, e.g. "1Y"
    pub label: String,
    /// Horizon length in trading days
    pub days: usize,
    /// Volatility estimate
    pub volatility: f64,
}

/// Query parameters after defaults and validation
#[derive(Debug)]
struct ResolvedQuery {
    symbol: String,
    window: usize,
    years: u32,
    config: EstimatorConfig,
}

/// Build the volatility routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/volatility", get(volatility_handler))
        .route("/api/v1/volatility/summary", get(summary_handler))
        .route("/api/v1/volatility/rolling.csv", get(rolling_csv_handler))
        .route("/api/v1/chart.png", get(chart_handler))
}

fn resolve_query(state: &AppState, query: &VolatilityQuery) -> Result<ResolvedQuery, ApiError> {
    let symbol = query
        .symbol
        .clone()
        .unwrap_or_else(|| state.config.default_symbol.clone());
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::bad_request("symbol must not be empty"));
    }

    let window = query.window.unwrap_or(state.config.default_window);
    if !(MIN_WINDOW..=MAX_WINDOW).contains(&window) {
        return Err(ApiError::bad_request(format!(
            "window must be between {} and {}, got {}",
            MIN_WINDOW, MAX_WINDOW, window
        )));
    }

    let years = query.years.unwrap_or(state.config.default_years);
    if !(MIN_YEARS..=MAX_YEARS).contains(&years) {
        return Err(ApiError::bad_request(format!(
            "years must be between {} and {}, got {}",
            MIN_YEARS, MAX_YEARS, years
        )));
    }

    let method = match &query.method {
        Some(raw) => raw.parse::<VolMethod>().map_err(ApiError::bad_request)?,
        None => VolMethod::SumOfSquares,
    };
    let config = EstimatorConfig::new(method).with_annualize(query.annualize.unwrap_or(true));

    Ok(ResolvedQuery {
        symbol,
        window,
        years,
        config,
    })
}

async fn fetch_series(state: &AppState, symbol: &str, years: u32) -> Result<PriceSeries, ApiError> {
    let range = DateRange::trailing_years(years);
    let series = state.source.eod_closes(symbol, range).await?;
    Ok(series)
}

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// GET /api/v1/volatility - Full analytics for one symbol
///
/// Returns the full-sample estimate, the latest defined rolling estimate, and
/// the trailing-horizon report, all under the requested formula.
async fn volatility_handler(
    State(state): State<AppState>,
    Query(query): Query<VolatilityQuery>,
) -> Result<Json<VolatilityResponse>, ApiError> {
    let params = resolve_query(&state, &query)?;
    let series = fetch_series(&state, &params.symbol, params.years).await?;

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(ApiError::internal("feed returned an empty series"));
    };
    let start_date = first.date;
    let end_date = last.date;

    let returns = series.log_returns();
    let full_sample = realized_volatility(returns.values(), &params.config);
    let rolling = rolling_volatility(&returns, params.window, &params.config);
    let latest = rolling
        .defined()
        .last()
        .map(|(date, volatility)| RollingPoint { date, volatility });

    let report = horizon_report(&series, &default_horizons(), &params.config);
    let horizons = report
        .iter()
        .map(|entry| HorizonRow {
            label: entry.label.clone(),
            days: entry.days,
            volatility: entry.volatility,
        })
        .collect();

    tracing::info!(
        symbol = %params.symbol,
        observations = series.len(),
        window = params.window,
        method = %params.config.method,
        "volatility computed"
    );

    Ok(Json(VolatilityResponse {
        symbol: params.symbol,
        source: state.source.name().to_string(),
        method: params.config.method.name().to_string(),
        annualize: params.config.annualize,
        window: params.window,
        observations: series.len(),
        start_date,
        end_date,
        full_sample: finite(full_sample),
        latest,
        horizons,
    }))
}

/// GET /api/v1/volatility/summary - Horizon report in batch form
///
/// Uses the sample standard deviation formula regardless of the method
/// parameter, matching the batch report output.
async fn summary_handler(
    State(state): State<AppState>,
    Query(query): Query<VolatilityQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = resolve_query(&state, &query)?;
    let series = fetch_series(&state, &params.symbol, params.years).await?;

    let config = EstimatorConfig::sample_std().with_annualize(params.config.annualize);
    let report = horizon_report(&series, &default_horizons(), &config);
    let summary = SymbolReport::new(&params.symbol, &report);
    let value = serde_json::to_value(&summary).map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(value))
}

/// GET /api/v1/volatility/rolling.csv - Rolling series as CSV
///
/// Only defined estimates are exported; the NaN prefix before the window
/// first fills is dropped.
async fn rolling_csv_handler(
    State(state): State<AppState>,
    Query(query): Query<VolatilityQuery>,
) -> Result<Response, ApiError> {
    let params = resolve_query(&state, &query)?;
    let series = fetch_series(&state, &params.symbol, params.years).await?;

    let returns = series.log_returns();
    let rolling = rolling_volatility(&returns, params.window, &params.config);

    let mut buf = Vec::new();
    write_rolling_csv(&mut buf, &rolling)?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], buf).into_response())
}

/// GET /api/v1/chart.png - Price and rolling volatility chart
async fn chart_handler(
    State(state): State<AppState>,
    Query(query): Query<VolatilityQuery>,
) -> Result<Response, ApiError> {
    let params = resolve_query(&state, &query)?;
    let series = fetch_series(&state, &params.symbol, params.years).await?;

    let returns = series.log_returns();
    let rolling = rolling_volatility(&returns, params.window, &params.config);
    let png = render_chart_png(&params.symbol, &series, &rolling, params.window)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
