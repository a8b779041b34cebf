//! Wire types for the Marketstack REST API.
//!
//! Only the fields this system reads are modelled; serde skips the rest of
//! the payload (open, high, low, adjusted figures, volume).

use serde::Deserialize;
use vol_core::types::{Date, DateError};

/// Paging block attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// Page size the server applied.
    pub limit: u64,
    /// Offset of the first row in this page.
    pub offset: u64,
    /// Number of rows in this page.
    pub count: u64,
    /// Total rows matching the query across all pages.
    pub total: u64,
}

/// One end-of-day row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EodRow {
    /// Ticker symbol, empty if the server omits it.
    #[serde(default)]
    pub symbol: String,
    /// Quote timestamp, e.g. `2025-07-25T00:00:00+0000`.
    pub date: String,
    /// Closing price.
    pub close: f64,
}

impl EodRow {
    /// Extracts the calendar date from the quote timestamp.
    ///
    /// Marketstack returns full timestamps; only the leading `YYYY-MM-DD`
    /// part matters for daily closes.
    pub fn trade_date(&self) -> Result<Date, DateError> {
        let text = self.date.get(..10).unwrap_or(&self.date);
        Date::parse(text)
    }
}

/// Envelope of the `/eod` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EodResponse {
    /// Paging block for this page.
    pub pagination: Pagination,
    /// Rows in this page, most recent first as the API sends them.
    pub data: Vec<EodRow>,
}

/// Error envelope the API sends with non-success statuses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorEnvelope {
    /// The error body.
    pub error: ApiErrorBody,
}

/// Body of an API error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. `invalid_access_key`.
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_eod_response() {
        let json = r#"{
            "pagination": {"limit": 1000, "offset": 0, "count": 2, "total": 2},
            "data": [
                {
                    "open": 213.9, "high": 214.95, "low": 213.5,
                    "close": 213.88, "volume": 40268800.0,
                    "adj_close": 213.88, "split_factor": 1.0, "dividend": 0.0,
                    "symbol": "AAPL", "exchange": "XNAS",
                    "date": "2025-07-25T00:00:00+0000"
                },
                {
                    "close": 213.76, "symbol": "AAPL",
                    "date": "2025-07-24T00:00:00+0000"
                }
            ]
        }"#;

        let response: EodResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].close, 213.88);
        assert_eq!(response.data[0].symbol, "AAPL");
    }

    #[test]
    fn test_trade_date_strips_timestamp() {
        let row = EodRow {
            symbol: "AAPL".to_string(),
            date: "2025-07-25T00:00:00+0000".to_string(),
            close: 213.88,
        };
        assert_eq!(row.trade_date().unwrap(), Date::from_ymd(2025, 7, 25).unwrap());
    }

    #[test]
    fn test_trade_date_accepts_plain_date() {
        let row = EodRow {
            symbol: String::new(),
            date: "2025-07-25".to_string(),
            close: 213.88,
        };
        assert_eq!(row.trade_date().unwrap(), Date::from_ymd(2025, 7, 25).unwrap());
    }

    #[test]
    fn test_trade_date_rejects_garbage() {
        let row = EodRow {
            symbol: String::new(),
            date: "yesterday".to_string(),
            close: 213.88,
        };
        assert!(row.trade_date().is_err());
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{
            "error": {
                "code": "invalid_access_key",
                "message": "You have not supplied a valid API Access Key."
            }
        }"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, "invalid_access_key");
        assert!(envelope.error.message.contains("Access Key"));
    }

    #[test]
    fn test_error_envelope_tolerates_missing_fields() {
        let envelope: ApiErrorEnvelope = serde_json::from_str(r#"{"error": {}}"#).unwrap();
        assert!(envelope.error.code.is_empty());
        assert!(envelope.error.message.is_empty());
    }
}
