//! Offline price sources: fixed sample quotes and a seeded GBM generator.
//!
//! Both exist so every layer above the adapters can run without network
//! access or an API key. The sample source is the tiny fixture used in
//! docs and smoke checks; the GBM source produces arbitrarily long series
//! with a known target volatility for exercising the estimators.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use vol_core::series::{PricePoint, PriceSeries};
use vol_core::types::Date;
use vol_core::vol::TRADING_DAYS_PER_YEAR;

use crate::error::Result;
use crate::source::{DateRange, EodSource};

/// Four fixed AAPL closes from late July 2025.
///
/// Returned for any symbol and any range; the range is ignored on purpose
/// so offline runs always have data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl SampleSource {
    fn sample_points() -> Result<Vec<PricePoint>> {
        let quotes = [
            (22, 214.39),
            (23, 214.14),
            (24, 213.76),
            (25, 213.88),
        ];
        quotes
            .iter()
            .map(|&(day, close)| Ok(PricePoint::new(Date::from_ymd(2025, 7, day)?, close)))
            .collect()
    }
}

#[async_trait]
impl EodSource for SampleSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn eod_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        tracing::debug!(symbol, %range, "serving built-in sample quotes");
        Ok(PriceSeries::new(Self::sample_points()?)?)
    }
}

/// Seeded geometric Brownian motion close generator.
///
/// Produces one close per calendar day in the requested range via the
/// exact GBM step `S exp((mu - sigma^2/2) dt + sigma sqrt(dt) Z)` with
/// `dt = 1/252`. The same seed and range always reproduce the same path,
/// so annualized estimates over a generated series land near `sigma`.
#[derive(Debug, Clone, Copy)]
pub struct GbmSource {
    spot: f64,
    drift: f64,
    volatility: f64,
    seed: u64,
}

impl GbmSource {
    /// Creates a generator with the given dynamics and seed.
    ///
    /// # Panics
    ///
    /// Panics if `spot` is not finite and positive, or `volatility` is not
    /// finite and non-negative.
    pub fn new(spot: f64, drift: f64, volatility: f64, seed: u64) -> Self {
        assert!(
            spot.is_finite() && spot > 0.0,
            "spot must be finite and positive"
        );
        assert!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be finite and non-negative"
        );
        Self {
            spot,
            drift,
            volatility,
            seed,
        }
    }

    /// Target annualized volatility of the generated path.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Generates the close path for the range.
    pub fn generate(&self, range: DateRange) -> Vec<PricePoint> {
        let steps = range.num_days() as usize;
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let drift_term = (self.drift - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dt.sqrt();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut points = Vec::with_capacity(steps + 1);
        let mut price = self.spot;
        points.push(PricePoint::new(range.start, price));
        for i in 1..=steps {
            let z: f64 = StandardNormal.sample(&mut rng);
            price *= (drift_term + diffusion * z).exp();
            points.push(PricePoint::new(range.start.add_days(i as u64), price));
        }
        points
    }
}

impl Default for GbmSource {
    /// Spot 100, drift 5%, volatility 20%, seed 42.
    fn default() -> Self {
        Self::new(100.0, 0.05, 0.2, 42)
    }
}

#[async_trait]
impl EodSource for GbmSource {
    fn name(&self) -> &'static str {
        "synthetic-gbm"
    }

    async fn eod_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        tracing::debug!(
            symbol,
            %range,
            volatility = self.volatility,
            seed = self.seed,
            "generating gbm closes"
        );
        Ok(PriceSeries::new(self.generate(range))?)
    }
}
