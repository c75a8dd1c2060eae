//! Synthetic transaction generator.

use super::types::{GeneratorHints, TransactionEvent};
use crate::error::Error;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

const LOCATIONS: [&str; 6] = ["New York", "London", "Tokyo", "Singapore", "Dubai", "Mumbai"];
const DEVICES: [&str; 4] = ["Mobile", "Desktop", "Tablet", "ATM"];
const MERCHANTS: [&str; 7] = [
    "Amazon", "Walmart", "Starbucks", "Shell", "Apple", "Target", "Best Buy",
];
const LATE_NIGHT_HOURS: [u8; 4] = [2, 3, 4, 5];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Probability of producing an anomalous-shaped transaction
    pub anomaly_bias: f64,
    pub locations: Vec<String>,
    pub devices: Vec<String>,
    pub merchants: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            anomaly_bias: 0.12,
            locations: LOCATIONS.iter().map(|s| s.to_string()).collect(),
            devices: DEVICES.iter().map(|s| s.to_string()).collect(),
            merchants: MERCHANTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Produces one transaction per call, biased toward normal-shaped records
/// with an occasional anomalous-shaped one.
#[derive(Debug, Clone, Default)]
pub struct TransactionGenerator {
    config: GeneratorConfig,
}

impl TransactionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn with_bias(anomaly_bias: f64) -> Self {
        Self {
            config: GeneratorConfig {
                anomaly_bias,
                ..GeneratorConfig::default()
            },
        }
    }

    pub fn generate(&self) -> crate::Result<(TransactionEvent, GeneratorHints)> {
        let mut rng = rand::thread_rng();

        let anomalous = rng.gen::<f64>() < self.config.anomaly_bias;
        let (amount, hour, velocity, geo_distance): (f64, u8, f64, f64) = if anomalous {
            (
                rng.gen_range(2000.0..8000.0),
                LATE_NIGHT_HOURS[rng.gen_range(0..LATE_NIGHT_HOURS.len())],
                rng.gen_range(8.0..15.0),
                rng.gen_range(1000.0..5000.0),
            )
        } else {
            (
                rng.gen_range(10.0..200.0),
                rng.gen_range(8..=22),
                rng.gen_range(0.5..3.0),
                rng.gen_range(10.0..500.0),
            )
        };

        let location = pick(&self.config.locations, &mut rng)?;
        let device = pick(&self.config.devices, &mut rng)?;
        let merchant = pick(&self.config.merchants, &mut rng)?;

        let now = Utc::now();
        let event = TransactionEvent {
            id: format!(
                "TXN_{}_{}",
                now.format("%Y%m%d%H%M%S"),
                rng.gen_range(1000..10000)
            ),
            timestamp: now,
            amount: (amount * 100.0).round() / 100.0,
            location,
            device,
            merchant,
            hour: Some(hour),
            velocity: Some(velocity),
            geo_distance: Some(geo_distance),
        };
        let hints = GeneratorHints {
            device_change: rng.gen::<f64>() > 0.7,
        };

        Ok((event, hints))
    }
}

fn pick(values: &[String], rng: &mut impl Rng) -> crate::Result<String> {
    values
        .choose(rng)
        .cloned()
        .ok_or_else(|| Error::Generator("empty categorical catalog".to_string()))
}
