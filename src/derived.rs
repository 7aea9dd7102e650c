use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use std::ops::Div;

use crate::error::MetricsPluginError;
use crate::metric::StatResult;
use crate::time_range::PERIOD_SECONDS;

struct Derivation {
    source: &'static str,
    target: &'static str,
}

const NORMALIZED_CAPACITY: [Derivation; 2] = [
    Derivation {
        source: "ConsumedReadCapacityUnitsSum",
        target: "ConsumedReadCapacityUnitsNormalized",
    },
    Derivation {
        source: "ConsumedWriteCapacityUnitsSum",
        target: "ConsumedWriteCapacityUnitsNormalized",
    },
];

/// Adds per-second consumed capacity next to the per-period sums.
pub fn derive_values(stats: &mut StatResult) {
    for derivation in NORMALIZED_CAPACITY.iter() {
        let sum = match stats.get(derivation.source) {
            Some(sum) => *sum,
            None => continue,
        };
        match per_second(sum) {
            Ok(rate) => {
                stats.insert(derivation.target, rate);
            }
            Err(error) => {
                tracing::warn!(metric = derivation.source, %error, "failed to normalize");
            }
        }
    }
}

fn per_second(sum: f64) -> Result<f64, MetricsPluginError> {
    let sum = BigDecimal::from_f64(sum).ok_or(MetricsPluginError::ToPrimitive)?;
    sum.div(BigDecimal::from(PERIOD_SECONDS))
        .to_f64()
        .ok_or(MetricsPluginError::ToPrimitive)
}
