use serde::{Deserialize, Serialize};

use super::inference::AggregatedOutput;
use super::registry::OutputDomain;

/// Center of gravity of the combined output curve, with its two sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub numerator: f64,
    pub denominator: f64,
    pub value: f64,
}

impl Centroid {
    pub fn is_empty(&self) -> bool {
        self.denominator == 0.0
    }
}

/// Discrete centroid `sum(x * mu) / sum(mu)`. An all-zero curve yields exactly `0.0`.
pub fn centroid(aggregated: &AggregatedOutput, domain: &OutputDomain) -> Centroid {
    let combined = aggregated.combined();
    let (numerator, denominator) = domain
        .values()
        .iter()
        .zip(&combined)
        .fold((0.0, 0.0), |(num, den), (&x, &mu)| (num + x * mu, den + mu));

    let value = if denominator > 0.0 {
        (numerator / denominator).clamp(domain.start(), domain.end())
    } else {
        0.0
    };

    Centroid {
        numerator,
        denominator,
        value,
    }
}
