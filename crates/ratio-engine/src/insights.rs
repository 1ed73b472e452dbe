//! Strengths, weaknesses and recommendations
//!
//! Per-ratio benchmark scoring turned into short narrative bullets for the
//! dashboard's insight panels. Strong metrics (band score >= 75) become
//! strengths, weak ones (<= 40) become weaknesses with a matching
//! recommendation, capped at three per list.

use ratio_core::{RatioBundle, RatioCategory};
use serde::{Deserialize, Serialize};

use crate::benchmarks::{benchmark_for, ratio_score};
use crate::comparison::category_metrics;

const MAX_ITEMS: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightReport {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Score each tracked ratio the sector profile knows about and summarize
/// the extremes. Categories absent from the bundle are skipped, not
/// treated as weaknesses.
pub fn analyze_strengths_weaknesses(bundle: &RatioBundle, sector: &str) -> InsightReport {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();

    for category in RatioCategory::ALL {
        for metric in category_metrics(category) {
            let Some(value) = bundle.metric(metric.key) else {
                continue;
            };
            let Some(band) = benchmark_for(sector, metric.key) else {
                continue;
            };

            let score = ratio_score(value, &band, metric.polarity);
            if score >= 75.0 {
                strengths.push(format!("Strong {}", metric.long_name));
            } else if score <= 40.0 {
                weaknesses.push(format!("Weak {}", metric.long_name));
                recommendations.push(format!("Improve {}", metric.long_name));
            }
        }
    }

    if recommendations.is_empty() {
        recommendations = vec![
            "Maintain current performance levels".to_string(),
            "Monitor industry trends".to_string(),
            "Focus on operational efficiency".to_string(),
        ];
    }

    strengths.truncate(MAX_ITEMS);
    weaknesses.truncate(MAX_ITEMS);
    recommendations.truncate(MAX_ITEMS);

    InsightReport {
        strengths,
        weaknesses,
        recommendations,
    }
}
