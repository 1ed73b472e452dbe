//! Sector benchmark bands
//!
//! Typical ranges for Indonesian listed companies, used by the bottom-up
//! health scorer and the strengths/weaknesses analysis. Each band carries
//! excellent/good/fair cut points; how a value compares against them
//! depends on the metric's polarity.

use ratio_core::MetricPolarity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkBand {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

const fn band(excellent: f64, good: f64, fair: f64) -> BenchmarkBand {
    BenchmarkBand {
        excellent,
        good,
        fair,
    }
}

const TELECOM: &[(&str, BenchmarkBand)] = &[
    ("currentRatio", band(1.5, 1.2, 1.0)),
    ("roe", band(20.0, 15.0, 10.0)),
    ("roa", band(12.0, 8.0, 5.0)),
    ("der", band(0.5, 0.7, 1.0)),
    ("assetTurnover", band(0.8, 0.6, 0.4)),
];

const CONSUMER_GOODS: &[(&str, BenchmarkBand)] = &[
    ("currentRatio", band(2.0, 1.5, 1.2)),
    ("roe", band(25.0, 18.0, 12.0)),
    ("roa", band(15.0, 10.0, 6.0)),
    ("der", band(0.4, 0.6, 0.8)),
    ("inventoryTurnover", band(8.0, 6.0, 4.0)),
];

const AUTOMOTIVE: &[(&str, BenchmarkBand)] = &[
    ("currentRatio", band(1.8, 1.4, 1.1)),
    ("roe", band(18.0, 12.0, 8.0)),
    ("roa", band(10.0, 6.0, 3.0)),
    ("der", band(0.6, 0.8, 1.2)),
    ("assetTurnover", band(1.5, 1.2, 0.8)),
];

const BANKING: &[(&str, BenchmarkBand)] = &[
    ("roe", band(20.0, 15.0, 10.0)),
    ("roa", band(3.0, 2.0, 1.0)),
];

const DEFAULT: &[(&str, BenchmarkBand)] = &[
    ("currentRatio", band(1.8, 1.3, 1.0)),
    ("roe", band(20.0, 15.0, 10.0)),
    ("roa", band(10.0, 6.0, 3.0)),
    ("der", band(0.5, 0.7, 1.0)),
    ("assetTurnover", band(1.2, 0.8, 0.5)),
];

fn sector_table(sector: &str) -> &'static [(&'static str, BenchmarkBand)] {
    match sector {
        "Banking" => BANKING,
        "Telecommunications" => TELECOM,
        "Consumer Goods" => CONSUMER_GOODS,
        "Automotive" => AUTOMOTIVE,
        _ => DEFAULT,
    }
}

/// Benchmark band for a metric within a sector, falling back to the
/// generic table for sectors without their own profile. `None` when the
/// sector profile does not track the metric at all.
pub fn benchmark_for(sector: &str, metric: &str) -> Option<BenchmarkBand> {
    sector_table(sector)
        .iter()
        .find(|(key, _)| *key == metric)
        .map(|(_, band)| *band)
}

/// Weight profile for the bottom-up composite score. The banking profile
/// keeps only the profitability terms of the richer bank scorecard — its
/// deposit-side metrics have no slot in the ratio bundle — and the
/// weighted mean renormalizes over whatever is present.
pub(crate) fn score_weights(sector: &str) -> &'static [(&'static str, f64)] {
    match sector {
        "Banking" => &[("roe", 30.0), ("roa", 25.0)],
        _ => &[
            ("currentRatio", 20.0),
            ("roe", 25.0),
            ("roa", 20.0),
            ("der", 20.0),
            ("assetTurnover", 15.0),
        ],
    }
}

/// Score one metric value against its band: 100/75/50/25 for
/// excellent/good/fair/below-fair, with the inequality direction set by
/// the metric's polarity.
pub fn ratio_score(value: f64, band: &BenchmarkBand, polarity: MetricPolarity) -> f64 {
    match polarity {
        MetricPolarity::LowerIsBetter => {
            if value <= band.excellent {
                100.0
            } else if value <= band.good {
                75.0
            } else if value <= band.fair {
                50.0
            } else {
                25.0
            }
        }
        MetricPolarity::HigherIsBetter => {
            if value >= band.excellent {
                100.0
            } else if value >= band.good {
                75.0
            } else if value >= band.fair {
                50.0
            } else {
                25.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sector_uses_generic_table() {
        let band = benchmark_for("Cement", "roe").unwrap();
        assert_eq!(band, band_for_default_roe());
    }

    fn band_for_default_roe() -> BenchmarkBand {
        band(20.0, 15.0, 10.0)
    }

    #[test]
    fn higher_is_better_scoring() {
        let roe = benchmark_for("Automotive", "roe").unwrap();
        assert_eq!(ratio_score(20.0, &roe, MetricPolarity::HigherIsBetter), 100.0);
        assert_eq!(ratio_score(12.0, &roe, MetricPolarity::HigherIsBetter), 75.0);
        assert_eq!(ratio_score(8.0, &roe, MetricPolarity::HigherIsBetter), 50.0);
        assert_eq!(ratio_score(5.0, &roe, MetricPolarity::HigherIsBetter), 25.0);
    }

    #[test]
    fn lower_is_better_scoring_inverts_the_bands() {
        let der = benchmark_for("Telecommunications", "der").unwrap();
        assert_eq!(ratio_score(0.4, &der, MetricPolarity::LowerIsBetter), 100.0);
        assert_eq!(ratio_score(0.7, &der, MetricPolarity::LowerIsBetter), 75.0);
        assert_eq!(ratio_score(0.9, &der, MetricPolarity::LowerIsBetter), 50.0);
        assert_eq!(ratio_score(1.5, &der, MetricPolarity::LowerIsBetter), 25.0);
    }

    #[test]
    fn consumer_goods_tracks_inventory_not_asset_turnover() {
        assert!(benchmark_for("Consumer Goods", "inventoryTurnover").is_some());
        assert!(benchmark_for("Consumer Goods", "assetTurnover").is_none());
    }
}
