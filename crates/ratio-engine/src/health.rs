//! Bottom-up health score derivation
//!
//! Scores each weighted metric against its sector benchmark band and folds
//! the results into a 0-100 composite. The scorer reads the raw bundle:
//! categories that were never computed drop out of the weighted mean
//! instead of being scored as zeros, so a company is not punished for a
//! statement the data source could not produce.

use ratio_core::{MetricPolarity, RatioBundle};

use crate::benchmarks::{benchmark_for, ratio_score, score_weights};

/// Neutral score when no weighted metric could be evaluated.
const NEUTRAL_SCORE: i32 = 50;

/// Derive a composite health score from a company's raw ratios and its
/// sector's benchmark profile. Clamped to `[0, 100]`.
pub fn score_ratios(bundle: &RatioBundle, sector: &str) -> i32 {
    let mut total = 0.0;
    let mut max_possible = 0.0;

    for &(metric, weight) in score_weights(sector) {
        let Some(value) = bundle.metric(metric) else {
            continue;
        };
        let Some(band) = benchmark_for(sector, metric) else {
            continue;
        };

        let score = ratio_score(value, &band, MetricPolarity::for_key(metric));
        total += score * (weight / 100.0);
        max_possible += weight;
    }

    if max_possible > 0.0 {
        (((total / max_possible) * 100.0) as i32).clamp(0, 100)
    } else {
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratio_core::{
        ActivityRatios, HealthScore, LeverageRatios, LiquidityRatios, ProfitabilityRatios,
    };

    fn strong_bundle() -> RatioBundle {
        RatioBundle {
            liquidity: Some(LiquidityRatios {
                current_ratio: 2.1,
                quick_ratio: 1.5,
                cash_ratio: 0.8,
            }),
            profitability: Some(ProfitabilityRatios {
                roe: 22.0,
                roa: 12.0,
                npm: 15.0,
                gpm: 35.0,
            }),
            leverage: Some(LeverageRatios {
                der: 0.4,
                dar: 0.3,
                times_interest_earned: 6.0,
            }),
            activity: Some(ActivityRatios {
                asset_turnover: 1.3,
                inventory_turnover: 7.0,
            }),
        }
    }

    #[test]
    fn excellent_across_the_board_scores_100() {
        assert_eq!(score_ratios(&strong_bundle(), "Retail"), 100);
    }

    #[test]
    fn empty_bundle_scores_neutral() {
        assert_eq!(score_ratios(&RatioBundle::default(), "Retail"), NEUTRAL_SCORE);
    }

    #[test]
    fn missing_categories_drop_out_of_the_weighted_mean() {
        // Only profitability present, both metrics at the excellent band:
        // the mean renormalizes over roe+roa weight and still reads 100.
        let bundle = RatioBundle {
            profitability: Some(ProfitabilityRatios {
                roe: 25.0,
                roa: 15.0,
                npm: 10.0,
                gpm: 20.0,
            }),
            ..Default::default()
        };
        assert_eq!(score_ratios(&bundle, "Retail"), 100);
    }

    #[test]
    fn weak_ratios_score_in_the_bottom_band() {
        let bundle = RatioBundle {
            liquidity: Some(LiquidityRatios {
                current_ratio: 0.5,
                quick_ratio: 0.3,
                cash_ratio: 0.1,
            }),
            profitability: Some(ProfitabilityRatios {
                roe: 2.0,
                roa: 1.0,
                npm: 0.5,
                gpm: 5.0,
            }),
            leverage: Some(LeverageRatios {
                der: 2.5,
                dar: 0.9,
                times_interest_earned: 0.5,
            }),
            activity: Some(ActivityRatios {
                asset_turnover: 0.2,
                inventory_turnover: 1.0,
            }),
        };
        // Every weighted metric lands on 25.
        assert_eq!(score_ratios(&bundle, "Retail"), 25);
    }

    #[test]
    fn banking_profile_scores_on_profitability_only() {
        let bundle = RatioBundle {
            profitability: Some(ProfitabilityRatios {
                roe: 21.0,
                roa: 3.2,
                npm: 30.0,
                gpm: 0.0,
            }),
            ..Default::default()
        };
        assert_eq!(score_ratios(&bundle, "Banking"), 100);
    }

    #[test]
    fn derived_composite_feeds_the_breakdown() {
        let composite = score_ratios(&strong_bundle(), "Automotive");
        let score = HealthScore::from_composite(composite);
        assert_eq!(score.composite, composite);
    }
}
