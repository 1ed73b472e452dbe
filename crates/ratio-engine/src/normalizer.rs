//! Ratio bundle normalization
//!
//! The single place where "absent" collapses into "zero": every consumer
//! that needs a complete ratio set goes through here, so the defaulting
//! policy lives in exactly one spot.

use ratio_core::{
    ActivityRatios, LeverageRatios, LiquidityRatios, NormalizedRatios, ProfitabilityRatios,
    RatioBundle,
};

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Produce a fully-populated ratio set from a possibly-partial bundle.
/// Missing sub-records and non-finite leaves become `0.0`; an absent
/// category is indistinguishable from an all-zero one downstream. Total
/// and pure — absence of data is a valid state, not an error.
pub fn normalize(bundle: &RatioBundle) -> NormalizedRatios {
    let liquidity = bundle.liquidity.unwrap_or_default();
    let profitability = bundle.profitability.unwrap_or_default();
    let leverage = bundle.leverage.unwrap_or_default();
    let activity = bundle.activity.unwrap_or_default();

    NormalizedRatios {
        liquidity: LiquidityRatios {
            current_ratio: finite(liquidity.current_ratio),
            quick_ratio: finite(liquidity.quick_ratio),
            cash_ratio: finite(liquidity.cash_ratio),
        },
        profitability: ProfitabilityRatios {
            roe: finite(profitability.roe),
            roa: finite(profitability.roa),
            npm: finite(profitability.npm),
            gpm: finite(profitability.gpm),
        },
        leverage: LeverageRatios {
            der: finite(leverage.der),
            dar: finite(leverage.dar),
            times_interest_earned: finite(leverage.times_interest_earned),
        },
        activity: ActivityRatios {
            asset_turnover: finite(activity.asset_turnover),
            inventory_turnover: finite(activity.inventory_turnover),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_categories_become_zero_filled() {
        let normalized = normalize(&RatioBundle::default());
        assert_eq!(normalized, NormalizedRatios::default());
    }

    #[test]
    fn normalizing_is_idempotent() {
        let bundle = RatioBundle {
            liquidity: Some(LiquidityRatios {
                current_ratio: 1.25,
                quick_ratio: 0.98,
                cash_ratio: 0.45,
            }),
            profitability: Some(ProfitabilityRatios {
                roe: 15.2,
                roa: 2.8,
                npm: 8.5,
                gpm: 12.3,
            }),
            leverage: None,
            activity: Some(ActivityRatios {
                asset_turnover: 0.33,
                inventory_turnover: 8.5,
            }),
        };

        let once = normalize(&bundle);
        let twice = normalize(&once.to_bundle());
        assert_eq!(once, twice);
    }

    #[test]
    fn non_finite_leaves_collapse_to_zero() {
        let bundle = RatioBundle {
            liquidity: Some(LiquidityRatios {
                current_ratio: f64::NAN,
                quick_ratio: f64::INFINITY,
                cash_ratio: 0.3,
            }),
            ..Default::default()
        };

        let normalized = normalize(&bundle);
        assert_eq!(normalized.liquidity.current_ratio, 0.0);
        assert_eq!(normalized.liquidity.quick_ratio, 0.0);
        assert_eq!(normalized.liquidity.cash_ratio, 0.3);
    }
}
