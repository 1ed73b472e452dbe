//! Ratio computation from statement line items
//!
//! Pure arithmetic over the latest-quarter statements. Degenerate
//! denominators never panic: liquidity ratios fall back to sector-typical
//! placeholders, everything else reads zero.

use ratio_core::{
    ActivityRatios, FinancialStatements, LeverageRatios, LiquidityRatios, ProfitabilityRatios,
    RatioBundle,
};

/// Compute the four-category ratio bundle from one quarter's statements.
pub fn ratios_from_statements(statements: &FinancialStatements) -> RatioBundle {
    let current_assets = statements.current_assets.unwrap_or(0.0);
    let current_liabilities = statements.current_liabilities.unwrap_or(0.0);
    let inventory = statements.inventory.unwrap_or(0.0);
    let cash = statements.cash.unwrap_or(0.0);
    let total_assets = statements.total_assets.unwrap_or(0.0);
    let total_equity = statements.total_equity.unwrap_or(0.0);
    let total_debt = statements.total_debt.unwrap_or(0.0);
    let total_revenue = statements.total_revenue.unwrap_or(0.0);
    let cost_of_revenue = statements.cost_of_revenue.unwrap_or(0.0);
    let net_income = statements.net_income.unwrap_or(0.0);
    let operating_income = statements.operating_income.unwrap_or(0.0);
    let interest_expense = statements.interest_expense.unwrap_or(0.0);

    let liquidity = LiquidityRatios {
        current_ratio: if current_liabilities != 0.0 {
            current_assets / current_liabilities
        } else {
            1.0
        },
        quick_ratio: if current_liabilities != 0.0 {
            (current_assets - inventory) / current_liabilities
        } else {
            0.8
        },
        cash_ratio: if current_liabilities != 0.0 {
            cash / current_liabilities
        } else {
            0.3
        },
    };

    let gpm = if total_revenue != 0.0 {
        match statements.gross_profit {
            Some(gross_profit) if gross_profit != 0.0 => (gross_profit / total_revenue) * 100.0,
            // Reconstruct gross profit when the line item is missing
            _ => ((total_revenue - cost_of_revenue) / total_revenue) * 100.0,
        }
    } else {
        0.0
    };

    let profitability = ProfitabilityRatios {
        roe: if total_equity != 0.0 {
            (net_income / total_equity) * 100.0
        } else {
            0.0
        },
        roa: if total_assets != 0.0 {
            (net_income / total_assets) * 100.0
        } else {
            0.0
        },
        npm: if total_revenue != 0.0 {
            (net_income / total_revenue) * 100.0
        } else {
            0.0
        },
        gpm,
    };

    let leverage = LeverageRatios {
        der: if total_equity != 0.0 {
            total_debt / total_equity
        } else {
            0.0
        },
        dar: if total_assets != 0.0 {
            total_debt / total_assets
        } else {
            0.0
        },
        times_interest_earned: if interest_expense != 0.0 {
            operating_income / interest_expense
        } else {
            0.0
        },
    };

    let activity = ActivityRatios {
        asset_turnover: if total_assets != 0.0 {
            total_revenue / total_assets
        } else {
            0.0
        },
        inventory_turnover: if inventory != 0.0 {
            cost_of_revenue / inventory
        } else {
            0.0
        },
    };

    RatioBundle {
        liquidity: Some(liquidity),
        profitability: Some(profitability),
        leverage: Some(leverage),
        activity: Some(activity),
    }
}

/// Placeholder bundle for companies whose statements came back empty.
pub fn default_ratio_bundle() -> RatioBundle {
    RatioBundle {
        liquidity: Some(LiquidityRatios {
            current_ratio: 1.2,
            quick_ratio: 0.9,
            cash_ratio: 0.4,
        }),
        profitability: Some(ProfitabilityRatios {
            roe: 12.0,
            roa: 8.0,
            npm: 7.5,
            gpm: 25.0,
        }),
        leverage: Some(LeverageRatios {
            der: 0.6,
            dar: 0.4,
            times_interest_earned: 0.0,
        }),
        activity: Some(ActivityRatios {
            asset_turnover: 1.1,
            inventory_turnover: 6.0,
        }),
    }
}
