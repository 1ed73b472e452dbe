//! Comparison series aggregation
//!
//! Pairs a company's normalized ratios with a counterpart — industry
//! averages or a peer company — one record per tracked metric, in the
//! fixed canonical order of each category. Records are never sorted by
//! value, so the grouped-bar display stays stable across requests.

use ratio_core::{
    ComparisonRecord, ComparisonSeries, IndustryAverage, MetricPolarity, NormalizedRatios,
    RatioBundle, RatioCategory,
};

/// One tracked metric: wire key, chart label, long display name, the
/// industry-average key it pairs with, and its polarity.
pub struct MetricDef {
    pub key: &'static str,
    pub label: &'static str,
    pub long_name: &'static str,
    pub industry_key: &'static str,
    pub polarity: MetricPolarity,
    value: fn(&NormalizedRatios) -> f64,
}

impl MetricDef {
    pub fn value_of(&self, ratios: &NormalizedRatios) -> f64 {
        (self.value)(ratios)
    }
}

const LIQUIDITY_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "currentRatio",
        label: "Current Ratio",
        long_name: "Current Ratio",
        industry_key: "average_current_ratio",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.liquidity.current_ratio,
    },
    MetricDef {
        key: "quickRatio",
        label: "Quick Ratio",
        long_name: "Quick Ratio",
        industry_key: "average_quick_ratio",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.liquidity.quick_ratio,
    },
    MetricDef {
        key: "cashRatio",
        label: "Cash Ratio",
        long_name: "Cash Ratio",
        industry_key: "average_cash_ratio",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.liquidity.cash_ratio,
    },
];

const PROFITABILITY_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "roe",
        label: "ROE",
        long_name: "Return on Equity",
        industry_key: "average_roe",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.profitability.roe,
    },
    MetricDef {
        key: "roa",
        label: "ROA",
        long_name: "Return on Assets",
        industry_key: "average_roa",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.profitability.roa,
    },
    MetricDef {
        key: "npm",
        label: "NPM",
        long_name: "Net Profit Margin",
        industry_key: "average_npm",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.profitability.npm,
    },
    MetricDef {
        key: "gpm",
        label: "GPM",
        long_name: "Gross Profit Margin",
        industry_key: "average_gpm",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.profitability.gpm,
    },
];

const LEVERAGE_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "der",
        label: "DER",
        long_name: "Debt to Equity Ratio",
        industry_key: "average_der",
        polarity: MetricPolarity::LowerIsBetter,
        value: |r| r.leverage.der,
    },
    MetricDef {
        key: "dar",
        label: "DAR",
        long_name: "Debt to Asset Ratio",
        industry_key: "average_dar",
        polarity: MetricPolarity::LowerIsBetter,
        value: |r| r.leverage.dar,
    },
    MetricDef {
        key: "timesInterestEarned",
        label: "Times Interest Earned",
        long_name: "Times Interest Earned",
        industry_key: "average_times_interest_earned",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.leverage.times_interest_earned,
    },
];

const ACTIVITY_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "assetTurnover",
        label: "Asset Turnover",
        long_name: "Asset Turnover",
        industry_key: "average_asset_turnover",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.activity.asset_turnover,
    },
    MetricDef {
        key: "inventoryTurnover",
        label: "Inventory Turnover",
        long_name: "Inventory Turnover",
        industry_key: "average_inventory_turnover",
        polarity: MetricPolarity::HigherIsBetter,
        value: |r| r.activity.inventory_turnover,
    },
];

/// Canonical metric list for a category, in display order.
pub fn category_metrics(category: RatioCategory) -> &'static [MetricDef] {
    match category {
        RatioCategory::Liquidity => LIQUIDITY_METRICS,
        RatioCategory::Profitability => PROFITABILITY_METRICS,
        RatioCategory::Leverage => LEVERAGE_METRICS,
        RatioCategory::Activity => ACTIVITY_METRICS,
    }
}

fn target_for(targets: &[(&str, f64)], key: &str) -> Option<f64> {
    targets.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Build the comparison series against industry averages. Absent industry
/// keys read as zero; targets are caller-supplied constants, emitted only
/// for metrics the caller named.
pub fn compare_with_industry(
    ratios: &NormalizedRatios,
    industry: &IndustryAverage,
    category: RatioCategory,
    targets: &[(&str, f64)],
) -> ComparisonSeries {
    let records = category_metrics(category)
        .iter()
        .map(|metric| ComparisonRecord {
            metric: metric.label.to_string(),
            company: metric.value_of(ratios),
            industry: industry
                .averages
                .get(metric.industry_key)
                .copied()
                .unwrap_or(0.0),
            target: target_for(targets, metric.key),
        })
        .collect();

    ComparisonSeries {
        category,
        format: category.format(),
        records,
    }
}

/// Build the comparison series against a peer company. The peer's values
/// ride in the `industry` slot of each record — the grouped-bar display
/// uses the same two-series shape for both counterparts.
pub fn compare_with_peer(
    ratios: &NormalizedRatios,
    peer: &NormalizedRatios,
    category: RatioCategory,
    targets: &[(&str, f64)],
) -> ComparisonSeries {
    let records = category_metrics(category)
        .iter()
        .map(|metric| ComparisonRecord {
            metric: metric.label.to_string(),
            company: metric.value_of(ratios),
            industry: metric.value_of(peer),
            target: target_for(targets, metric.key),
        })
        .collect();

    ComparisonSeries {
        category,
        format: category.format(),
        records,
    }
}

/// Category series for a raw bundle: when the category was never computed
/// the series is empty (the page renders nothing), which is different from
/// a computed-as-zero category that yields zero-valued records.
pub fn industry_series_for(
    bundle: &RatioBundle,
    industry: &IndustryAverage,
    category: RatioCategory,
    targets: &[(&str, f64)],
) -> ComparisonSeries {
    if !bundle.has_category(category) {
        return ComparisonSeries {
            category,
            format: category.format(),
            records: Vec::new(),
        };
    }
    compare_with_industry(&crate::normalize(bundle), industry, category, targets)
}

/// Peer-company variant of [`industry_series_for`]; emptiness is decided
/// by the subject company's bundle, while a peer with the category absent
/// compares as zeros.
pub fn peer_series_for(
    bundle: &RatioBundle,
    peer: &RatioBundle,
    category: RatioCategory,
    targets: &[(&str, f64)],
) -> ComparisonSeries {
    if !bundle.has_category(category) {
        return ComparisonSeries {
            category,
            format: category.format(),
            records: Vec::new(),
        };
    }
    compare_with_peer(
        &crate::normalize(bundle),
        &crate::normalize(peer),
        category,
        targets,
    )
}

/// Period-over-period change in percent. `None` when there is no previous
/// value to compare against (or it is zero); changes below 0.01% collapse
/// to exactly zero so the display can report "no change".
pub fn period_change_pct(current: f64, previous: Option<f64>) -> Option<f64> {
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    let change = ((current - previous) / previous) * 100.0;
    if change.abs() < 0.01 {
        Some(0.0)
    } else {
        Some(change)
    }
}

/// Achievement against a caller-supplied target, in percent of target.
/// A target of zero yields `None` rather than a division blow-up.
pub fn target_achievement_pct(value: f64, target: f64) -> Option<f64> {
    if target == 0.0 {
        None
    } else {
        Some((value / target) * 100.0)
    }
}
