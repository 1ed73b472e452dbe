use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Liquidity ratios: short-term obligation coverage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRatios {
    pub current_ratio: f64,
    pub quick_ratio: f64,
    pub cash_ratio: f64,
}

/// Profitability ratios, expressed as 0-100 percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityRatios {
    pub roe: f64,
    pub roa: f64,
    pub npm: f64,
    pub gpm: f64,
}

/// Leverage ratios: debt structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageRatios {
    pub der: f64,
    pub dar: f64,
    pub times_interest_earned: f64,
}

/// Activity ratios: asset utilization efficiency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRatios {
    pub asset_turnover: f64,
    pub inventory_turnover: f64,
}

/// A company's ratio set for one period. A `None` sub-record means the
/// category was not computed for this company/period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<LiquidityRatios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profitability: Option<ProfitabilityRatios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage: Option<LeverageRatios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityRatios>,
}

impl RatioBundle {
    /// Look up a single metric by its wire key. `None` when the owning
    /// category was never computed — callers that want zero-defaulting
    /// should go through the normalizer instead.
    pub fn metric(&self, key: &str) -> Option<f64> {
        match key {
            "currentRatio" => self.liquidity.map(|l| l.current_ratio),
            "quickRatio" => self.liquidity.map(|l| l.quick_ratio),
            "cashRatio" => self.liquidity.map(|l| l.cash_ratio),
            "roe" => self.profitability.map(|p| p.roe),
            "roa" => self.profitability.map(|p| p.roa),
            "npm" => self.profitability.map(|p| p.npm),
            "gpm" => self.profitability.map(|p| p.gpm),
            "der" => self.leverage.map(|l| l.der),
            "dar" => self.leverage.map(|l| l.dar),
            "timesInterestEarned" => self.leverage.map(|l| l.times_interest_earned),
            "assetTurnover" => self.activity.map(|a| a.asset_turnover),
            "inventoryTurnover" => self.activity.map(|a| a.inventory_turnover),
            _ => None,
        }
    }

    pub fn has_category(&self, category: RatioCategory) -> bool {
        match category {
            RatioCategory::Liquidity => self.liquidity.is_some(),
            RatioCategory::Profitability => self.profitability.is_some(),
            RatioCategory::Leverage => self.leverage.is_some(),
            RatioCategory::Activity => self.activity.is_some(),
        }
    }
}

/// A fully-populated ratio set. Produced only by the normalizer; every leaf
/// is a finite number, with missing source data collapsed to `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRatios {
    pub liquidity: LiquidityRatios,
    pub profitability: ProfitabilityRatios,
    pub leverage: LeverageRatios,
    pub activity: ActivityRatios,
}

impl NormalizedRatios {
    /// Re-wrap as a bundle with every category present.
    pub fn to_bundle(&self) -> RatioBundle {
        RatioBundle {
            liquidity: Some(self.liquidity),
            profitability: Some(self.profitability),
            leverage: Some(self.leverage),
            activity: Some(self.activity),
        }
    }
}

/// The four tracked ratio categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioCategory {
    Liquidity,
    Profitability,
    Leverage,
    Activity,
}

impl RatioCategory {
    pub const ALL: [RatioCategory; 4] = [
        RatioCategory::Liquidity,
        RatioCategory::Profitability,
        RatioCategory::Leverage,
        RatioCategory::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatioCategory::Liquidity => "liquidity",
            RatioCategory::Profitability => "profitability",
            RatioCategory::Leverage => "leverage",
            RatioCategory::Activity => "activity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "liquidity" => Some(RatioCategory::Liquidity),
            "profitability" => Some(RatioCategory::Profitability),
            "leverage" => Some(RatioCategory::Leverage),
            "activity" => Some(RatioCategory::Activity),
            _ => None,
        }
    }

    /// Display discipline for the category's comparison series.
    /// Profitability metrics are already 0-100 scaled; everything else is a
    /// plain decimal ratio.
    pub fn format(&self) -> ValueFormat {
        match self {
            RatioCategory::Profitability => ValueFormat::Percentage,
            _ => ValueFormat::Decimal,
        }
    }
}

/// How the presentation layer should render a series' values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Percentage,
    Decimal,
    Currency,
}

/// Whether a larger metric value is an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricPolarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricPolarity {
    /// Debt ratios improve as they fall; every other tracked metric
    /// improves as it rises.
    pub fn for_key(key: &str) -> Self {
        match key {
            "der" | "dar" => MetricPolarity::LowerIsBetter,
            _ => MetricPolarity::HigherIsBetter,
        }
    }
}

/// Qualitative label for a composite health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthLabel {
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            HealthLabel::Excellent
        } else if score >= 60 {
            HealthLabel::Good
        } else if score >= 40 {
            HealthLabel::Fair
        } else {
            HealthLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Excellent => "Excellent",
            HealthLabel::Good => "Good",
            HealthLabel::Fair => "Fair",
            HealthLabel::Poor => "Poor",
        }
    }
}

/// Color severity tier for the gauge display. Cut points differ from the
/// label bands (three tiers at 80/60, not four at 80/60/40) and the two
/// classifications stay independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Success,
    Warning,
    Destructive,
}

impl SeverityTier {
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            SeverityTier::Success
        } else if score >= 60 {
            SeverityTier::Warning
        } else {
            SeverityTier::Destructive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Success => "success",
            SeverityTier::Warning => "warning",
            SeverityTier::Destructive => "destructive",
        }
    }
}

/// Composite financial health score with its category breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub composite: i32,
    pub liquidity: i32,
    pub profitability: i32,
    pub leverage: i32,
    pub activity: i32,
    pub label: HealthLabel,
    pub severity: SeverityTier,
}

impl HealthScore {
    /// Split a composite score into its category shares: 25% liquidity,
    /// 30% profitability, 25% leverage, 20% activity, each rounded
    /// independently (half away from zero). The shares are intentionally
    /// not clamped — a composite above 100 overflows each share
    /// proportionally rather than silently saturating.
    pub fn from_composite(composite: i32) -> Self {
        let s = composite as f64;
        HealthScore {
            composite,
            liquidity: (s * 0.25).round() as i32,
            profitability: (s * 0.30).round() as i32,
            leverage: (s * 0.25).round() as i32,
            activity: (s * 0.20).round() as i32,
            label: HealthLabel::from_score(composite),
            severity: SeverityTier::from_score(composite),
        }
    }
}

/// One metric's company-versus-counterpart value pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub metric: String,
    pub company: f64,
    pub industry: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

/// An ordered comparison series for one ratio category, tagged with the
/// format discipline the grouped-bar display should apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub category: RatioCategory,
    pub format: ValueFormat,
    pub records: Vec<ComparisonRecord>,
}

/// One point of a quarterly trend series, chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
}

/// Sector benchmark values, averaged across the sector's companies.
/// Metric keys carry an `average_` prefix (`average_roe`,
/// `average_current_ratio`); consumers default absent keys to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAverage {
    pub sector: String,
    pub total_companies_in_sector: usize,
    pub successful_calculations: usize,
    #[serde(flatten)]
    pub averages: HashMap<String, f64>,
}

/// Basic registry entry for a listed company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub ticker: String,
    pub name: String,
    pub sector: String,
}

/// Ratio set for one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRatios {
    pub period: String,
    pub ratios: RatioBundle,
}

/// Full per-company payload served to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyData {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub latest_period: String,
    pub ratios: RatioBundle,
    pub trends: Vec<TrendPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_average: Option<IndustryAverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<i32>,
    pub last_updated: DateTime<Utc>,
}

/// One side of a two-company comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub name: String,
    pub sector: String,
    pub ratios: RatioBundle,
    pub health_score: i32,
}

/// Two-company comparison payload, keyed by ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonData {
    pub comparison_data: HashMap<String, ComparisonEntry>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCompany {
    pub ticker: String,
    pub name: String,
}

/// Sector roll-up for the sectors endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub name: String,
    pub companies: Vec<SectorCompany>,
    pub total_companies: usize,
}

/// Latest-quarter financial statement line items, as retrieved from the
/// market data source. Every item is optional; ratio computation decides
/// the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub period: String,
    pub current_assets: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub inventory: Option<f64>,
    pub cash: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_equity: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_revenue: Option<f64>,
    pub gross_profit: Option<f64>,
    pub cost_of_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub operating_income: Option<f64>,
    pub interest_expense: Option<f64>,
}

impl FinancialStatements {
    /// Whether the balance sheet carried anything usable.
    pub fn has_balance_sheet(&self) -> bool {
        self.total_assets.is_some()
            || self.total_equity.is_some()
            || self.current_assets.is_some()
            || self.current_liabilities.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_bands_are_lower_bound_inclusive() {
        assert_eq!(HealthLabel::from_score(80), HealthLabel::Excellent);
        assert_eq!(HealthLabel::from_score(79), HealthLabel::Good);
        assert_eq!(HealthLabel::from_score(60), HealthLabel::Good);
        assert_eq!(HealthLabel::from_score(59), HealthLabel::Fair);
        assert_eq!(HealthLabel::from_score(40), HealthLabel::Fair);
        assert_eq!(HealthLabel::from_score(39), HealthLabel::Poor);
    }

    #[test]
    fn severity_bands_use_their_own_cut_points() {
        assert_eq!(SeverityTier::from_score(80), SeverityTier::Success);
        assert_eq!(SeverityTier::from_score(79), SeverityTier::Warning);
        assert_eq!(SeverityTier::from_score(60), SeverityTier::Warning);
        assert_eq!(SeverityTier::from_score(59), SeverityTier::Destructive);
    }

    #[test]
    fn composite_78_splits_into_documented_shares() {
        let score = HealthScore::from_composite(78);
        assert_eq!(score.liquidity, 20); // round(19.5)
        assert_eq!(score.profitability, 23); // round(23.4)
        assert_eq!(score.leverage, 20); // round(19.5)
        assert_eq!(score.activity, 16); // round(15.6)
        assert_eq!(score.label, HealthLabel::Good);
        assert_eq!(score.severity, SeverityTier::Warning);
    }

    #[test]
    fn shares_stay_near_composite_and_within_category_maxima() {
        for s in 0..=100 {
            let score = HealthScore::from_composite(s);
            let sum = score.liquidity + score.profitability + score.leverage + score.activity;
            assert!((sum - s).abs() <= 2, "composite {s} drifted to {sum}");
            assert!((0..=25).contains(&score.liquidity));
            assert!((0..=30).contains(&score.profitability));
            assert!((0..=25).contains(&score.leverage));
            assert!((0..=20).contains(&score.activity));
        }
    }

    #[test]
    fn shares_overflow_proportionally_above_100() {
        let score = HealthScore::from_composite(120);
        assert_eq!(score.liquidity, 30);
        assert_eq!(score.profitability, 36);
    }

    #[test]
    fn metric_lookup_respects_absent_categories() {
        let bundle = RatioBundle {
            profitability: Some(ProfitabilityRatios {
                roe: 15.2,
                roa: 2.8,
                npm: 8.5,
                gpm: 12.3,
            }),
            ..Default::default()
        };
        assert_eq!(bundle.metric("roe"), Some(15.2));
        assert_eq!(bundle.metric("currentRatio"), None);
        assert!(!bundle.has_category(RatioCategory::Liquidity));
        assert!(bundle.has_category(RatioCategory::Profitability));
    }
}
