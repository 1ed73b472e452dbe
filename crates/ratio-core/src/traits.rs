use crate::{AnalysisError, CompanyInfo, CompanyRatios, SectorSummary, TrendPoint};
use async_trait::async_trait;

/// Source of company registry data, financial ratios and trend series.
/// The api-server and the analysis layer depend on this seam so they can
/// be exercised against a stub provider in tests.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn companies(&self) -> Vec<CompanyInfo>;

    fn company_info(&self, ticker: &str) -> Option<CompanyInfo>;

    fn sectors_summary(&self) -> Vec<SectorSummary>;

    async fn calculate_ratios(&self, ticker: &str) -> Result<CompanyRatios, AnalysisError>;

    async fn trend_series(
        &self,
        ticker: &str,
        periods: usize,
    ) -> Result<Vec<TrendPoint>, AnalysisError>;
}
