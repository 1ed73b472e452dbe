//! Industry average aggregation
//!
//! Arithmetic mean per metric over a sector's resolved ratio bundles.
//! Sectors too small for a meaningful average, or with nothing resolvable,
//! fall back to fixed per-sector defaults.

use ratio_core::{IndustryAverage, RatioBundle, RatioCategory};
use std::collections::HashMap;

use crate::comparison::category_metrics;

/// Average a sector's ratios across its member companies.
///
/// `total_in_sector` is the registry count for the sector; `bundles` are
/// the ratio sets that actually resolved (fetch failures are simply not
/// passed in). Fewer than two registered companies, or zero resolvable
/// metrics, yields the sector's default table.
pub fn industry_average(
    sector: &str,
    total_in_sector: usize,
    bundles: &[RatioBundle],
) -> IndustryAverage {
    if total_in_sector < 2 {
        return default_industry_average(sector);
    }

    let mut sums: HashMap<&'static str, (f64, usize)> = HashMap::new();
    let mut successful = 0usize;

    for bundle in bundles {
        let mut contributed = false;
        for category in RatioCategory::ALL {
            for metric in category_metrics(category) {
                if let Some(value) = bundle.metric(metric.key) {
                    let entry = sums.entry(metric.industry_key).or_insert((0.0, 0));
                    entry.0 += value;
                    entry.1 += 1;
                    contributed = true;
                }
            }
        }
        if contributed {
            successful += 1;
        }
    }

    if sums.is_empty() {
        return default_industry_average(sector);
    }

    let averages = sums
        .into_iter()
        .map(|(key, (sum, count))| (key.to_string(), sum / count as f64))
        .collect();

    IndustryAverage {
        sector: sector.to_string(),
        total_companies_in_sector: total_in_sector,
        successful_calculations: successful,
        averages,
    }
}

fn default_industry_average(sector: &str) -> IndustryAverage {
    let (total, entries): (usize, &[(&str, f64)]) = match sector {
        "Banking" => (4, &[("average_roe", 16.5), ("average_roa", 2.2)]),
        "Telecommunications" => (
            2,
            &[
                ("average_current_ratio", 1.3),
                ("average_roe", 16.8),
                ("average_roa", 7.5),
                ("average_der", 0.65),
                ("average_asset_turnover", 0.55),
            ],
        ),
        "Consumer Goods" => (
            3,
            &[
                ("average_current_ratio", 1.6),
                ("average_roe", 22.3),
                ("average_roa", 11.2),
                ("average_der", 0.52),
                ("average_inventory_turnover", 6.8),
            ],
        ),
        _ => (
            1,
            &[
                ("average_current_ratio", 1.4),
                ("average_roe", 15.0),
                ("average_roa", 8.0),
                ("average_der", 0.6),
                ("average_asset_turnover", 0.8),
            ],
        ),
    };

    IndustryAverage {
        sector: sector.to_string(),
        total_companies_in_sector: total,
        successful_calculations: 0,
        averages: entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratio_core::ProfitabilityRatios;

    fn profitability(roe: f64, roa: f64) -> RatioBundle {
        RatioBundle {
            profitability: Some(ProfitabilityRatios {
                roe,
                roa,
                npm: 0.0,
                gpm: 0.0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn averages_are_plain_means() {
        let bundles = [profitability(10.0, 2.0), profitability(20.0, 4.0)];
        let avg = industry_average("Cement", 2, &bundles);

        assert_eq!(avg.averages["average_roe"], 15.0);
        assert_eq!(avg.averages["average_roa"], 3.0);
        assert_eq!(avg.total_companies_in_sector, 2);
        assert_eq!(avg.successful_calculations, 2);
    }

    #[test]
    fn single_company_sectors_use_defaults() {
        let avg = industry_average("Tobacco", 1, &[profitability(30.0, 9.0)]);
        assert_eq!(avg.averages["average_roe"], 15.0);
        assert_eq!(avg.successful_calculations, 0);
    }

    #[test]
    fn sector_with_no_resolved_bundles_uses_its_default_table() {
        let avg = industry_average("Consumer Goods", 3, &[]);
        assert_eq!(avg.averages["average_roe"], 22.3);
        assert_eq!(avg.averages["average_inventory_turnover"], 6.8);
        assert_eq!(avg.total_companies_in_sector, 3);
    }

    #[test]
    fn empty_bundles_do_not_count_as_successful() {
        let bundles = [profitability(10.0, 2.0), RatioBundle::default()];
        let avg = industry_average("Cement", 2, &bundles);
        assert_eq!(avg.successful_calculations, 1);
        assert_eq!(avg.averages["average_roe"], 10.0);
    }
}
