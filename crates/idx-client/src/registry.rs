//! IDX company registry
//!
//! The fixed set of covered Indonesian listed companies with their
//! sectors. Lookup order is registry order everywhere so list responses
//! stay stable.

use ratio_core::{CompanyInfo, SectorCompany, SectorSummary};

pub(crate) const COMPANIES: &[(&str, &str, &str)] = &[
    ("BBCA.JK", "Bank Central Asia Tbk", "Banking"),
    ("BMRI.JK", "Bank Mandiri (Persero) Tbk", "Banking"),
    ("BBRI.JK", "Bank Rakyat Indonesia (Persero) Tbk", "Banking"),
    ("BBNI.JK", "Bank Negara Indonesia (Persero) Tbk", "Banking"),
    ("TLKM.JK", "Telkom Indonesia (Persero) Tbk", "Telecommunications"),
    ("UNVR.JK", "Unilever Indonesia Tbk", "Consumer Goods"),
    ("ASII.JK", "Astra International Tbk", "Automotive"),
    ("INTP.JK", "Indocement Tunggal Prakarsa Tbk", "Cement"),
    ("SMGR.JK", "Semen Indonesia (Persero) Tbk", "Cement"),
    ("ICBP.JK", "Indofood CBP Sukses Makmur Tbk", "Food & Beverages"),
    ("INDF.JK", "Indofood Sukses Makmur Tbk", "Food & Beverages"),
    ("KLBF.JK", "Kalbe Farma Tbk", "Pharmaceuticals"),
    ("GGRM.JK", "Gudang Garam Tbk", "Tobacco"),
    ("HMSP.JK", "HM Sampoerna Tbk", "Tobacco"),
    ("PTBA.JK", "Bukit Asam (Persero) Tbk", "Mining"),
    ("PGAS.JK", "Perusahaan Gas Negara (Persero) Tbk", "Oil & Gas"),
    ("JSMR.JK", "Jasa Marga (Persero) Tbk", "Infrastructure"),
    ("ADRO.JK", "Adaro Energy Tbk", "Mining"),
    ("LPPF.JK", "Matahari Department Store Tbk", "Retail"),
    ("MAPI.JK", "Mitra Adiperkasa Tbk", "Retail"),
];

pub fn companies() -> Vec<CompanyInfo> {
    COMPANIES
        .iter()
        .map(|(ticker, name, sector)| CompanyInfo {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        })
        .collect()
}

pub fn company_info(ticker: &str) -> Option<CompanyInfo> {
    COMPANIES
        .iter()
        .find(|(t, _, _)| *t == ticker)
        .map(|(ticker, name, sector)| CompanyInfo {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        })
}

/// Group the registry by sector, first-appearance order.
pub fn sectors_summary() -> Vec<SectorSummary> {
    let mut sectors: Vec<SectorSummary> = Vec::new();

    for (ticker, name, sector) in COMPANIES {
        let company = SectorCompany {
            ticker: ticker.to_string(),
            name: name.to_string(),
        };
        match sectors.iter_mut().find(|s| s.name == *sector) {
            Some(summary) => {
                summary.companies.push(company);
                summary.total_companies += 1;
            }
            None => sectors.push(SectorSummary {
                name: sector.to_string(),
                companies: vec![company],
                total_companies: 1,
            }),
        }
    }

    sectors
}
