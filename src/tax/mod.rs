//! Country-aware tax rules.
//!
//! A small dispatcher validates the country code and forwards bracket
//! lookups, loan-deduction calculations, and full tax-option comparisons
//! to the matching jurisdiction module. Supported jurisdictions:
//!
//! - `IN` (India) — [`india`]: old vs new regime slabs, sections 80C,
//!   24(b), 80E, 80EEA.
//! - `US` (United States) — [`us`]: filing-status brackets, standard vs
//!   itemized deductions, mortgage and student-loan interest.
//!
//! Every function here is referentially transparent: the only state is the
//! jurisdiction modules' constant tables.

pub mod india;
pub mod us;

use india::{IndiaDeductions, Regime, RegimeComparison};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use us::{DeductionComparison, FilingStatus, UsDeductions};

/// Country codes accepted by [`Country::parse`].
pub const SUPPORTED_COUNTRIES: [&str; 2] = ["IN", "US"];

/// Validation failures for categorical tax inputs.
///
/// These are hard errors by design: an unsupported country or an invalid
/// regime / filing status is a configuration mistake, not a data edge case,
/// and must never be silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    #[error("unsupported country '{code}'; must be one of: IN, US")]
    UnsupportedCountry { code: String },
    #[error("invalid tax regime '{value}'; must be one of: old, new")]
    InvalidRegime { value: String },
    #[error("invalid filing status '{value}'; must be one of: single, married_jointly, married_separately, head_of_household")]
    InvalidFilingStatus { value: String },
}

/// A supported tax jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    India,
    UnitedStates,
}

impl Country {
    /// Normalize and validate a country code.
    ///
    /// Matching is case- and whitespace-insensitive: `" in "` parses to
    /// [`Country::India`]. Anything outside the supported set fails with
    /// [`TaxError::UnsupportedCountry`].
    pub fn parse(code: &str) -> Result<Self, TaxError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(Country::India),
            "US" => Ok(Country::UnitedStates),
            _ => Err(TaxError::UnsupportedCountry {
                code: code.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::India => "IN",
            Country::UnitedStates => "US",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-call jurisdiction parameters.
///
/// Only the fields relevant to the chosen country are read: `regime` for
/// India, `filing_status` and `other_itemized_deductions` for the US.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxOptions {
    pub regime: Regime,
    pub filing_status: FilingStatus,
    /// Non-loan itemized deductions (SALT, charitable, medical) for the
    /// US standard-vs-itemized comparison.
    pub other_itemized_deductions: Decimal,
}

impl Default for TaxOptions {
    fn default() -> Self {
        Self {
            regime: Regime::Old,
            filing_status: FilingStatus::Single,
            other_itemized_deductions: Decimal::ZERO,
        }
    }
}

/// Tax-relevant facts about one loan, supplied by the caller per request.
///
/// One record carries both jurisdictions' eligibility flags; each module
/// reads only its own. `is_self_occupied` governs the section 24(b) cap,
/// `outstanding_principal` the US mortgage-interest proration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTaxInfo {
    #[serde(default)]
    pub loan_type: String,
    pub annual_interest_paid: Decimal,
    pub annual_principal_paid: Decimal,
    #[serde(default)]
    pub eligible_80c: bool,
    #[serde(default)]
    pub eligible_24b: bool,
    #[serde(default)]
    pub eligible_80e: bool,
    #[serde(default)]
    pub eligible_80eea: bool,
    #[serde(default = "default_self_occupied")]
    pub is_self_occupied: bool,
    #[serde(default)]
    pub eligible_mortgage_deduction: bool,
    #[serde(default)]
    pub eligible_student_loan_deduction: bool,
    #[serde(default)]
    pub outstanding_principal: Decimal,
}

fn default_self_occupied() -> bool {
    true
}

impl LoanTaxInfo {
    pub fn new(
        loan_type: impl Into<String>,
        annual_interest_paid: Decimal,
        annual_principal_paid: Decimal,
    ) -> Self {
        Self {
            loan_type: loan_type.into(),
            annual_interest_paid,
            annual_principal_paid,
            eligible_80c: false,
            eligible_24b: false,
            eligible_80e: false,
            eligible_80eea: false,
            is_self_occupied: true,
            eligible_mortgage_deduction: false,
            eligible_student_loan_deduction: false,
            outstanding_principal: Decimal::ZERO,
        }
    }
}

/// A bank registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub code: &'static str,
    pub full_name: &'static str,
    /// IFSC prefix (India) or routing-number prefix (US), where published.
    pub clearing_prefix: Option<&'static str>,
}

/// Country-wise loan deduction breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "country")]
pub enum LoanDeductions {
    India(IndiaDeductions),
    UnitedStates(UsDeductions),
}

/// Country-wise tax strategy comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "country")]
pub enum TaxComparison {
    India(RegimeComparison),
    UnitedStates(DeductionComparison),
}

/// Marginal tax bracket for a given income.
///
/// Returns the rate of the last slab the income reaches — a marginal rate,
/// not an effective/average rate. The Smart-Hybrid strategy relies on this
/// as its marginal-benefit proxy.
pub fn tax_bracket(country: &str, annual_income: Decimal, opts: &TaxOptions) -> Result<Decimal, TaxError> {
    match Country::parse(country)? {
        Country::India => Ok(india::marginal_bracket(annual_income, opts.regime)),
        Country::UnitedStates => Ok(us::marginal_bracket(annual_income, opts.filing_status)),
    }
}

/// Loan-related deductions under the country's rules.
pub fn loan_deductions(
    country: &str,
    loans: &[LoanTaxInfo],
    opts: &TaxOptions,
) -> Result<LoanDeductions, TaxError> {
    match Country::parse(country)? {
        Country::India => Ok(LoanDeductions::India(india::loan_deductions(loans, opts.regime))),
        Country::UnitedStates => Ok(LoanDeductions::UnitedStates(us::loan_deductions(loans))),
    }
}

/// Compare the country's mutually exclusive tax options end to end.
///
/// India: old vs new regime. US: standard vs itemized deduction.
pub fn compare_tax_options(
    country: &str,
    annual_income: Decimal,
    loans: &[LoanTaxInfo],
    opts: &TaxOptions,
) -> Result<TaxComparison, TaxError> {
    match Country::parse(country)? {
        Country::India => Ok(TaxComparison::India(india::compare_regimes(annual_income, loans))),
        Country::UnitedStates => Ok(TaxComparison::UnitedStates(us::compare_standard_vs_itemized(
            annual_income,
            loans,
            opts.filing_status,
            opts.other_itemized_deductions,
        ))),
    }
}

/// Static bank registry for a country.
pub fn banks(country: &str) -> Result<&'static [Bank], TaxError> {
    match Country::parse(country)? {
        Country::India => Ok(&india::INDIAN_BANKS),
        Country::UnitedStates => Ok(&us::US_BANKS),
    }
}

/// Supported loan types for a country.
pub fn loan_types(country: &str) -> Result<&'static [&'static str], TaxError> {
    match Country::parse(country)? {
        Country::India => Ok(&india::LOAN_TYPES),
        Country::UnitedStates => Ok(&us::US_LOAN_TYPES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_country_parse_normalizes() {
        assert_eq!(Country::parse("in").unwrap(), Country::India);
        assert_eq!(Country::parse("  US ").unwrap(), Country::UnitedStates);
        assert_eq!(Country::parse("iN").unwrap(), Country::India);
    }

    #[test]
    fn test_country_parse_rejects_unknown() {
        let err = Country::parse("UK").unwrap_err();
        assert_eq!(err, TaxError::UnsupportedCountry { code: "UK".into() });
        let msg = err.to_string();
        assert!(msg.contains("UK"));
        assert!(msg.contains("IN, US"));
    }

    #[test]
    fn test_dispatch_bracket_india() {
        let bracket = tax_bracket("IN", dec!(1_200_000), &TaxOptions::default()).unwrap();
        assert_eq!(bracket, dec!(0.30));
    }

    #[test]
    fn test_dispatch_bracket_us() {
        let opts = TaxOptions {
            filing_status: FilingStatus::Single,
            ..TaxOptions::default()
        };
        let bracket = tax_bracket("US", dec!(100_000), &opts).unwrap();
        assert_eq!(bracket, dec!(0.22));
    }

    #[test]
    fn test_dispatch_rejects_unknown_country() {
        assert!(tax_bracket("FR", dec!(50_000), &TaxOptions::default()).is_err());
        assert!(loan_deductions("FR", &[], &TaxOptions::default()).is_err());
        assert!(compare_tax_options("FR", dec!(50_000), &[], &TaxOptions::default()).is_err());
        assert!(banks("FR").is_err());
        assert!(loan_types("FR").is_err());
    }

    #[test]
    fn test_registries_dispatch() {
        assert!(banks("IN").unwrap().iter().any(|b| b.code == "SBI"));
        assert!(banks("US").unwrap().iter().any(|b| b.code == "CHASE"));
        assert!(loan_types("IN").unwrap().contains(&"gold"));
        assert!(loan_types("US").unwrap().contains(&"business"));
    }
}
