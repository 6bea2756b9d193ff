//! Indian income-tax rules, RBI prepayment regulations, and bank constants.
//!
//! Covers the FY 2024-25 slab tables for both regimes, loan deductions
//! under sections 80C, 24(b), 80E and 80EEA, the old-vs-new regime
//! comparison, the RBI 2014 prepayment-penalty matrix, and the bank /
//! loan-type registries.

use crate::core::money::round_money;
use crate::tax::{Bank, LoanTaxInfo, TaxError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the two mutually exclusive income-tax regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Old => "old",
            Regime::New => "new",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Regime {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(Regime::Old),
            "new" => Ok(Regime::New),
            _ => Err(TaxError::InvalidRegime { value: s.to_string() }),
        }
    }
}

// ---------- RBI prepayment rules (2014 circular) ----------

/// RBI mandates zero prepayment penalty on floating-rate loans.
pub const FLOATING_RATE_PREPAYMENT_PENALTY: Decimal = Decimal::ZERO;

/// Prepayment penalty percentage by loan type and rate type.
///
/// Floating-rate loans are always penalty-free; unknown fixed/hybrid
/// combinations fall back to 2%.
pub fn prepayment_penalty(loan_type: &str, rate_type: &str) -> Decimal {
    if rate_type == "floating" {
        return FLOATING_RATE_PREPAYMENT_PENALTY;
    }
    match (loan_type, rate_type) {
        ("home", "fixed") => dec!(2.0),
        ("home", "hybrid") => dec!(1.5),
        ("personal", "fixed") => dec!(4.0),
        ("personal", "hybrid") => dec!(3.0),
        ("car", "fixed") => dec!(5.0),
        ("car", "hybrid") => dec!(2.5),
        ("education", "fixed") => dec!(1.0),
        ("education", "hybrid") => dec!(0.5),
        ("gold", "fixed") => dec!(1.0),
        ("gold", "hybrid") => dec!(0.5),
        ("credit_card", _) => Decimal::ZERO,
        _ => dec!(2.0),
    }
}

// ---------- Income-tax deductions ----------

/// Annual caps for the old-regime loan deductions. Section 80E carries no
/// cap (only an eight-year window, which is the caller's concern).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxDeductionLimits {
    /// Principal repayment, aggregate across loans.
    pub section_80c: Decimal,
    /// Home-loan interest on a self-occupied property.
    pub section_24b_self_occupied: Decimal,
    /// First-time-buyer interest incentive (2019-2022 sanctions).
    pub section_80eea: Decimal,
}

pub const OLD_REGIME_LIMITS: TaxDeductionLimits = TaxDeductionLimits {
    section_80c: dec!(150_000),
    section_24b_self_occupied: dec!(200_000),
    section_80eea: dec!(150_000),
};

/// FY 2024-25 old-regime slabs as (upper bound, marginal rate).
pub const OLD_REGIME_SLABS: [(Decimal, Decimal); 4] = [
    (dec!(250_000), Decimal::ZERO),
    (dec!(500_000), dec!(0.05)),
    (dec!(1_000_000), dec!(0.20)),
    (dec!(99_999_999), dec!(0.30)),
];

/// FY 2024-25 new-regime slabs as (upper bound, marginal rate).
pub const NEW_REGIME_SLABS: [(Decimal, Decimal); 6] = [
    (dec!(300_000), Decimal::ZERO),
    (dec!(700_000), dec!(0.05)),
    (dec!(1_000_000), dec!(0.10)),
    (dec!(1_200_000), dec!(0.15)),
    (dec!(1_500_000), dec!(0.20)),
    (dec!(99_999_999), dec!(0.30)),
];

/// Section-wise deduction totals for one assessment year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndiaDeductions {
    pub section_80c: Decimal,
    pub section_24b: Decimal,
    pub section_80e: Decimal,
    pub section_80eea: Decimal,
    pub total: Decimal,
}

/// Outcome of running one regime end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeOutcome {
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub deductions: IndiaDeductions,
}

/// Old-vs-new regime comparison with a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime: RegimeOutcome,
    pub new_regime: RegimeOutcome,
    pub recommended: Regime,
    /// Absolute tax difference between the two regimes.
    pub savings: Decimal,
}

/// Progressive slab tax: each slab taxes only the portion of income that
/// falls inside it, and evaluation stops once the income is exhausted.
pub fn slab_tax(income: Decimal, slabs: &[(Decimal, Decimal)]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut prev_limit = Decimal::ZERO;

    for (limit, rate) in slabs {
        if income <= prev_limit {
            break;
        }
        let taxable = income.min(*limit) - prev_limit;
        tax += taxable * rate;
        prev_limit = *limit;
    }

    round_money(tax)
}

/// Marginal tax bracket: the rate of the last slab the income reaches.
pub fn marginal_bracket(annual_income: Decimal, regime: Regime) -> Decimal {
    let slabs: &[(Decimal, Decimal)] = match regime {
        Regime::Old => &OLD_REGIME_SLABS,
        Regime::New => &NEW_REGIME_SLABS,
    };

    let mut bracket = Decimal::ZERO;
    let mut prev_limit = Decimal::ZERO;
    for (limit, rate) in slabs {
        if annual_income > prev_limit {
            bracket = *rate;
        }
        prev_limit = *limit;
    }
    bracket
}

/// Section-wise loan deductions for one year.
///
/// The new regime recognizes none of these — a deliberate simplification
/// reflecting its minimal-deduction character — and returns all zeros.
/// Under the old regime:
///
/// - 80C: principal repayment, capped at ₹1.5L aggregate.
/// - 24(b): home-loan interest; per-loan cap is ₹2L when self-occupied and
///   the raw interest otherwise, then the aggregate is capped at ₹2L.
/// - 80E: education-loan interest, uncapped.
/// - 80EEA: first-time-buyer interest, capped at ₹1.5L aggregate.
pub fn loan_deductions(loans: &[LoanTaxInfo], regime: Regime) -> IndiaDeductions {
    if regime == Regime::New {
        return IndiaDeductions::default();
    }

    let limits = OLD_REGIME_LIMITS;
    let mut total_80c = Decimal::ZERO;
    let mut total_24b = Decimal::ZERO;
    let mut total_80e = Decimal::ZERO;
    let mut total_80eea = Decimal::ZERO;

    for loan in loans {
        if loan.eligible_80c {
            total_80c += loan.annual_principal_paid;
        }
        if loan.eligible_24b {
            let cap = if loan.is_self_occupied {
                limits.section_24b_self_occupied
            } else {
                loan.annual_interest_paid
            };
            total_24b += loan.annual_interest_paid.min(cap);
        }
        if loan.eligible_80e {
            total_80e += loan.annual_interest_paid;
        }
        if loan.eligible_80eea {
            total_80eea += loan.annual_interest_paid;
        }
    }

    let section_80c = total_80c.min(limits.section_80c);
    let section_24b = total_24b.min(limits.section_24b_self_occupied);
    let section_80e = total_80e;
    let section_80eea = total_80eea.min(limits.section_80eea);

    IndiaDeductions {
        section_80c,
        section_24b,
        section_80e,
        section_80eea,
        total: section_80c + section_24b + section_80e + section_80eea,
    }
}

/// Run both regimes end to end (deductions → taxable income → tax) and
/// recommend whichever yields the lower tax.
pub fn compare_regimes(annual_income: Decimal, loans: &[LoanTaxInfo]) -> RegimeComparison {
    let old_deductions = loan_deductions(loans, Regime::Old);
    let old_taxable = (annual_income - old_deductions.total).max(Decimal::ZERO);
    let old_tax = slab_tax(old_taxable, &OLD_REGIME_SLABS);

    let new_deductions = loan_deductions(loans, Regime::New);
    let new_taxable = (annual_income - new_deductions.total).max(Decimal::ZERO);
    let new_tax = slab_tax(new_taxable, &NEW_REGIME_SLABS);

    let recommended = if old_tax <= new_tax { Regime::Old } else { Regime::New };
    let savings = (old_tax - new_tax).abs();

    RegimeComparison {
        old_regime: RegimeOutcome {
            taxable_income: old_taxable,
            tax: old_tax,
            deductions: old_deductions,
        },
        new_regime: RegimeOutcome {
            taxable_income: new_taxable,
            tax: new_tax,
            deductions: new_deductions,
        },
        recommended,
        savings,
    }
}

// ---------- Bank constants ----------

pub const INDIAN_BANKS: [Bank; 13] = [
    Bank { code: "SBI", full_name: "State Bank of India", clearing_prefix: Some("SBIN") },
    Bank { code: "HDFC", full_name: "HDFC Bank", clearing_prefix: Some("HDFC") },
    Bank { code: "ICICI", full_name: "ICICI Bank", clearing_prefix: Some("ICIC") },
    Bank { code: "AXIS", full_name: "Axis Bank", clearing_prefix: Some("UTIB") },
    Bank { code: "PNB", full_name: "Punjab National Bank", clearing_prefix: Some("PUNB") },
    Bank { code: "BOB", full_name: "Bank of Baroda", clearing_prefix: Some("BARB") },
    Bank { code: "KOTAK", full_name: "Kotak Mahindra Bank", clearing_prefix: Some("KKBK") },
    Bank { code: "CANARA", full_name: "Canara Bank", clearing_prefix: Some("CNRB") },
    Bank { code: "UNION", full_name: "Union Bank of India", clearing_prefix: Some("UBIN") },
    Bank { code: "IDBI", full_name: "IDBI Bank", clearing_prefix: Some("IBKL") },
    Bank { code: "BAJAJ", full_name: "Bajaj Finance", clearing_prefix: None },
    Bank { code: "TATA", full_name: "Tata Capital", clearing_prefix: None },
    Bank { code: "LIC_HFL", full_name: "LIC Housing Finance", clearing_prefix: None },
];

pub const LOAN_TYPES: [&str; 6] = ["home", "personal", "car", "education", "gold", "credit_card"];

pub const RATE_TYPES: [&str; 3] = ["floating", "fixed", "hybrid"];
