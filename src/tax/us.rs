//! US federal tax rules, loan deduction limits, and bank constants.
//!
//! Covers the 2024 bracket tables for all four filing statuses, the
//! standard-vs-itemized comparison, the $750K mortgage-interest principal
//! cap with proration, the $2,500 above-the-line student-loan cap, and the
//! bank / loan-type registries.

use crate::core::money::round_money;
use crate::tax::{Bank, LoanTaxInfo, TaxError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Federal filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedJointly => "married_jointly",
            FilingStatus::MarriedSeparately => "married_separately",
            FilingStatus::HeadOfHousehold => "head_of_household",
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(FilingStatus::Single),
            "married_jointly" => Ok(FilingStatus::MarriedJointly),
            "married_separately" => Ok(FilingStatus::MarriedSeparately),
            "head_of_household" => Ok(FilingStatus::HeadOfHousehold),
            _ => Err(TaxError::InvalidFilingStatus { value: s.to_string() }),
        }
    }
}

// ---------- Federal income-tax brackets (2024) ----------

const SINGLE_BRACKETS: [(Decimal, Decimal); 7] = [
    (dec!(11_600), dec!(0.10)),
    (dec!(47_150), dec!(0.12)),
    (dec!(100_525), dec!(0.22)),
    (dec!(191_950), dec!(0.24)),
    (dec!(243_725), dec!(0.32)),
    (dec!(609_350), dec!(0.35)),
    (dec!(99_999_999), dec!(0.37)),
];

const MARRIED_JOINTLY_BRACKETS: [(Decimal, Decimal); 7] = [
    (dec!(23_200), dec!(0.10)),
    (dec!(94_300), dec!(0.12)),
    (dec!(201_050), dec!(0.22)),
    (dec!(383_900), dec!(0.24)),
    (dec!(487_450), dec!(0.32)),
    (dec!(731_200), dec!(0.35)),
    (dec!(99_999_999), dec!(0.37)),
];

const MARRIED_SEPARATELY_BRACKETS: [(Decimal, Decimal); 7] = [
    (dec!(11_600), dec!(0.10)),
    (dec!(47_150), dec!(0.12)),
    (dec!(100_525), dec!(0.22)),
    (dec!(191_950), dec!(0.24)),
    (dec!(243_725), dec!(0.32)),
    (dec!(365_600), dec!(0.35)),
    (dec!(99_999_999), dec!(0.37)),
];

const HEAD_OF_HOUSEHOLD_BRACKETS: [(Decimal, Decimal); 7] = [
    (dec!(16_550), dec!(0.10)),
    (dec!(63_100), dec!(0.12)),
    (dec!(100_500), dec!(0.22)),
    (dec!(191_950), dec!(0.24)),
    (dec!(243_700), dec!(0.32)),
    (dec!(609_350), dec!(0.35)),
    (dec!(99_999_999), dec!(0.37)),
];

/// The seven-bracket table for a filing status.
pub fn brackets(status: FilingStatus) -> &'static [(Decimal, Decimal); 7] {
    match status {
        FilingStatus::Single => &SINGLE_BRACKETS,
        FilingStatus::MarriedJointly => &MARRIED_JOINTLY_BRACKETS,
        FilingStatus::MarriedSeparately => &MARRIED_SEPARATELY_BRACKETS,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_BRACKETS,
    }
}

/// 2024 standard deduction for a filing status.
pub fn standard_deduction(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single | FilingStatus::MarriedSeparately => dec!(14_600),
        FilingStatus::MarriedJointly => dec!(29_200),
        FilingStatus::HeadOfHousehold => dec!(21_900),
    }
}

// ---------- Loan-related deduction limits ----------

/// Mortgage interest is deductible on the first $750K of loan principal.
pub const MORTGAGE_INTEREST_PRINCIPAL_CAP: Decimal = dec!(750_000);
/// Student-loan interest deduction cap (above-the-line).
pub const STUDENT_LOAN_INTEREST_CAP: Decimal = dec!(2_500);

/// Loan deduction totals split by treatment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsDeductions {
    pub mortgage_interest: Decimal,
    pub student_loan_interest: Decimal,
    /// Mortgage interest counts toward itemizing.
    pub total_itemizable: Decimal,
    /// Student-loan interest applies regardless of the standard-vs-itemized
    /// choice.
    pub total_above_the_line: Decimal,
}

/// The taxpayer's choice between the two deduction paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionChoice {
    Standard,
    Itemized,
}

/// One deduction path evaluated end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionPath {
    pub deduction_amount: Decimal,
    pub above_the_line: Decimal,
    pub taxable_income: Decimal,
    pub tax: Decimal,
}

/// Standard-vs-itemized comparison with a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionComparison {
    pub standard: DeductionPath,
    pub itemized: DeductionPath,
    pub mortgage_interest: Decimal,
    pub other_itemized_deductions: Decimal,
    pub recommended: DeductionChoice,
    /// Absolute tax difference between the two paths.
    pub savings: Decimal,
}

/// Federal income tax on taxable income under progressive bracket rates.
pub fn tax_owed(income: Decimal, status: FilingStatus) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut prev_limit = Decimal::ZERO;

    for (limit, rate) in brackets(status) {
        if income <= prev_limit {
            break;
        }
        let taxable = income.min(*limit) - prev_limit;
        tax += taxable * rate;
        prev_limit = *limit;
    }

    round_money(tax)
}

/// Marginal tax bracket: the rate of the last bracket the income reaches.
pub fn marginal_bracket(annual_income: Decimal, status: FilingStatus) -> Decimal {
    let mut bracket = Decimal::ZERO;
    let mut prev_limit = Decimal::ZERO;
    for (limit, rate) in brackets(status) {
        if annual_income > prev_limit {
            bracket = *rate;
        }
        prev_limit = *limit;
    }
    bracket
}

/// Loan deduction totals under US rules.
///
/// Mortgage interest is prorated when the outstanding principal exceeds the
/// $750K cap: `deductible = interest * (cap / outstanding)`. Student-loan
/// interest is summed and flat-capped at $2,500.
pub fn loan_deductions(loans: &[LoanTaxInfo]) -> UsDeductions {
    let mut total_mortgage_interest = Decimal::ZERO;
    let mut total_student_loan_interest = Decimal::ZERO;

    for loan in loans {
        if loan.eligible_mortgage_deduction {
            let deductible = if loan.outstanding_principal > MORTGAGE_INTEREST_PRINCIPAL_CAP {
                let ratio = MORTGAGE_INTEREST_PRINCIPAL_CAP / loan.outstanding_principal;
                loan.annual_interest_paid * ratio
            } else {
                loan.annual_interest_paid
            };
            total_mortgage_interest += deductible;
        }
        if loan.eligible_student_loan_deduction {
            total_student_loan_interest += loan.annual_interest_paid;
        }
    }

    let mortgage_interest = round_money(total_mortgage_interest);
    let student_loan_interest = total_student_loan_interest.min(STUDENT_LOAN_INTEREST_CAP);

    UsDeductions {
        mortgage_interest,
        student_loan_interest,
        total_itemizable: mortgage_interest,
        total_above_the_line: student_loan_interest,
    }
}

/// Compare the standard deduction against itemizing with loan deductions.
///
/// The above-the-line student-loan deduction is subtracted from income
/// first; it benefits both paths equally. Each path then computes its own
/// taxable income and tax, and the lower tax wins.
pub fn compare_standard_vs_itemized(
    annual_income: Decimal,
    loans: &[LoanTaxInfo],
    status: FilingStatus,
    other_itemized_deductions: Decimal,
) -> DeductionComparison {
    let deductions = loan_deductions(loans);
    let above_the_line = deductions.total_above_the_line;
    let adjusted_income = (annual_income - above_the_line).max(Decimal::ZERO);

    let std_deduction = standard_deduction(status);
    let std_taxable = (adjusted_income - std_deduction).max(Decimal::ZERO);
    let std_tax = tax_owed(std_taxable, status);

    let total_itemized = deductions.total_itemizable + other_itemized_deductions;
    let item_taxable = (adjusted_income - total_itemized).max(Decimal::ZERO);
    let item_tax = tax_owed(item_taxable, status);

    let recommended = if std_tax <= item_tax {
        DeductionChoice::Standard
    } else {
        DeductionChoice::Itemized
    };

    DeductionComparison {
        standard: DeductionPath {
            deduction_amount: std_deduction,
            above_the_line,
            taxable_income: std_taxable,
            tax: std_tax,
        },
        itemized: DeductionPath {
            deduction_amount: total_itemized,
            above_the_line,
            taxable_income: item_taxable,
            tax: item_tax,
        },
        mortgage_interest: deductions.mortgage_interest,
        other_itemized_deductions,
        recommended,
        savings: (std_tax - item_tax).abs(),
    }
}

// ---------- Bank constants ----------

pub const US_BANKS: [Bank; 10] = [
    Bank { code: "CHASE", full_name: "JPMorgan Chase", clearing_prefix: Some("0210") },
    Bank { code: "BOA", full_name: "Bank of America", clearing_prefix: Some("0260") },
    Bank { code: "WELLS", full_name: "Wells Fargo", clearing_prefix: Some("1210") },
    Bank { code: "CITI", full_name: "Citibank", clearing_prefix: Some("0219") },
    Bank { code: "USB", full_name: "U.S. Bank", clearing_prefix: Some("0917") },
    Bank { code: "PNC", full_name: "PNC Financial Services", clearing_prefix: Some("0430") },
    Bank { code: "CAPONE", full_name: "Capital One", clearing_prefix: Some("0550") },
    Bank { code: "TD", full_name: "TD Bank", clearing_prefix: Some("0311") },
    Bank { code: "ALLY", full_name: "Ally Financial", clearing_prefix: Some("1240") },
    Bank { code: "SOFI", full_name: "SoFi", clearing_prefix: None },
];

pub const US_LOAN_TYPES: [&str; 6] = ["home", "personal", "car", "education", "business", "credit_card"];

pub const US_RATE_TYPES: [&str; 3] = ["fixed", "variable", "hybrid"];
