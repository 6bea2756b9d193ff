use crate::amortization::emi::calculate_emi;
use crate::core::money::{monthly_rate, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One month of an amortization schedule.
///
/// Entries are immutable once produced. `balance` is the post-payment
/// balance and never goes negative; the cumulative fields are
/// monotonically non-decreasing across the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month number.
    pub month: u32,
    /// EMI actually paid this month (reduced on the final month).
    pub emi: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    pub balance: Decimal,
    pub prepayment: Decimal,
    pub cumulative_interest: Decimal,
    pub cumulative_principal: Decimal,
}

/// Generate a full amortization schedule with optional prepayments.
///
/// `monthly_prepayment` is a flat extra amount applied every month;
/// `lump_sums` is a sparse map of month number to one-off amounts. Months
/// absent from the map contribute nothing beyond the flat prepayment.
/// Prepayments are capped so the balance never goes negative, and the
/// schedule ends as soon as the balance reaches zero — early exit is the
/// expected path whenever prepayments are present.
///
/// Degenerate inputs (non-positive principal, zero tenure) yield an empty
/// schedule.
///
/// # Examples
///
/// ```
/// use repayment_engine::amortization::generate_amortization;
/// use rust_decimal_macros::dec;
/// use std::collections::BTreeMap;
///
/// let schedule = generate_amortization(dec!(1_000_000), dec!(12), 60, dec!(5_000), &BTreeMap::new());
/// assert!(schedule.len() < 60);
/// assert_eq!(schedule.last().unwrap().balance, rust_decimal::Decimal::ZERO);
/// ```
pub fn generate_amortization(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
    monthly_prepayment: Decimal,
    lump_sums: &BTreeMap<u32, Decimal>,
) -> Vec<AmortizationEntry> {
    if principal <= Decimal::ZERO || tenure_months == 0 {
        return Vec::new();
    }

    let emi = calculate_emi(principal, annual_rate, tenure_months);
    let r = if annual_rate > Decimal::ZERO {
        monthly_rate(annual_rate)
    } else {
        Decimal::ZERO
    };

    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;
    let mut schedule = Vec::new();

    for month in 1..=tenure_months {
        if balance <= Decimal::ZERO {
            break;
        }

        let interest = round_money(balance * r);
        let mut principal_portion = emi - interest;

        // Final month: the last EMI shrinks rather than overpaying.
        let emi_this_month = if principal_portion > balance {
            principal_portion = balance;
            principal_portion + interest
        } else {
            emi
        };

        balance -= principal_portion;

        let requested = monthly_prepayment + lump_sums.get(&month).copied().unwrap_or(Decimal::ZERO);
        let prepayment = if requested > Decimal::ZERO {
            let applied = requested.min(balance);
            balance -= applied;
            applied
        } else {
            Decimal::ZERO
        };

        cumulative_interest += interest;
        cumulative_principal += principal_portion + prepayment;

        schedule.push(AmortizationEntry {
            month,
            emi: emi_this_month,
            principal_portion,
            interest_portion: interest,
            balance: balance.max(Decimal::ZERO),
            prepayment,
            cumulative_interest,
            cumulative_principal,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    log::debug!(
        "amortization: principal={} rate={} tenure={} -> {} rows",
        principal,
        annual_rate,
        tenure_months,
        schedule.len()
    );

    schedule
}
