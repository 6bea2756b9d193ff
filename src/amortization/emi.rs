use crate::core::money::{monthly_rate, round_money};
use crate::amortization::schedule::generate_amortization;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::BTreeMap;

/// Calculate the equated monthly installment for a reducing-balance loan.
///
/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 1200`.
///
/// Non-positive principal or zero tenure is treated as "no loan" and yields
/// zero rather than an error. A zero rate degrades to straight division.
///
/// Verified against published lender tables:
/// ₹50,00,000 at 8.5% for 240 months ≈ ₹43,391 and
/// ₹10,00,000 at 12% for 60 months ≈ ₹22,244.
///
/// # Examples
///
/// ```
/// use repayment_engine::amortization::calculate_emi;
/// use rust_decimal_macros::dec;
///
/// let emi = calculate_emi(dec!(1_000_000), dec!(12), 60);
/// assert!((emi - dec!(22_244)).abs() <= dec!(1));
/// ```
pub fn calculate_emi(principal: Decimal, annual_rate: Decimal, tenure_months: u32) -> Decimal {
    if principal <= Decimal::ZERO || tenure_months == 0 {
        return Decimal::ZERO;
    }
    if annual_rate.is_zero() {
        return round_money(principal / Decimal::from(tenure_months));
    }

    let r = monthly_rate(annual_rate);
    let factor = (Decimal::ONE + r).powi(tenure_months as i64);
    round_money(principal * r * factor / (factor - Decimal::ONE))
}

/// Total interest paid over the loan's life with no prepayments:
/// `EMI * n - P`.
pub fn calculate_total_interest(principal: Decimal, annual_rate: Decimal, tenure_months: u32) -> Decimal {
    let emi = calculate_emi(principal, annual_rate, tenure_months);
    round_money(emi * Decimal::from(tenure_months) - principal)
}

/// Interest and months saved by prepaying, relative to the no-prepayment
/// baseline.
///
/// Returns `(interest_saved, months_saved)`. Both are zero when no
/// prepayments are supplied, modulo a rounding residue of at most a few
/// currency units that callers must tolerate.
pub fn calculate_interest_saved(
    principal: Decimal,
    annual_rate: Decimal,
    tenure_months: u32,
    monthly_prepayment: Decimal,
    lump_sums: &BTreeMap<u32, Decimal>,
) -> (Decimal, u32) {
    let baseline = calculate_total_interest(principal, annual_rate, tenure_months);
    let schedule = generate_amortization(
        principal,
        annual_rate,
        tenure_months,
        monthly_prepayment,
        lump_sums,
    );

    let Some(last) = schedule.last() else {
        return (Decimal::ZERO, 0);
    };

    let months_taken = schedule.len() as u32;
    (
        round_money(baseline - last.cumulative_interest),
        tenure_months - months_taken,
    )
}

/// Maximum borrowable principal for a given EMI budget: the closed-form
/// inverse of the EMI formula, `P = EMI * ((1+r)^n - 1) / (r * (1+r)^n)`.
///
/// Round-trip property: `calculate_emi(calculate_affordability(E, r, n), r, n)`
/// recovers `E` within one rounding step.
pub fn calculate_affordability(emi: Decimal, annual_rate: Decimal, tenure_months: u32) -> Decimal {
    if emi <= Decimal::ZERO || tenure_months == 0 {
        return Decimal::ZERO;
    }
    if annual_rate.is_zero() {
        return round_money(emi * Decimal::from(tenure_months));
    }

    let r = monthly_rate(annual_rate);
    let factor = (Decimal::ONE + r).powi(tenure_months as i64);
    round_money(emi * (factor - Decimal::ONE) / (r * factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_benchmark_home_loan() {
        // ₹50L at 8.5% over 20 years.
        let emi = calculate_emi(dec!(5_000_000), dec!(8.5), 240);
        assert!((emi - dec!(43_391)).abs() <= dec!(1), "got {emi}");
    }

    #[test]
    fn test_emi_benchmark_personal_loan() {
        // ₹10L at 12% over 5 years.
        let emi = calculate_emi(dec!(1_000_000), dec!(12), 60);
        assert!((emi - dec!(22_244)).abs() <= dec!(1), "got {emi}");
    }

    #[test]
    fn test_emi_zero_rate_is_straight_division() {
        assert_eq!(calculate_emi(dec!(120_000), Decimal::ZERO, 12), dec!(10_000));
    }

    #[test]
    fn test_emi_degenerate_inputs_yield_zero() {
        assert_eq!(calculate_emi(Decimal::ZERO, dec!(8.5), 240), Decimal::ZERO);
        assert_eq!(calculate_emi(dec!(-100), dec!(8.5), 240), Decimal::ZERO);
        assert_eq!(calculate_emi(dec!(100_000), dec!(8.5), 0), Decimal::ZERO);
    }

    #[test]
    fn test_emi_monotone_in_rate() {
        let low = calculate_emi(dec!(1_000_000), dec!(8), 120);
        let high = calculate_emi(dec!(1_000_000), dec!(12), 120);
        assert!(high > low);
    }

    #[test]
    fn test_emi_monotone_in_tenure() {
        let short = calculate_emi(dec!(1_000_000), dec!(10), 60);
        let long = calculate_emi(dec!(1_000_000), dec!(10), 120);
        assert!(short > long);
    }

    #[test]
    fn test_total_interest() {
        let total = calculate_total_interest(dec!(1_000_000), dec!(12), 60);
        let emi = calculate_emi(dec!(1_000_000), dec!(12), 60);
        assert_eq!(total, emi * dec!(60) - dec!(1_000_000));
        assert!(total > Decimal::ZERO);
    }

    #[test]
    fn test_interest_saved_zero_without_prepayment() {
        let (saved, months) = calculate_interest_saved(
            dec!(1_000_000),
            dec!(12),
            60,
            Decimal::ZERO,
            &BTreeMap::new(),
        );
        // Rounding residue only.
        assert!(saved.abs() <= dec!(1), "got {saved}");
        assert_eq!(months, 0);
    }

    #[test]
    fn test_interest_saved_with_prepayment() {
        let (saved, months) = calculate_interest_saved(
            dec!(1_000_000),
            dec!(12),
            60,
            dec!(5_000),
            &BTreeMap::new(),
        );
        assert!(saved > Decimal::ZERO);
        assert!(months > 0);
    }

    #[test]
    fn test_interest_saved_with_lump_sum() {
        let mut lumps = BTreeMap::new();
        lumps.insert(12, dec!(200_000));
        let (saved, months) =
            calculate_interest_saved(dec!(1_000_000), dec!(12), 60, Decimal::ZERO, &lumps);
        assert!(saved > Decimal::ZERO);
        assert!(months > 0);
    }

    #[test]
    fn test_affordability_round_trip() {
        let principal = calculate_affordability(dec!(30_000), dec!(9), 240);
        let emi = calculate_emi(principal, dec!(9), 240);
        assert!((emi - dec!(30_000)).abs() <= dec!(0.05), "got {emi}");
    }

    #[test]
    fn test_affordability_zero_rate() {
        assert_eq!(calculate_affordability(dec!(10_000), Decimal::ZERO, 12), dec!(120_000));
    }

    #[test]
    fn test_affordability_degenerate_inputs() {
        assert_eq!(calculate_affordability(Decimal::ZERO, dec!(9), 240), Decimal::ZERO);
        assert_eq!(calculate_affordability(dec!(-5), dec!(9), 240), Decimal::ZERO);
        assert_eq!(calculate_affordability(dec!(30_000), dec!(9), 0), Decimal::ZERO);
    }
}
