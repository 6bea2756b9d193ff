use crate::amortization::emi::calculate_emi;
use crate::core::money::{monthly_rate, round_money};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lower bound of the bisection bracket, in annual percent.
const RATE_LOW: Decimal = dec!(0.01);
/// Upper bound of the bisection bracket, in annual percent.
const RATE_HIGH: Decimal = dec!(50.0);
/// Iteration budget for the bisection search.
const MAX_ITERATIONS: u32 = 100;

/// Solve for the annual rate that produces a given EMI, by bisection.
///
/// "I can pay 22,000/month for 5 years on 10L — what rate is that?"
///
/// The EMI is strictly increasing in the rate, so bisection over
/// [0.01%, 50%] converges. This is a **bounded-iteration approximation**,
/// not a guaranteed-converged root: after 100 iterations the midpoint of
/// the final bracket is returned even if `precision` was never met. It
/// never fails.
pub fn reverse_emi_rate(
    principal: Decimal,
    emi: Decimal,
    tenure_months: u32,
    precision: Decimal,
) -> Decimal {
    let mut low = RATE_LOW;
    let mut high = RATE_HIGH;
    let mut mid = (low + high) / dec!(2);

    for _ in 0..MAX_ITERATIONS {
        mid = (low + high) / dec!(2);
        let candidate = calculate_emi(principal, mid, tenure_months);

        if (candidate - emi).abs() <= precision {
            break;
        }
        if candidate < emi {
            low = mid;
        } else {
            high = mid;
        }
    }

    round_money(mid)
}

/// Solve for the tenure (in whole months) given an EMI and rate, via the
/// closed form `n = log(EMI / (EMI - P*r)) / log(1 + r)`.
///
/// The logarithm is evaluated in `f64` — an intentional precision tradeoff,
/// acceptable because the result is rounded to an integer month count.
///
/// Returns `0` as an infeasibility sentinel when the monthly interest alone
/// meets or exceeds the EMI: such a loan can never be paid off. A zero rate
/// degrades to straight division, truncated to whole months.
pub fn reverse_emi_tenure(principal: Decimal, emi: Decimal, annual_rate: Decimal) -> u32 {
    if annual_rate.is_zero() {
        if emi <= Decimal::ZERO {
            return 0;
        }
        return (principal / emi).trunc().to_u32().unwrap_or(0);
    }

    let r = monthly_rate(annual_rate);
    let denominator = emi - principal * r;
    if denominator <= Decimal::ZERO {
        return 0; // EMI too small to ever pay off.
    }

    let ratio = (emi / denominator).to_f64().unwrap_or(0.0);
    let growth = (Decimal::ONE + r).to_f64().unwrap_or(1.0);
    if ratio <= 0.0 || growth <= 1.0 {
        return 0;
    }

    let n = ratio.ln() / growth.ln();
    (n.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_rate_recovers_known_rate() {
        let emi = calculate_emi(dec!(1_000_000), dec!(12), 60);
        let rate = reverse_emi_rate(dec!(1_000_000), emi, 60, dec!(0.01));
        assert!((rate - dec!(12)).abs() <= dec!(0.05), "got {rate}");
    }

    #[test]
    fn test_reverse_rate_home_loan() {
        let emi = calculate_emi(dec!(5_000_000), dec!(8.5), 240);
        let rate = reverse_emi_rate(dec!(5_000_000), emi, 240, dec!(0.01));
        assert!((rate - dec!(8.5)).abs() <= dec!(0.05), "got {rate}");
    }

    #[test]
    fn test_reverse_rate_returns_estimate_when_unreachable() {
        // EMI below any rate in the bracket: the iteration budget is
        // exhausted and the final midpoint comes back, never a failure.
        let rate = reverse_emi_rate(dec!(1_000_000), dec!(1), 60, dec!(0.01));
        assert!(rate >= RATE_LOW && rate <= RATE_HIGH);
    }

    #[test]
    fn test_reverse_tenure_closed_form() {
        // ₹50L at 8.5% with a ₹50,000 EMI.
        let months = reverse_emi_tenure(dec!(5_000_000), dec!(50_000), dec!(8.5));
        assert_eq!(months, 175);
    }

    #[test]
    fn test_reverse_tenure_consistent_with_emi() {
        let emi = calculate_emi(dec!(1_000_000), dec!(12), 60);
        let months = reverse_emi_tenure(dec!(1_000_000), emi, dec!(12));
        assert!((59..=61).contains(&months), "got {months}");
    }

    #[test]
    fn test_reverse_tenure_infeasible_sentinel() {
        // Monthly interest on ₹50L at 12% is ₹50,000 — a ₹40,000 EMI never closes.
        assert_eq!(reverse_emi_tenure(dec!(5_000_000), dec!(40_000), dec!(12)), 0);
    }

    #[test]
    fn test_reverse_tenure_zero_rate() {
        assert_eq!(reverse_emi_tenure(dec!(120_000), dec!(10_000), Decimal::ZERO), 12);
        assert_eq!(reverse_emi_tenure(dec!(125_000), dec!(10_000), Decimal::ZERO), 12);
        assert_eq!(reverse_emi_tenure(dec!(120_000), Decimal::ZERO, Decimal::ZERO), 0);
    }
}
