use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// The smallest representable currency unit (one paisa / one cent).
pub const MINOR_UNIT: Decimal = dec!(0.01);

/// Round a monetary amount to two fractional digits, half-up.
///
/// All intermediate rate and ratio arithmetic stays at full `Decimal`
/// precision; this is the single final rounding step applied to anything
/// that leaves the engine as money.
///
/// # Examples
///
/// ```
/// use repayment_engine::core::money::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(43391.165)), dec!(43391.17));
/// assert_eq!(round_money(dec!(22244.444)), dec!(22244.44));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an annual percentage rate into a monthly fractional rate.
///
/// `8.5` (percent per year) becomes `8.5 / 1200` (fraction per month).
pub fn monthly_rate(annual_rate_pct: Decimal) -> Decimal {
    annual_rate_pct / dec!(1200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_round_is_idempotent() {
        let v = round_money(dec!(99.999));
        assert_eq!(round_money(v), v);
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }
}
