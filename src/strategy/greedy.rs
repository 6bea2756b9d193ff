use crate::core::loan::LoanSnapshot;
use crate::strategy::{allocate_in_order, Allocation, RepaymentStrategy};
use rust_decimal::Decimal;

/// Pay the highest-rate loan first. Saves the most interest.
///
/// Loans with equal rates keep their input order (the sort is stable).
#[derive(Debug)]
pub struct AvalancheStrategy;

impl RepaymentStrategy for AvalancheStrategy {
    fn name(&self) -> &'static str {
        "avalanche"
    }

    fn description(&self) -> &'static str {
        "Pay Least Interest — targets highest rate loan first"
    }

    fn allocate(&self, active_loans: &[LoanSnapshot], extra_budget: Decimal) -> Allocation {
        if active_loans.is_empty() || extra_budget <= Decimal::ZERO {
            return Allocation::new();
        }

        let mut ordered: Vec<&LoanSnapshot> = active_loans.iter().collect();
        ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
        allocate_in_order(ordered, extra_budget)
    }
}

/// Pay the smallest-balance loan first. Fastest psychological wins.
#[derive(Debug)]
pub struct SnowballStrategy;

impl RepaymentStrategy for SnowballStrategy {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn description(&self) -> &'static str {
        "Fastest Quick Wins — eliminates smallest loan first"
    }

    fn allocate(&self, active_loans: &[LoanSnapshot], extra_budget: Decimal) -> Allocation {
        if active_loans.is_empty() || extra_budget <= Decimal::ZERO {
            return Allocation::new();
        }

        let mut ordered: Vec<&LoanSnapshot> = active_loans.iter().collect();
        ordered.sort_by(|a, b| a.outstanding_principal.cmp(&b.outstanding_principal));
        allocate_in_order(ordered, extra_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn portfolio() -> Vec<LoanSnapshot> {
        vec![
            LoanSnapshot::new("home", dec!(2_000_000), dec!(8.5), dec!(20_000), 180),
            LoanSnapshot::new("personal", dec!(300_000), dec!(14), dec!(10_000), 36),
            LoanSnapshot::new("car", dec!(500_000), dec!(9.5), dec!(11_000), 60),
        ]
    }

    #[test]
    fn test_avalanche_targets_highest_rate() {
        let allocation = AvalancheStrategy.allocate(&portfolio(), dec!(50_000));
        // Personal at 14% absorbs everything.
        assert_eq!(allocation.len(), 1);
        assert_eq!(allocation["personal"], dec!(50_000));
    }

    #[test]
    fn test_avalanche_overflows_to_next_rate() {
        let allocation = AvalancheStrategy.allocate(&portfolio(), dec!(350_000));
        assert_eq!(allocation["personal"], dec!(300_000)); // capped at balance
        assert_eq!(allocation["car"], dec!(50_000)); // next-highest rate
    }

    #[test]
    fn test_avalanche_stable_on_rate_ties() {
        let loans = vec![
            LoanSnapshot::new("first", dec!(10_000), dec!(10), dec!(500), 24),
            LoanSnapshot::new("second", dec!(10_000), dec!(10), dec!(500), 24),
        ];
        let allocation = AvalancheStrategy.allocate(&loans, dec!(4_000));
        // Equal rates: input order wins.
        assert_eq!(allocation["first"], dec!(4_000));
        assert!(!allocation.contains_key("second"));
    }

    #[test]
    fn test_snowball_targets_smallest_balance() {
        let allocation = SnowballStrategy.allocate(&portfolio(), dec!(50_000));
        assert_eq!(allocation.len(), 1);
        assert_eq!(allocation["personal"], dec!(50_000));
    }

    #[test]
    fn test_snowball_overflow_order() {
        let allocation = SnowballStrategy.allocate(&portfolio(), dec!(400_000));
        assert_eq!(allocation["personal"], dec!(300_000));
        assert_eq!(allocation["car"], dec!(100_000));
        assert!(!allocation.contains_key("home"));
    }

    #[test]
    fn test_empty_inputs_yield_empty_allocation() {
        assert!(AvalancheStrategy.allocate(&[], dec!(10_000)).is_empty());
        assert!(AvalancheStrategy.allocate(&portfolio(), Decimal::ZERO).is_empty());
        assert!(SnowballStrategy.allocate(&portfolio(), dec!(-100)).is_empty());
    }

    #[test]
    fn test_budget_never_exceeded() {
        let allocation = AvalancheStrategy.allocate(&portfolio(), dec!(10_000_000));
        let total: Decimal = allocation.values().sum();
        // Total demand is 2.8M, well under the offered budget.
        assert_eq!(total, dec!(2_800_000));
        for loan in portfolio() {
            if let Some(paid) = allocation.get(&loan.loan_id) {
                assert!(*paid <= loan.outstanding_principal);
            }
        }
    }
}
