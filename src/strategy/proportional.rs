use crate::core::loan::LoanSnapshot;
use crate::strategy::{Allocation, RepaymentStrategy};
use rust_decimal::{Decimal, RoundingStrategy};

/// Distribute the budget pro-rata by outstanding balance.
///
/// Each loan's share is `budget * balance / total_balance`, truncated to
/// two decimals and capped at the loan's balance. The truncation remainder
/// is then swept over the loans in descending balance order, each taking
/// what its remaining capacity allows, so whenever total demand covers the
/// budget the allocation sums to the budget exactly.
#[derive(Debug)]
pub struct ProportionalStrategy;

impl RepaymentStrategy for ProportionalStrategy {
    fn name(&self) -> &'static str {
        "proportional"
    }

    fn description(&self) -> &'static str {
        "Balanced — distributes extra payment across all loans"
    }

    fn allocate(&self, active_loans: &[LoanSnapshot], extra_budget: Decimal) -> Allocation {
        if active_loans.is_empty() || extra_budget <= Decimal::ZERO {
            return Allocation::new();
        }

        let total_balance: Decimal = active_loans
            .iter()
            .filter(|l| l.outstanding_principal > Decimal::ZERO)
            .map(|l| l.outstanding_principal)
            .sum();
        if total_balance <= Decimal::ZERO {
            return Allocation::new();
        }

        let mut allocation = Allocation::new();
        let mut allocated = Decimal::ZERO;

        for loan in active_loans {
            if loan.outstanding_principal <= Decimal::ZERO {
                continue;
            }
            // Truncate rather than round half-up so the shares can never
            // overshoot the budget; the remainder is reconciled below.
            let share = (extra_budget * loan.outstanding_principal / total_balance)
                .round_dp_with_strategy(2, RoundingStrategy::ToZero);
            let capped = share.min(loan.outstanding_principal);
            if capped > Decimal::ZERO {
                allocation.insert(loan.loan_id.clone(), capped);
                allocated += capped;
            }
        }

        let mut remainder = extra_budget - allocated;
        if remainder > Decimal::ZERO {
            let mut by_balance: Vec<&LoanSnapshot> = active_loans
                .iter()
                .filter(|l| l.outstanding_principal > Decimal::ZERO)
                .collect();
            by_balance.sort_by(|a, b| b.outstanding_principal.cmp(&a.outstanding_principal));

            for loan in by_balance {
                if remainder <= Decimal::ZERO {
                    break;
                }
                let current = allocation
                    .get(&loan.loan_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let headroom = loan.outstanding_principal - current;
                let top_up = remainder.min(headroom);
                if top_up > Decimal::ZERO {
                    allocation.insert(loan.loan_id.clone(), current + top_up);
                    remainder -= top_up;
                }
            }
        }

        allocation
    }
}
