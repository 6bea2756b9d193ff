use crate::core::loan::LoanSnapshot;
use crate::core::money::monthly_rate;
use crate::strategy::{allocate_in_order, Allocation, RepaymentStrategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Iteration cap for the months-to-closure simulation.
const CLOSURE_SIM_CAP: u32 = 600;
/// Sentinel for "this loan can never close at its current EMI".
const NEVER_CLOSES: u32 = 999;
/// Loans within this many months of payoff jump the queue.
const QUICK_WIN_MONTHS: u32 = 3;
/// Weight applied to foreclosure charges when adjusting the effective rate.
const FORECLOSURE_WEIGHT: Decimal = dec!(0.1);
/// Partial tax leverage of principal-repayment (80C-style) deductions.
const PARTIAL_BENEFIT_FACTOR: Decimal = dec!(0.5);

/// Post-tax optimized allocation with quick wins.
///
/// Three signals combine:
///
/// 1. **Effective rate** — nominal rate minus the tax benefit at the
///    caller's marginal bracket. Interest deductions (24(b), 80E, US
///    mortgage or student-loan interest) earn the full `rate * bracket`
///    benefit; a principal-repayment deduction (80C) earns half. Loans
///    carrying foreclosure charges get `charges * 0.1` added back,
///    modeling the extra cost of early payoff.
/// 2. **Months to closure** — a bounded simulated paydown at the current
///    EMI, used only to spot nearly-done loans.
/// 3. **Quick-win bump** — loans within three months of closure move to
///    the front of the queue regardless of effective rate; the rest are
///    ordered by effective rate descending.
///
/// Unlike the other strategies this one produces annotated snapshot
/// *copies* (via [`SmartHybridStrategy::annotate`]) rather than mutating
/// caller-owned data, so concurrent allocation calls over shared snapshots
/// are safe by construction.
#[derive(Debug)]
pub struct SmartHybridStrategy {
    /// Caller's marginal tax bracket as a fraction, e.g. `0.30`.
    tax_bracket: Decimal,
}

impl SmartHybridStrategy {
    pub fn new(tax_bracket: Decimal) -> Self {
        Self { tax_bracket }
    }

    /// Post-tax effective interest rate for one loan.
    fn effective_rate(&self, loan: &LoanSnapshot) -> Decimal {
        let full_benefit = loan.eligible_24b
            || loan.eligible_80e
            || loan.eligible_mortgage_deduction
            || loan.eligible_student_loan_deduction;

        let tax_benefit_rate = if full_benefit {
            loan.interest_rate * self.tax_bracket
        } else if loan.eligible_80c {
            loan.interest_rate * self.tax_bracket * PARTIAL_BENEFIT_FACTOR
        } else {
            Decimal::ZERO
        };

        let mut effective = loan.interest_rate - tax_benefit_rate;
        if loan.foreclosure_charges_pct > Decimal::ZERO {
            effective += loan.foreclosure_charges_pct * FORECLOSURE_WEIGHT;
        }
        effective
    }

    /// Simulated months until payoff at the current EMI plus `extra_per_month`.
    ///
    /// Bounded at 600 iterations; returns 999 when the payment does not
    /// even cover the monthly interest.
    fn estimate_months_to_closure(&self, loan: &LoanSnapshot, extra_per_month: Decimal) -> u32 {
        let total_monthly = loan.emi_amount + extra_per_month;
        if total_monthly <= Decimal::ZERO {
            return NEVER_CLOSES;
        }

        let r = monthly_rate(loan.interest_rate);
        let mut balance = loan.outstanding_principal;
        let mut months = 0;

        while balance > Decimal::ZERO && months < CLOSURE_SIM_CAP {
            let interest = balance * r;
            let principal_paid = total_monthly - interest;
            if principal_paid <= Decimal::ZERO {
                return NEVER_CLOSES;
            }
            balance -= principal_paid;
            months += 1;
        }

        months
    }

    /// Pure annotation pass: returns copies of the snapshots with
    /// `effective_rate` and `months_to_closure` populated. The inputs are
    /// left untouched.
    pub fn annotate(&self, loans: &[LoanSnapshot]) -> Vec<LoanSnapshot> {
        loans
            .iter()
            .map(|loan| {
                let mut annotated = loan.clone();
                annotated.effective_rate = self.effective_rate(loan);
                annotated.months_to_closure = self.estimate_months_to_closure(loan, Decimal::ZERO);
                annotated
            })
            .collect()
    }
}

impl RepaymentStrategy for SmartHybridStrategy {
    fn name(&self) -> &'static str {
        "smart_hybrid"
    }

    fn description(&self) -> &'static str {
        "Smart Hybrid (Recommended) — post-tax optimized with quick wins"
    }

    fn allocate(&self, active_loans: &[LoanSnapshot], extra_budget: Decimal) -> Allocation {
        if active_loans.is_empty() || extra_budget <= Decimal::ZERO {
            return Allocation::new();
        }

        let mut annotated = self.annotate(active_loans);

        // Avalanche base layer on post-tax rates.
        annotated.sort_by(|a, b| b.effective_rate.cmp(&a.effective_rate));

        // Quick-win bump: nearly-closed loans jump the queue.
        let (quick_wins, others): (Vec<LoanSnapshot>, Vec<LoanSnapshot>) = annotated
            .into_iter()
            .partition(|l| l.months_to_closure <= QUICK_WIN_MONTHS);

        if !quick_wins.is_empty() {
            log::debug!(
                "smart_hybrid: {} quick-win loan(s) bumped ahead of rate ordering",
                quick_wins.len()
            );
        }

        allocate_in_order(quick_wins.iter().chain(others.iter()), extra_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> SmartHybridStrategy {
        SmartHybridStrategy::new(dec!(0.30))
    }

    #[test]
    fn test_effective_rate_home_loan_full_benefit() {
        // 8.5% with 24(b) at a 30% bracket: 8.5 - 2.55 = 5.95.
        let loan = LoanSnapshot::new("home", dec!(2_000_000), dec!(8.5), dec!(20_000), 180)
            .with_india_eligibility(false, true, false, false);
        let annotated = strategy().annotate(&[loan]);
        assert_eq!(annotated[0].effective_rate, dec!(5.95));
    }

    #[test]
    fn test_effective_rate_80c_half_benefit() {
        // 9% with only 80C: 9 - 9*0.30*0.5 = 7.65.
        let loan = LoanSnapshot::new("home", dec!(1_000_000), dec!(9), dec!(15_000), 120)
            .with_india_eligibility(true, false, false, false);
        let annotated = strategy().annotate(&[loan]);
        assert_eq!(annotated[0].effective_rate, dec!(7.65));
    }

    #[test]
    fn test_effective_rate_foreclosure_surcharge() {
        // No deductions, 2% foreclosure charge: 12 + 0.2 = 12.2.
        let loan = LoanSnapshot::new("personal", dec!(300_000), dec!(12), dec!(10_000), 36)
            .with_charges(Decimal::ZERO, dec!(2.0));
        let annotated = strategy().annotate(&[loan]);
        assert_eq!(annotated[0].effective_rate, dec!(12.2));
    }

    #[test]
    fn test_effective_rate_us_mortgage() {
        let loan = LoanSnapshot::new("home", dec!(400_000), dec!(7), dec!(3_000), 300)
            .with_us_eligibility(true, false);
        let annotated = strategy().annotate(&[loan]);
        assert_eq!(annotated[0].effective_rate, dec!(4.9));
    }

    #[test]
    fn test_annotate_does_not_mutate_inputs() {
        let loans = vec![LoanSnapshot::new("l", dec!(100_000), dec!(10), dec!(5_000), 24)];
        let _ = strategy().annotate(&loans);
        assert_eq!(loans[0].effective_rate, Decimal::ZERO);
        assert_eq!(loans[0].months_to_closure, 0);
    }

    #[test]
    fn test_months_to_closure_sentinel_when_emi_too_small() {
        // Monthly interest on 5L at 24% is 10,000; a 1,000 EMI never closes.
        let loan = LoanSnapshot::new("cc", dec!(500_000), dec!(24), dec!(1_000), 60);
        let annotated = strategy().annotate(&[loan]);
        assert_eq!(annotated[0].months_to_closure, 999);
    }

    #[test]
    fn test_months_to_closure_near_done_loan() {
        let loan = LoanSnapshot::new("almost", dec!(30_000), dec!(10), dec!(10_500), 4);
        let annotated = strategy().annotate(&[loan]);
        assert!(annotated[0].months_to_closure <= 3, "got {}", annotated[0].months_to_closure);
    }

    #[test]
    fn test_quick_win_bumped_ahead_of_higher_rate() {
        // "almost" closes in ~3 months at a modest rate; "expensive" has a
        // far higher effective rate but is nowhere near done.
        let almost = LoanSnapshot::new("almost", dec!(30_000), dec!(10), dec!(10_500), 4);
        let expensive = LoanSnapshot::new("expensive", dec!(500_000), dec!(18), dec!(15_000), 60);
        let allocation = strategy().allocate(&[expensive, almost], dec!(25_000));
        assert_eq!(allocation["almost"], dec!(25_000));
        assert!(!allocation.contains_key("expensive"));
    }

    #[test]
    fn test_rate_ordering_without_quick_wins() {
        let cheap = LoanSnapshot::new("home", dec!(2_000_000), dec!(8.5), dec!(20_000), 180)
            .with_india_eligibility(false, true, false, false); // effective 5.95
        let dear = LoanSnapshot::new("personal", dec!(300_000), dec!(14), dec!(10_000), 48);
        let allocation = strategy().allocate(&[cheap, dear], dec!(50_000));
        assert_eq!(allocation["personal"], dec!(50_000));
        assert!(!allocation.contains_key("home"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(strategy().allocate(&[], dec!(10_000)).is_empty());
        let loans = vec![LoanSnapshot::new("l", dec!(100_000), dec!(10), dec!(5_000), 24)];
        assert!(strategy().allocate(&loans, Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_allocation_capped_at_balance() {
        let loan = LoanSnapshot::new("small", dec!(5_000), dec!(10), dec!(500), 12);
        let allocation = strategy().allocate(&[loan], dec!(50_000));
        assert_eq!(allocation["small"], dec!(5_000));
    }
}
