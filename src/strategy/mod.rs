//! Repayment strategies for multi-loan optimization.
//!
//! Four strategies compete for a monthly extra-payment budget:
//!
//! - **Avalanche** — highest interest rate first (least total interest).
//! - **Snowball** — smallest balance first (fastest psychological wins).
//! - **Proportional** — pro-rata by outstanding balance.
//! - **Smart-Hybrid** — post-tax effective rates with a quick-win bump and
//!   foreclosure awareness.
//!
//! A caller builds a portfolio of [`LoanSnapshot`]s, resolves a strategy by
//! name, and calls [`RepaymentStrategy::allocate`] once per simulated month,
//! carrying balances forward with the amortization engine.

pub mod greedy;
pub mod proportional;
pub mod smart_hybrid;

use crate::core::loan::LoanSnapshot;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

pub use greedy::{AvalancheStrategy, SnowballStrategy};
pub use proportional::ProportionalStrategy;
pub use smart_hybrid::SmartHybridStrategy;

/// Extra-payment allocation for one month, keyed by loan id.
pub type Allocation = BTreeMap<String, Decimal>;

/// The fixed set of strategy identifiers accepted by [`strategy_for`].
pub const STRATEGY_NAMES: [&str; 4] = ["avalanche", "snowball", "smart_hybrid", "proportional"];

/// Lookup failures for strategy resolution.
///
/// The strategy set is a closed enumeration, not a plugin system; an
/// unknown name is a configuration error and fails loudly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("unknown strategy '{name}'; must be one of: avalanche, snowball, smart_hybrid, proportional")]
    UnknownStrategy { name: String },
}

/// A repayment strategy: allocates an extra-payment budget across the
/// active loans of a portfolio.
///
/// Implementations are pure: they never mutate the snapshots they receive
/// and hold no state across calls. Every strategy returns an empty
/// allocation when given no active loans or a non-positive budget, and
/// never allocates more than a loan's outstanding balance or more than the
/// budget in total.
pub trait RepaymentStrategy: std::fmt::Debug {
    /// Stable identifier, one of [`STRATEGY_NAMES`].
    fn name(&self) -> &'static str;

    /// Human-readable one-liner for UIs.
    fn description(&self) -> &'static str;

    /// Allocate `extra_budget` across `active_loans` for one month.
    fn allocate(&self, active_loans: &[LoanSnapshot], extra_budget: Decimal) -> Allocation;
}

/// Resolve a strategy by name.
///
/// `tax_bracket` is the caller's marginal rate as a fraction (e.g. `0.30`)
/// and only influences Smart-Hybrid; the other strategies ignore it.
pub fn strategy_for(name: &str, tax_bracket: Decimal) -> Result<Box<dyn RepaymentStrategy>, StrategyError> {
    match name {
        "avalanche" => Ok(Box::new(AvalancheStrategy)),
        "snowball" => Ok(Box::new(SnowballStrategy)),
        "smart_hybrid" => Ok(Box::new(SmartHybridStrategy::new(tax_bracket))),
        "proportional" => Ok(Box::new(ProportionalStrategy)),
        _ => Err(StrategyError::UnknownStrategy { name: name.to_string() }),
    }
}

/// Greedy cap-at-balance allocation over an already-ordered loan sequence.
///
/// Shared by Avalanche, Snowball and Smart-Hybrid: walk the loans in
/// priority order, giving each as much of the remaining budget as its
/// outstanding balance can absorb.
pub(crate) fn allocate_in_order<'a, I>(loans_in_order: I, extra_budget: Decimal) -> Allocation
where
    I: IntoIterator<Item = &'a LoanSnapshot>,
{
    let mut allocation = Allocation::new();
    let mut remaining = extra_budget;

    for loan in loans_in_order {
        if remaining <= Decimal::ZERO {
            break;
        }
        let payment = remaining.min(loan.outstanding_principal);
        if payment > Decimal::ZERO {
            allocation.insert(loan.loan_id.clone(), payment);
            remaining -= payment;
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_factory_resolves_all_names() {
        for name in STRATEGY_NAMES {
            let strategy = strategy_for(name, dec!(0.30)).unwrap();
            assert_eq!(strategy.name(), name);
            assert!(!strategy.description().is_empty());
        }
    }

    #[test]
    fn test_factory_rejects_unknown_name() {
        let err = strategy_for("debt_blizzard", dec!(0.30)).unwrap_err();
        assert_eq!(err, StrategyError::UnknownStrategy { name: "debt_blizzard".into() });
        let msg = err.to_string();
        assert!(msg.contains("debt_blizzard"));
        assert!(msg.contains("avalanche"));
    }

    #[test]
    fn test_allocate_in_order_respects_budget_and_balances() {
        let loans = vec![
            LoanSnapshot::new("a", dec!(5_000), dec!(10), dec!(500), 12),
            LoanSnapshot::new("b", dec!(2_000), dec!(12), dec!(300), 8),
        ];
        let allocation = allocate_in_order(loans.iter(), dec!(6_000));
        assert_eq!(allocation["a"], dec!(5_000));
        assert_eq!(allocation["b"], dec!(1_000));
        let total: Decimal = allocation.values().sum();
        assert_eq!(total, dec!(6_000));
    }
}
