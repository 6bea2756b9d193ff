//! # repayment-engine
//!
//! Loan amortization, jurisdiction tax rules, and repayment strategy
//! optimization.
//!
//! Given structured numeric inputs the engine returns structured numeric
//! outputs, deterministically and without side effects: all money values
//! are arbitrary-precision decimals, every operation is a pure function,
//! and independent invocations can run in parallel with zero coordination.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: money rounding, loan snapshots
//! - **amortization** — EMI math, schedules with prepayments, inverse solvers
//! - **tax** — Country dispatcher with India and US jurisdiction modules
//! - **strategy** — Four repayment strategies over a loan portfolio
//! - **simulation** — Random portfolio generation for testing and benches

pub mod amortization;
pub mod core;
pub mod simulation;
pub mod strategy;
pub mod tax;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::{
        calculate_affordability, calculate_emi, calculate_interest_saved,
        calculate_total_interest, generate_amortization, reverse_emi_rate, reverse_emi_tenure,
        AmortizationEntry,
    };
    pub use crate::core::loan::LoanSnapshot;
    pub use crate::core::money::round_money;
    pub use crate::strategy::{
        strategy_for, Allocation, RepaymentStrategy, SmartHybridStrategy, StrategyError,
    };
    pub use crate::tax::{
        compare_tax_options, loan_deductions, tax_bracket, Country, LoanTaxInfo, TaxError,
        TaxOptions,
    };
}
