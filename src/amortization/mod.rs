//! Reducing-balance loan math: EMI calculation, amortization schedules
//! with prepayments, interest totals, and inverse solvers.

pub mod emi;
pub mod schedule;
pub mod solvers;

pub use emi::{calculate_affordability, calculate_emi, calculate_interest_saved, calculate_total_interest};
pub use schedule::{generate_amortization, AmortizationEntry};
pub use solvers::{reverse_emi_rate, reverse_emi_tenure};
