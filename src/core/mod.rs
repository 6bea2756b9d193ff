//! Foundational types shared across the engine: money rounding rules
//! and the portfolio loan snapshot.

pub mod loan;
pub mod money;
