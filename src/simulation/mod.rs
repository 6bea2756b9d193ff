//! Testing and benchmarking support: random portfolio generation.

pub mod portfolio_gen;

pub use portfolio_gen::{generate_random_portfolio, PortfolioConfig};
