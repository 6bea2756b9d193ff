//! Random loan portfolio generation.
//!
//! Produces plausible multi-loan portfolios for exercising the strategy
//! optimizer and the benches under varied conditions.

use crate::amortization::calculate_emi;
use crate::core::loan::LoanSnapshot;
use crate::tax::india;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of loans.
    pub loan_count: usize,
    /// Minimum outstanding principal.
    pub min_principal: Decimal,
    /// Maximum outstanding principal.
    pub max_principal: Decimal,
    /// Minimum annual rate in percent.
    pub min_rate: Decimal,
    /// Maximum annual rate in percent.
    pub max_rate: Decimal,
    /// Minimum remaining tenure in months.
    pub min_tenure_months: u32,
    /// Maximum remaining tenure in months.
    pub max_tenure_months: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            loan_count: 5,
            min_principal: Decimal::from(50_000),
            max_principal: Decimal::from(5_000_000),
            min_rate: dec!(7),
            max_rate: dec!(18),
            min_tenure_months: 12,
            max_tenure_months: 240,
        }
    }
}

/// Generate a random portfolio of loan snapshots.
///
/// Loan types cycle through the Indian registry; home loans get 80C +
/// 24(b) eligibility, education loans 80E, and foreclosure charges follow
/// the RBI penalty matrix for a randomly drawn rate type. EMIs are
/// computed from the drawn terms, so every generated loan is internally
/// consistent.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> Vec<LoanSnapshot> {
    let mut rng = rand::thread_rng();
    let mut portfolio = Vec::with_capacity(config.loan_count);

    let min_p: f64 = config.min_principal.to_string().parse().unwrap_or(50_000.0);
    let max_p: f64 = config.max_principal.to_string().parse().unwrap_or(5_000_000.0);
    let min_r: f64 = config.min_rate.to_string().parse().unwrap_or(7.0);
    let max_r: f64 = config.max_rate.to_string().parse().unwrap_or(18.0);

    for i in 0..config.loan_count {
        let loan_type = india::LOAN_TYPES[i % india::LOAN_TYPES.len()];
        let rate_type = india::RATE_TYPES[rng.gen_range(0..india::RATE_TYPES.len())];

        let principal = Decimal::from_f64_retain(rng.gen_range(min_p..max_p))
            .unwrap_or(Decimal::from(100_000))
            .round_dp(2);
        let rate = Decimal::from_f64_retain(rng.gen_range(min_r..max_r))
            .unwrap_or(dec!(10))
            .round_dp(2);
        let tenure = rng.gen_range(config.min_tenure_months..=config.max_tenure_months);
        let emi = calculate_emi(principal, rate, tenure);
        let foreclosure = india::prepayment_penalty(loan_type, rate_type);

        let loan = LoanSnapshot::new(format!("LOAN-{:03}", i), principal, rate, emi, tenure)
            .with_bank(india::INDIAN_BANKS[i % india::INDIAN_BANKS.len()].code)
            .with_loan_type(loan_type)
            .with_charges(foreclosure, foreclosure)
            .with_india_eligibility(
                loan_type == "home",
                loan_type == "home",
                loan_type == "education",
                false,
            );
        portfolio.push(loan);
    }

    portfolio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{strategy_for, STRATEGY_NAMES};

    #[test]
    fn test_generated_portfolio_shape() {
        let config = PortfolioConfig {
            loan_count: 8,
            ..Default::default()
        };
        let portfolio = generate_random_portfolio(&config);
        assert_eq!(portfolio.len(), 8);
        for loan in &portfolio {
            assert!(loan.outstanding_principal >= config.min_principal);
            assert!(loan.interest_rate >= config.min_rate);
            assert!(loan.emi_amount > Decimal::ZERO);
            assert!(!loan.loan_type.is_empty());
        }
    }

    #[test]
    fn test_generated_portfolio_feeds_every_strategy() {
        let portfolio = generate_random_portfolio(&PortfolioConfig::default());
        let budget = dec!(50_000);
        for name in STRATEGY_NAMES {
            let strategy = strategy_for(name, dec!(0.30)).unwrap();
            let allocation = strategy.allocate(&portfolio, budget);
            let total: Decimal = allocation.values().sum();
            assert!(total <= budget);
            for (loan_id, amount) in &allocation {
                let loan = portfolio.iter().find(|l| &l.loan_id == loan_id).unwrap();
                assert!(*amount <= loan.outstanding_principal);
            }
        }
    }
}
