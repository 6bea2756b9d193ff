//! Multi-loan payoff planning example.
//!
//! Demonstrates how the repayment strategies split an extra monthly budget
//! across a household portfolio, and what a prepayment does to one loan's
//! amortization.

use repayment_engine::amortization::{calculate_interest_saved, generate_amortization};
use repayment_engine::core::loan::LoanSnapshot;
use repayment_engine::strategy::{strategy_for, SmartHybridStrategy, STRATEGY_NAMES};
use repayment_engine::tax::{tax_bracket, TaxOptions};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  repayment-engine: Portfolio Payoff Example  ║");
    println!("╚══════════════════════════════════════════════╝\n");

    // A typical Indian household: one big sheltered loan, three smaller
    // unsheltered ones.
    let portfolio = vec![
        LoanSnapshot::new("home-sbi", dec!(2_500_000), dec!(8.5), dec!(24_618), 180)
            .with_bank("SBI")
            .with_loan_type("home")
            .with_india_eligibility(true, true, false, false),
        LoanSnapshot::new("car-hdfc", dec!(450_000), dec!(9.25), dec!(9_400), 60)
            .with_bank("HDFC")
            .with_loan_type("car")
            .with_charges(dec!(5.0), dec!(5.0)),
        LoanSnapshot::new("personal-icici", dec!(300_000), dec!(14), dec!(10_200), 36)
            .with_bank("ICICI")
            .with_loan_type("personal"),
        LoanSnapshot::new("edu-axis", dec!(28_000), dec!(10.5), dec!(9_600), 4)
            .with_bank("AXIS")
            .with_loan_type("education")
            .with_india_eligibility(false, false, true, false),
    ];

    let income = dec!(1_800_000);
    let budget = dec!(40_000);
    let bracket = match tax_bracket("IN", income, &TaxOptions::default()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };
    println!("Annual income:       ₹{income}");
    println!("Marginal bracket:    {bracket}");
    println!("Extra budget/month:  ₹{budget}\n");

    // --- Scenario 1: how each strategy splits the budget ---
    println!("━━━ Scenario 1: Strategy Comparison ━━━\n");

    for name in STRATEGY_NAMES {
        let strategy = match strategy_for(name, bracket) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return;
            }
        };
        println!("{}", strategy.description());
        let allocation = strategy.allocate(&portfolio, budget);
        for (loan_id, amount) in &allocation {
            println!("  {:<16} ₹{:>12}", loan_id, amount);
        }
        println!();
    }

    // --- Scenario 2: why smart-hybrid ordered it that way ---
    println!("━━━ Scenario 2: Post-Tax Effective Rates ━━━\n");

    let smart = SmartHybridStrategy::new(bracket);
    let mut annotated = smart.annotate(&portfolio);
    annotated.sort_by(|a, b| b.effective_rate.cmp(&a.effective_rate));
    for loan in &annotated {
        let closure = if loan.months_to_closure == 999 {
            "never at current EMI".to_string()
        } else {
            format!("{} months", loan.months_to_closure)
        };
        println!(
            "  {:<16} nominal {:>6}%  effective {:>6}%  closes in {}",
            loan.loan_id, loan.interest_rate, loan.effective_rate, closure
        );
    }
    println!();

    // --- Scenario 3: what prepaying the home loan is worth ---
    println!("━━━ Scenario 3: Home Loan Prepayment ━━━\n");

    let home = &portfolio[0];
    let extra = dec!(10_000);
    let (saved, months_saved) = calculate_interest_saved(
        home.outstanding_principal,
        home.interest_rate,
        home.remaining_tenure_months,
        extra,
        &BTreeMap::new(),
    );
    println!("Prepaying ₹{extra}/month on {}:", home.loan_id);
    println!("  Interest saved:  ₹{saved}");
    println!("  Months saved:    {months_saved}");

    let schedule = generate_amortization(
        home.outstanding_principal,
        home.interest_rate,
        home.remaining_tenure_months,
        extra,
        &BTreeMap::new(),
    );
    if let Some(last) = schedule.last() {
        println!("  Loan closes at month {} of {}", last.month, home.remaining_tenure_months);
        let total_paid: Decimal = last.cumulative_interest + last.cumulative_principal;
        println!("  Total paid:      ₹{total_paid}");
    }
}
