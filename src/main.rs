//! repayment-engine CLI
//!
//! Run loan math and portfolio optimization from the command line.
//!
//! # Usage
//!
//! ```bash
//! # EMI and total interest for a loan
//! repayment-engine emi --principal 5000000 --rate 8.5 --tenure 240
//!
//! # Full amortization schedule with a monthly prepayment
//! repayment-engine schedule --principal 1000000 --rate 12 --tenure 60 --prepay 5000
//!
//! # Allocate an extra budget across a portfolio
//! repayment-engine optimize --input portfolio.json --budget 50000 --strategy smart_hybrid
//!
//! # Compare tax options for a portfolio
//! repayment-engine tax --input portfolio.json --country IN --income 1200000
//!
//! # Generate a random portfolio for testing
//! repayment-engine generate --loans 6 --output portfolio.json
//! ```

use repayment_engine::amortization::{
    calculate_emi, calculate_total_interest, generate_amortization,
};
use repayment_engine::core::loan::LoanSnapshot;
use repayment_engine::simulation::{generate_random_portfolio, PortfolioConfig};
use repayment_engine::strategy::strategy_for;
use repayment_engine::tax::{compare_tax_options, tax_bracket, LoanTaxInfo, TaxOptions};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"repayment-engine — loan amortization, tax rules, and repayment optimization

USAGE:
    repayment-engine <COMMAND> [OPTIONS]

COMMANDS:
    emi         Calculate EMI and total interest for a loan
    schedule    Generate a full amortization schedule
    optimize    Allocate an extra-payment budget across a portfolio
    tax         Compare tax options for a portfolio
    generate    Generate a random portfolio (for testing)
    help        Show this message

OPTIONS (emi, schedule):
    --principal <AMOUNT>    Loan principal
    --rate <PERCENT>        Annual interest rate
    --tenure <MONTHS>       Tenure in months
    --prepay <AMOUNT>       Monthly prepayment (schedule only)
    --format <FORMAT>       Output format: text (default) or json

OPTIONS (optimize):
    --input <FILE>          Path to JSON portfolio file
    --budget <AMOUNT>       Extra monthly budget to allocate
    --strategy <NAME>       avalanche | snowball | smart_hybrid | proportional
    --bracket <FRACTION>    Marginal tax bracket for smart_hybrid (default 0.30)

OPTIONS (tax):
    --input <FILE>          Path to JSON portfolio file
    --country <CODE>        IN or US
    --income <AMOUNT>       Gross annual income
    --regime <NAME>         India: old | new (default old)
    --filing-status <NAME>  US: single | married_jointly | ... (default single)

OPTIONS (generate):
    --loans <N>             Number of loans (default: 5)
    --output <FILE>         Write to file instead of stdout

EXAMPLES:
    repayment-engine emi --principal 5000000 --rate 8.5 --tenure 240
    repayment-engine optimize --input portfolio.json --budget 50000 --strategy avalanche
    repayment-engine tax --input portfolio.json --country IN --income 1200000"#
    );
}

#[derive(serde::Deserialize, serde::Serialize)]
struct PortfolioFile {
    loans: Vec<LoanSnapshot>,
}

#[derive(serde::Serialize)]
struct EmiOutput {
    emi: String,
    total_interest: String,
    total_paid: String,
}

#[derive(serde::Serialize)]
struct AllocationOutput {
    strategy: String,
    budget: String,
    allocations: Vec<AllocationRow>,
    total_allocated: String,
}

#[derive(serde::Serialize)]
struct AllocationRow {
    loan_id: String,
    amount: String,
}

fn parse_decimal(value: &str, flag: &str) -> Decimal {
    value.parse().unwrap_or_else(|e| {
        eprintln!("Invalid value '{}' for {}: {}", value, flag, e);
        process::exit(1);
    })
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    args.get(*i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn load_portfolio(path: &str) -> Vec<LoanSnapshot> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: PortfolioFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "loans": [
    {{ "loan_id": "home-01", "outstanding_principal": "2500000",
       "interest_rate": "8.5", "emi_amount": "21696",
       "remaining_tenure_months": 180 }}
  ]
}}"#
        );
        process::exit(1);
    });

    file.loans
}

fn cmd_emi(args: &[String]) {
    let mut principal = Decimal::ZERO;
    let mut rate = Decimal::ZERO;
    let mut tenure: u32 = 0;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--principal" => principal = parse_decimal(&flag_value(args, &mut i, "--principal"), "--principal"),
            "--rate" => rate = parse_decimal(&flag_value(args, &mut i, "--rate"), "--rate"),
            "--tenure" => {
                let v = flag_value(args, &mut i, "--tenure");
                tenure = v.parse().unwrap_or_else(|_| {
                    eprintln!("--tenure requires a whole number of months");
                    process::exit(1);
                });
            }
            "--format" => format = flag_value(args, &mut i, "--format"),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let emi = calculate_emi(principal, rate, tenure);
    let total_interest = calculate_total_interest(principal, rate, tenure);

    if format == "json" {
        let output = EmiOutput {
            emi: emi.to_string(),
            total_interest: total_interest.to_string(),
            total_paid: (principal + total_interest).to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("EMI:            {}", emi);
        println!("Total interest: {}", total_interest);
        println!("Total paid:     {}", principal + total_interest);
    }
}

fn cmd_schedule(args: &[String]) {
    let mut principal = Decimal::ZERO;
    let mut rate = Decimal::ZERO;
    let mut tenure: u32 = 0;
    let mut prepay = Decimal::ZERO;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--principal" => principal = parse_decimal(&flag_value(args, &mut i, "--principal"), "--principal"),
            "--rate" => rate = parse_decimal(&flag_value(args, &mut i, "--rate"), "--rate"),
            "--tenure" => {
                let v = flag_value(args, &mut i, "--tenure");
                tenure = v.parse().unwrap_or_else(|_| {
                    eprintln!("--tenure requires a whole number of months");
                    process::exit(1);
                });
            }
            "--prepay" => prepay = parse_decimal(&flag_value(args, &mut i, "--prepay"), "--prepay"),
            "--format" => format = flag_value(args, &mut i, "--format"),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let schedule = generate_amortization(principal, rate, tenure, prepay, &BTreeMap::new());

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&schedule).unwrap());
    } else {
        println!(
            "{:>5} {:>14} {:>14} {:>12} {:>12} {:>14}",
            "Month", "EMI", "Principal", "Interest", "Prepayment", "Balance"
        );
        for row in &schedule {
            println!(
                "{:>5} {:>14} {:>14} {:>12} {:>12} {:>14}",
                row.month, row.emi, row.principal_portion, row.interest_portion, row.prepayment, row.balance
            );
        }
        if let Some(last) = schedule.last() {
            println!("\nMonths: {}   Total interest: {}", schedule.len(), last.cumulative_interest);
        }
    }
}

fn cmd_optimize(args: &[String]) {
    let mut input_path: Option<String> = None;
    let mut budget = Decimal::ZERO;
    let mut strategy_name = "smart_hybrid".to_string();
    let mut bracket = dec!(0.30);
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input_path = Some(flag_value(args, &mut i, "--input")),
            "--budget" => budget = parse_decimal(&flag_value(args, &mut i, "--budget"), "--budget"),
            "--strategy" => strategy_name = flag_value(args, &mut i, "--strategy"),
            "--bracket" => bracket = parse_decimal(&flag_value(args, &mut i, "--bracket"), "--bracket"),
            "--format" => format = flag_value(args, &mut i, "--format"),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let portfolio = load_portfolio(&path);
    let strategy = strategy_for(&strategy_name, bracket).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    log::info!("allocating {} via {} across {} loans", budget, strategy.name(), portfolio.len());
    let allocation = strategy.allocate(&portfolio, budget);
    let total: Decimal = allocation.values().sum();

    if format == "json" {
        let output = AllocationOutput {
            strategy: strategy.name().to_string(),
            budget: budget.to_string(),
            allocations: allocation
                .iter()
                .map(|(loan_id, amount)| AllocationRow {
                    loan_id: loan_id.clone(),
                    amount: amount.to_string(),
                })
                .collect(),
            total_allocated: total.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("Strategy: {} — {}", strategy.name(), strategy.description());
        for (loan_id, amount) in &allocation {
            println!("  {:<16} {}", loan_id, amount);
        }
        println!("Total allocated: {} of {}", total, budget);
    }
}

/// Derive per-loan annual tax facts from a snapshot by walking the first
/// twelve months of its remaining schedule.
fn snapshot_tax_info(loan: &LoanSnapshot) -> LoanTaxInfo {
    let schedule = generate_amortization(
        loan.outstanding_principal,
        loan.interest_rate,
        loan.remaining_tenure_months,
        Decimal::ZERO,
        &BTreeMap::new(),
    );
    let year: Vec<_> = schedule.iter().take(12).collect();
    let interest: Decimal = year.iter().map(|e| e.interest_portion).sum();
    let principal: Decimal = year.iter().map(|e| e.principal_portion).sum();

    LoanTaxInfo {
        eligible_80c: loan.eligible_80c,
        eligible_24b: loan.eligible_24b,
        eligible_80e: loan.eligible_80e,
        eligible_80eea: loan.eligible_80eea,
        eligible_mortgage_deduction: loan.eligible_mortgage_deduction,
        eligible_student_loan_deduction: loan.eligible_student_loan_deduction,
        outstanding_principal: loan.outstanding_principal,
        ..LoanTaxInfo::new(loan.loan_type.clone(), interest, principal)
    }
}

fn cmd_tax(args: &[String]) {
    let mut input_path: Option<String> = None;
    let mut country = "IN".to_string();
    let mut income = Decimal::ZERO;
    let mut opts = TaxOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input_path = Some(flag_value(args, &mut i, "--input")),
            "--country" => country = flag_value(args, &mut i, "--country"),
            "--income" => income = parse_decimal(&flag_value(args, &mut i, "--income"), "--income"),
            "--regime" => {
                let v = flag_value(args, &mut i, "--regime");
                opts.regime = v.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            "--filing-status" => {
                let v = flag_value(args, &mut i, "--filing-status");
                opts.filing_status = v.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let loans: Vec<LoanTaxInfo> = match input_path {
        Some(path) => load_portfolio(&path).iter().map(snapshot_tax_info).collect(),
        None => Vec::new(),
    };

    let bracket = tax_bracket(&country, income, &opts).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let comparison = compare_tax_options(&country, income, &loans, &opts).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    println!("Marginal bracket: {}", bracket);
    println!("{}", serde_json::to_string_pretty(&comparison).unwrap());
}

fn cmd_generate(args: &[String]) {
    let mut loan_count = 5usize;
    let mut output_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--loans" => {
                let v = flag_value(args, &mut i, "--loans");
                loan_count = v.parse().unwrap_or_else(|_| {
                    eprintln!("--loans requires a number");
                    process::exit(1);
                });
            }
            "--output" => output_path = Some(flag_value(args, &mut i, "--output")),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = PortfolioConfig {
        loan_count,
        ..Default::default()
    };
    let portfolio = generate_random_portfolio(&config);
    let json = serde_json::to_string_pretty(&PortfolioFile { loans: portfolio }).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} loans → {}", loan_count, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "emi" => cmd_emi(rest),
        "schedule" => cmd_schedule(rest),
        "optimize" => cmd_optimize(rest),
        "tax" => cmd_tax(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
