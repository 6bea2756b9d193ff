use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a single loan inside a portfolio.
///
/// Snapshots are the optimizer's unit of work. The caller owns them for the
/// duration of one allocation round; the engine never retains references
/// across calls. `effective_rate` and `months_to_closure` are derived fields
/// populated only on the annotated copies returned by the Smart-Hybrid
/// strategy — they default to zero and must not be relied upon otherwise.
///
/// # Examples
///
/// ```
/// use repayment_engine::core::loan::LoanSnapshot;
/// use rust_decimal_macros::dec;
///
/// let loan = LoanSnapshot::new("home-01", dec!(2_500_000), dec!(8.5), dec!(21_696), 180)
///     .with_bank("SBI")
///     .with_loan_type("home")
///     .with_india_eligibility(true, true, false, false);
///
/// assert_eq!(loan.outstanding_principal, dec!(2_500_000));
/// assert!(loan.eligible_24b);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    /// Caller-assigned identity; allocation maps are keyed by this.
    pub loan_id: String,
    #[serde(default)]
    pub bank_name: String,
    /// home / personal / car / education / gold / credit_card.
    #[serde(default)]
    pub loan_type: String,
    pub outstanding_principal: Decimal,
    /// Annual nominal rate in percent (e.g. `8.5`).
    pub interest_rate: Decimal,
    pub emi_amount: Decimal,
    pub remaining_tenure_months: u32,
    #[serde(default)]
    pub prepayment_penalty_pct: Decimal,
    #[serde(default)]
    pub foreclosure_charges_pct: Decimal,
    // India deduction eligibility (sections 80C, 24(b), 80E, 80EEA).
    #[serde(default)]
    pub eligible_80c: bool,
    #[serde(default)]
    pub eligible_24b: bool,
    #[serde(default)]
    pub eligible_80e: bool,
    #[serde(default)]
    pub eligible_80eea: bool,
    // US deduction eligibility (mortgage interest, student loan interest).
    #[serde(default)]
    pub eligible_mortgage_deduction: bool,
    #[serde(default)]
    pub eligible_student_loan_deduction: bool,
    /// Post-tax rate; derived, Smart-Hybrid annotation only.
    #[serde(default)]
    pub effective_rate: Decimal,
    /// Estimated months until payoff at the current EMI; derived,
    /// Smart-Hybrid annotation only.
    #[serde(default)]
    pub months_to_closure: u32,
}

impl LoanSnapshot {
    /// Create a snapshot with the mandatory numeric fields.
    pub fn new(
        loan_id: impl Into<String>,
        outstanding_principal: Decimal,
        interest_rate: Decimal,
        emi_amount: Decimal,
        remaining_tenure_months: u32,
    ) -> Self {
        Self {
            loan_id: loan_id.into(),
            bank_name: String::new(),
            loan_type: String::new(),
            outstanding_principal,
            interest_rate,
            emi_amount,
            remaining_tenure_months,
            prepayment_penalty_pct: Decimal::ZERO,
            foreclosure_charges_pct: Decimal::ZERO,
            eligible_80c: false,
            eligible_24b: false,
            eligible_80e: false,
            eligible_80eea: false,
            eligible_mortgage_deduction: false,
            eligible_student_loan_deduction: false,
            effective_rate: Decimal::ZERO,
            months_to_closure: 0,
        }
    }

    pub fn with_bank(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = bank_name.into();
        self
    }

    pub fn with_loan_type(mut self, loan_type: impl Into<String>) -> Self {
        self.loan_type = loan_type.into();
        self
    }

    /// Set prepayment penalty and foreclosure charge percentages.
    pub fn with_charges(mut self, prepayment_penalty_pct: Decimal, foreclosure_charges_pct: Decimal) -> Self {
        self.prepayment_penalty_pct = prepayment_penalty_pct;
        self.foreclosure_charges_pct = foreclosure_charges_pct;
        self
    }

    /// Set Indian section eligibility flags (80C, 24(b), 80E, 80EEA).
    pub fn with_india_eligibility(mut self, e80c: bool, e24b: bool, e80e: bool, e80eea: bool) -> Self {
        self.eligible_80c = e80c;
        self.eligible_24b = e24b;
        self.eligible_80e = e80e;
        self.eligible_80eea = e80eea;
        self
    }

    /// Set US deduction eligibility flags (mortgage, student loan).
    pub fn with_us_eligibility(mut self, mortgage: bool, student_loan: bool) -> Self {
        self.eligible_mortgage_deduction = mortgage;
        self.eligible_student_loan_deduction = student_loan;
        self
    }

    /// A loan is active while it still carries a positive balance.
    pub fn is_active(&self) -> bool {
        self.outstanding_principal > Decimal::ZERO
    }
}
