//! Repayment formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MortgageType {
    Repayment,
    InterestOnly,
}

impl MortgageType {
    pub const ALL: [MortgageType; 2] = [MortgageType::Repayment, MortgageType::InterestOnly];

    /// Label stored in the form's type field.
    pub fn label(self) -> &'static str {
        match self {
            MortgageType::Repayment => "Repayment",
            MortgageType::InterestOnly => "Interest only",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for MortgageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrounded figures from one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repayments {
    pub monthly_payment: f64,
    pub total_repayments: f64,
}

impl Repayments {
    fn is_finite(&self) -> bool {
        self.monthly_payment.is_finite() && self.total_repayments.is_finite()
    }
}

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Standard amortizing loan. A zero rate spreads the principal evenly.
pub fn repayment(principal: f64, annual_rate_percent: f64, term_years: f64) -> Repayments {
    let monthly_rate = monthly_rate(annual_rate_percent);
    let num_payments = term_years * 12.0;

    // 1 - (1 + r)^-n, kept accurate for rates too small to survive `1.0 + r`.
    let denominator = -(-num_payments * monthly_rate.ln_1p()).exp_m1();
    let monthly_payment = if monthly_rate == 0.0 || denominator == 0.0 {
        principal / num_payments
    } else {
        principal * monthly_rate / denominator
    };

    Repayments {
        monthly_payment,
        total_repayments: monthly_payment * num_payments,
    }
}

/// Interest each month, principal repaid in full at the end of the term.
pub fn interest_only(principal: f64, annual_rate_percent: f64, term_years: f64) -> Repayments {
    let monthly_payment = principal * monthly_rate(annual_rate_percent);

    Repayments {
        monthly_payment,
        total_repayments: monthly_payment * 12.0 * term_years + principal,
    }
}

/// Run the formula for `kind`. Returns `None` when the inputs produce a
/// non-finite figure, e.g. a zero-year repayment term.
pub fn calculate(
    kind: MortgageType,
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Option<Repayments> {
    let figures = match kind {
        MortgageType::Repayment => repayment(principal, annual_rate_percent, term_years),
        MortgageType::InterestOnly => interest_only(principal, annual_rate_percent, term_years),
    };

    if figures.is_finite() {
        Some(figures)
    } else {
        tracing::warn!(
            %kind,
            principal,
            annual_rate_percent,
            term_years,
            "calculation produced a non-finite figure"
        );
        None
    }
}

/// Display-ready outcome. `computed == false` means nothing to show yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub monthly_payment: String,
    pub total_repayments: String,
    pub computed: bool,
}

impl CalculationResult {
    pub fn pending() -> Self {
        Self::default()
    }
}

impl From<Repayments> for CalculationResult {
    fn from(figures: Repayments) -> Self {
        Self {
            monthly_payment: format_currency(figures.monthly_payment),
            total_repayments: format_currency(figures.total_repayments),
            computed: true,
        }
    }
}
