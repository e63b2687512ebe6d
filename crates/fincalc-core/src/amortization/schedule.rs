//! Mortgage amortization schedule generation.
//!
//! Computes the fixed periodic payment from the standard annuity formula and
//! walks the balance period by period, splitting each payment into principal
//! and interest. All math uses `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of payment rows carried in the returned schedule. Summary
/// totals always cover the full term regardless of this cap.
pub const MAX_SCHEDULE_ROWS: usize = 60;

/// Down-payment percentage below which mortgage default insurance applies.
const INSURED_DOWN_PAYMENT_PCT: Decimal = dec!(20);

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// How often loan payments are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }
}

/// Input for an amortization schedule.
///
/// The loan principal is never supplied directly; it is derived from
/// `property_value` and `down_payment` via [`LoanInput::loan_amount`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Purchase price of the property.
    pub property_value: Money,
    /// Cash down payment, between zero and the property value.
    pub down_payment: Money,
    /// Annual interest rate as a decimal (0.045 = 4.5%).
    pub annual_rate: Rate,
    /// Amortization period in years.
    pub amortization_years: u32,
    /// Payment frequency.
    pub payment_frequency: PaymentFrequency,
}

impl LoanInput {
    /// Loan principal derived from property value and down payment.
    /// Floored at zero: a down payment covering the full price is a valid
    /// degenerate case, not an error.
    pub fn loan_amount(&self) -> Money {
        (self.property_value - self.down_payment).max(Decimal::ZERO)
    }

    /// Down payment as a percentage of property value, clamped to [0, 100].
    pub fn down_payment_pct(&self) -> Decimal {
        if self.property_value <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.down_payment / self.property_value * HUNDRED).clamp(Decimal::ZERO, HUNDRED)
    }
}

/// One scheduled payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub payment_number: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Balance after this payment, floored at zero.
    pub remaining_balance: Money,
}

/// Full amortization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// Fixed payment per period.
    pub periodic_payment: Money,
    /// Interest paid over the full term, not just the rows in `schedule`.
    pub total_interest: Money,
    /// Sum of all payments over the full term.
    pub total_paid: Money,
    pub loan_amount: Money,
    pub down_payment_pct: Decimal,
    /// Total interest as a percentage of the principal.
    pub interest_to_principal_pct: Decimal,
    pub total_periods: u32,
    /// At most [`MAX_SCHEDULE_ROWS`] rows from the start of the term.
    pub schedule: Vec<PaymentRow>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Fixed payment from the annuity formula `L·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// A zero loan amount yields a zero payment. A periodic rate of exactly zero
/// cannot arrive through validated input, but if the rate division underflows
/// the payment falls back to straight-line repayment (`L / n`) with a warning
/// instead of dividing by zero.
fn periodic_payment(
    loan_amount: Money,
    periodic_rate: Rate,
    total_periods: u32,
    warnings: &mut Vec<String>,
) -> FinCalcResult<Money> {
    if loan_amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if periodic_rate.is_zero() {
        warnings.push(
            "Periodic rate resolved to zero; schedule uses straight-line repayment".to_string(),
        );
        return Ok(loan_amount / Decimal::from(total_periods));
    }

    let growth = compound(periodic_rate, total_periods);
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "annuity payment denominator".to_string(),
        });
    }

    Ok(loan_amount * periodic_rate * growth / denominator)
}

fn validate(input: &LoanInput) -> FinCalcResult<()> {
    if input.property_value <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "property_value".into(),
            reason: "property_value must be > 0".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "down_payment".into(),
            reason: "down_payment cannot be negative".into(),
        });
    }
    if input.down_payment > input.property_value {
        return Err(FinCalcError::InvalidInput {
            field: "down_payment".into(),
            reason: "down_payment cannot exceed property_value".into(),
        });
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "annual_rate must be > 0".into(),
        });
    }
    if input.amortization_years == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "amortization_years".into(),
            reason: "amortization_years must be > 0".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Generate a full amortization schedule for a fixed-rate loan.
///
/// Pure and stateless: identical inputs produce identical schedules. The
/// returned row buffer is capped at [`MAX_SCHEDULE_ROWS`] while the summary
/// totals (`total_interest`, `total_paid`) accumulate over every period of
/// the term in the same pass.
pub fn compute_amortization(
    input: &LoanInput,
) -> FinCalcResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let periods_per_year = input.payment_frequency.periods_per_year();
    let periodic_rate = input.annual_rate / Decimal::from(periods_per_year);
    let total_periods = input.amortization_years * periods_per_year;

    let loan_amount = input.loan_amount();
    let down_payment_pct = input.down_payment_pct();

    if down_payment_pct < INSURED_DOWN_PAYMENT_PCT {
        warnings.push(format!(
            "Down payment is {:.1}% of property value; mortgage default insurance is required below 20%",
            down_payment_pct
        ));
    }

    let payment = periodic_payment(loan_amount, periodic_rate, total_periods, &mut warnings)?;

    // Single pass: bounded row buffer for display, running accumulators for
    // the full-term totals.
    let mut schedule: Vec<PaymentRow> =
        Vec::with_capacity(MAX_SCHEDULE_ROWS.min(total_periods as usize));
    let mut remaining_balance = loan_amount;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=total_periods {
        let interest = remaining_balance * periodic_rate;
        let principal = payment - interest;
        remaining_balance = (remaining_balance - principal).max(Decimal::ZERO);
        total_interest += interest;

        if (period as usize) <= MAX_SCHEDULE_ROWS {
            schedule.push(PaymentRow {
                payment_number: period,
                payment,
                principal,
                interest,
                remaining_balance,
            });
        }
    }

    let total_paid = payment * Decimal::from(total_periods);
    let interest_to_principal_pct = if loan_amount.is_zero() {
        Decimal::ZERO
    } else {
        total_interest / loan_amount * HUNDRED
    };

    let output = AmortizationOutput {
        periodic_payment: payment,
        total_interest,
        total_paid,
        loan_amount,
        down_payment_pct,
        interest_to_principal_pct,
        total_periods,
        schedule,
    };

    Ok(with_metadata(
        "Fixed-payment annuity amortization",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
