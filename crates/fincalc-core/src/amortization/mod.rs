//! Mortgage amortization: annuity payments and period-by-period schedules.

pub mod schedule;

pub use schedule::{
    compute_amortization, AmortizationOutput, LoanInput, PaymentFrequency, PaymentRow,
};
