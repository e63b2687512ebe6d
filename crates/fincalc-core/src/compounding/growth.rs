//! Year-by-year compound growth of an investment with regular contributions.
//!
//! Contributions are always supplied on a monthly basis and rescaled to the
//! active compounding period, so the annual contribution total is the same at
//! every frequency. Within each period, interest accrues before the
//! contribution lands (end-of-period timing).

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

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);
/// Rule-of-72 numerator for the doubling-time estimate.
const RULE_OF_72: Decimal = dec!(72);

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// How often interest is compounded (and contributions are deposited).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Annually => 1,
        }
    }
}

/// Input for a compound-growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Starting balance.
    pub initial_amount: Money,
    /// Contribution per month, regardless of compounding frequency.
    pub monthly_contribution: Money,
    /// Annual return rate as a decimal (0.07 = 7%).
    pub annual_rate: Rate,
    /// Projection length in years.
    pub time_horizon_years: u32,
    /// Compounding frequency.
    pub compounding_frequency: CompoundingFrequency,
}

/// One projected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: u32,
    pub start_balance: Money,
    pub interest_earned: Money,
    pub contributions: Money,
    /// Equals the next row's `start_balance`.
    pub end_balance: Money,
}

/// Full projection result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundingOutput {
    pub final_balance: Money,
    /// Initial amount plus every periodic contribution.
    pub total_contributions: Money,
    /// `final_balance - total_contributions`.
    pub total_interest: Money,
    /// Final balance as a multiple of total contributions.
    pub growth_multiple: Decimal,
    /// Rule-of-72 doubling estimate, a display hint only.
    pub years_to_double: Decimal,
    pub schedule: Vec<YearRow>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(input: &InvestmentInput) -> FinCalcResult<()> {
    if input.initial_amount < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "initial_amount".into(),
            reason: "initial_amount cannot be negative".into(),
        });
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "monthly_contribution cannot be negative".into(),
        });
    }
    if input.annual_rate <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "annual_rate must be > 0".into(),
        });
    }
    if input.time_horizon_years == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "time_horizon_years".into(),
            reason: "time_horizon_years must be > 0".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project investment growth year by year.
///
/// Pure and stateless: identical inputs produce identical schedules. If the
/// periodic rate underflows to exactly zero despite the positive-rate
/// precondition, the projection degrades to contributions-only accumulation
/// and says so in the warnings.
pub fn compute_compounding(
    input: &InvestmentInput,
) -> FinCalcResult<ComputationOutput<CompoundingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let periods_per_year = input.compounding_frequency.periods_per_year();
    let periodic_rate = input.annual_rate / Decimal::from(periods_per_year);
    let periodic_contribution =
        input.monthly_contribution * MONTHS_PER_YEAR / Decimal::from(periods_per_year);

    if periodic_rate.is_zero() {
        warnings.push(
            "Periodic rate resolved to zero; projection accrues contributions only".to_string(),
        );
    }

    let mut schedule: Vec<YearRow> = Vec::with_capacity(input.time_horizon_years as usize);
    let mut balance = input.initial_amount;
    let mut total_contributions = input.initial_amount;

    for year in 1..=input.time_horizon_years {
        let start_balance = balance;
        let mut yearly_interest = Decimal::ZERO;
        let mut yearly_contributions = Decimal::ZERO;

        // Interest accrues first, then the contribution lands at the end of
        // the period. The ordering changes the final balance.
        for _ in 0..periods_per_year {
            let interest = balance * periodic_rate;
            balance += interest;
            balance += periodic_contribution;
            yearly_interest += interest;
            yearly_contributions += periodic_contribution;
        }

        total_contributions += yearly_contributions;
        schedule.push(YearRow {
            year,
            start_balance,
            interest_earned: yearly_interest,
            contributions: yearly_contributions,
            end_balance: balance,
        });
    }

    let final_balance = balance;
    let total_interest = final_balance - total_contributions;
    let growth_multiple = if total_contributions.is_zero() {
        Decimal::ZERO
    } else {
        final_balance / total_contributions
    };
    let years_to_double = (RULE_OF_72 / (input.annual_rate * HUNDRED)).round();

    let output = CompoundingOutput {
        final_balance,
        total_contributions,
        total_interest,
        growth_multiple,
        years_to_double,
        schedule,
    };

    Ok(with_metadata(
        "Periodic compounding with end-of-period contributions",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// 10k starting, 500/month, 7% over 20 years. Override as needed.
    fn default_input() -> InvestmentInput {
        InvestmentInput {
            initial_amount: dec!(10_000),
            monthly_contribution: dec!(500),
            annual_rate: dec!(0.07),
            time_horizon_years: 20,
            compounding_frequency: CompoundingFrequency::Monthly,
        }
    }

    // ---------------------------------------------------------------
    // 1. Reference projection: 10k + 500/mo at 7% for 20 years
    // ---------------------------------------------------------------
    #[test]
    fn test_reference_monthly_projection() {
        let result = compute_compounding(&default_input()).unwrap();
        let out = &result.result;

        // 10_000 initial + 240 monthly contributions of 500
        assert_eq!(out.total_contributions, dec!(130_000));
        // FV = 10k·1.0058333^240 + 500·((1.0058333^240 − 1)/0.0058333) ≈ 300.8k
        assert!(out.final_balance > dec!(300_000), "final={}", out.final_balance);
        assert!(out.final_balance < dec!(302_000), "final={}", out.final_balance);
        assert_eq!(out.total_interest, out.final_balance - dec!(130_000));
        assert!(out.total_interest > Decimal::ZERO);
        assert_eq!(out.schedule.len(), 20);
    }

    // ---------------------------------------------------------------
    // 2. Year rows chain: end balance feeds the next start balance
    // ---------------------------------------------------------------
    #[test]
    fn test_year_rows_chain() {
        let result = compute_compounding(&default_input()).unwrap();
        let rows = &result.result.schedule;

        assert_eq!(rows[0].start_balance, dec!(10_000));
        for pair in rows.windows(2) {
            assert_eq!(pair[0].end_balance, pair[1].start_balance);
        }
        assert_eq!(
            rows.last().unwrap().end_balance,
            result.result.final_balance
        );
    }

    // ---------------------------------------------------------------
    // 3. Row accounting: start + interest + contributions == end
    // ---------------------------------------------------------------
    #[test]
    fn test_row_accounting_balances() {
        let result = compute_compounding(&default_input()).unwrap();
        for row in &result.result.schedule {
            let diff =
                (row.start_balance + row.interest_earned + row.contributions - row.end_balance)
                    .abs();
            assert!(diff < dec!(0.0000001), "year {}: diff={}", row.year, diff);
        }
    }

    // ---------------------------------------------------------------
    // 4. Contribution rescaling preserves annual totals per frequency
    // ---------------------------------------------------------------
    #[test]
    fn test_contribution_rescaling_equal_annual_totals() {
        for frequency in [
            CompoundingFrequency::Monthly,
            CompoundingFrequency::Quarterly,
            CompoundingFrequency::Annually,
        ] {
            let mut input = default_input();
            input.compounding_frequency = frequency;
            let result = compute_compounding(&input).unwrap();
            for row in &result.result.schedule {
                assert_eq!(row.contributions, dec!(6_000), "{:?}", frequency);
            }
            assert_eq!(result.result.total_contributions, dec!(130_000));
        }
    }

    // ---------------------------------------------------------------
    // 5. More frequent compounding grows strictly more
    // ---------------------------------------------------------------
    #[test]
    fn test_monthly_beats_quarterly_beats_annual() {
        let mut input = default_input();
        let monthly = compute_compounding(&input).unwrap().result.final_balance;

        input.compounding_frequency = CompoundingFrequency::Quarterly;
        let quarterly = compute_compounding(&input).unwrap().result.final_balance;

        input.compounding_frequency = CompoundingFrequency::Annually;
        let annually = compute_compounding(&input).unwrap().result.final_balance;

        assert!(monthly > quarterly, "{} vs {}", monthly, quarterly);
        assert!(quarterly > annually, "{} vs {}", quarterly, annually);
    }

    // ---------------------------------------------------------------
    // 6. Interest timing: contribution lands after accrual
    // ---------------------------------------------------------------
    #[test]
    fn test_contribution_earns_no_interest_in_its_own_period() {
        let input = InvestmentInput {
            initial_amount: Decimal::ZERO,
            monthly_contribution: dec!(1_200),
            annual_rate: dec!(0.10),
            time_horizon_years: 1,
            compounding_frequency: CompoundingFrequency::Annually,
        };
        let result = compute_compounding(&input).unwrap();
        let row = &result.result.schedule[0];

        // Zero balance accrues nothing; the single 14_400 deposit arrives at
        // year end and earns nothing that year
        assert_eq!(row.interest_earned, Decimal::ZERO);
        assert_eq!(row.end_balance, dec!(14_400));
    }

    // ---------------------------------------------------------------
    // 7. No contributions: pure compound growth of the principal
    // ---------------------------------------------------------------
    #[test]
    fn test_growth_without_contributions() {
        let input = InvestmentInput {
            initial_amount: dec!(1_000),
            monthly_contribution: Decimal::ZERO,
            annual_rate: dec!(0.10),
            time_horizon_years: 2,
            compounding_frequency: CompoundingFrequency::Annually,
        };
        let result = compute_compounding(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.final_balance, dec!(1_210));
        assert_eq!(out.total_contributions, dec!(1_000));
        assert_eq!(out.total_interest, dec!(210));
        assert_eq!(out.growth_multiple, dec!(1.21));
    }

    // ---------------------------------------------------------------
    // 8. Zero starting balance with contributions only
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_initial_amount_is_valid() {
        let mut input = default_input();
        input.initial_amount = Decimal::ZERO;
        let result = compute_compounding(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.total_contributions, dec!(120_000));
        assert!(out.final_balance > out.total_contributions);
    }

    // ---------------------------------------------------------------
    // 9. Rule-of-72 display hint
    // ---------------------------------------------------------------
    #[test]
    fn test_rule_of_72_estimate() {
        let result = compute_compounding(&default_input()).unwrap();
        // 72 / 7 ≈ 10.3 → 10
        assert_eq!(result.result.years_to_double, dec!(10));
    }

    // ---------------------------------------------------------------
    // 10. Underflowed periodic rate: contributions-only accumulation
    // ---------------------------------------------------------------
    #[test]
    fn test_underflowed_rate_accrues_contributions_only() {
        let mut input = default_input();
        // Positive, passes validation, but 1e-28 / 12 rounds to exactly zero
        input.annual_rate = Decimal::new(1, 28);
        let result = compute_compounding(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.total_contributions, dec!(130_000));
        assert_eq!(out.final_balance, out.total_contributions);
        assert_eq!(out.total_interest, Decimal::ZERO);
        for row in &out.schedule {
            assert_eq!(row.interest_earned, Decimal::ZERO);
        }
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("contributions only")));
    }

    // ---------------------------------------------------------------
    // 11. Validation failures
    // ---------------------------------------------------------------
    #[test]
    fn test_rejects_non_positive_rate() {
        let mut input = default_input();
        input.annual_rate = Decimal::ZERO;
        assert!(matches!(
            compute_compounding(&input),
            Err(FinCalcError::InvalidInput { field, .. }) if field == "annual_rate"
        ));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let mut input = default_input();
        input.initial_amount = dec!(-1);
        assert!(compute_compounding(&input).is_err());

        let mut input = default_input();
        input.monthly_contribution = dec!(-1);
        assert!(compute_compounding(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let mut input = default_input();
        input.time_horizon_years = 0;
        assert!(compute_compounding(&input).is_err());
    }

    // ---------------------------------------------------------------
    // 12. Idempotence
    // ---------------------------------------------------------------
    #[test]
    fn test_identical_inputs_identical_schedules() {
        let input = default_input();
        let a = compute_compounding(&input).unwrap();
        let b = compute_compounding(&input).unwrap();
        assert_eq!(a.result, b.result);
    }
}
