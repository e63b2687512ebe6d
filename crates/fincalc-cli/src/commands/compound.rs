use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::compounding::{compute_compounding, CompoundingFrequency, InvestmentInput};

use crate::input;

const HUNDRED: Decimal = dec!(100);

/// Compounding frequency flag, mapped onto the core enum.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    Quarterly,
    Annually,
}

impl From<FrequencyArg> for CompoundingFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => CompoundingFrequency::Monthly,
            FrequencyArg::Quarterly => CompoundingFrequency::Quarterly,
            FrequencyArg::Annually => CompoundingFrequency::Annually,
        }
    }
}

/// Arguments for compound-growth projection
#[derive(Args)]
pub struct CompoundArgs {
    /// Starting balance
    #[arg(long, default_value = "0")]
    pub initial: Decimal,

    /// Contribution per month
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Annual return rate in percent (e.g. 7)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: FrequencyArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compound(args: CompoundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let investment_input: InvestmentInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        InvestmentInput {
            initial_amount: args.initial,
            monthly_contribution: args.monthly,
            // Flags take percent; the core takes decimals
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")? / HUNDRED,
            time_horizon_years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding_frequency: args.frequency.into(),
        }
    };

    let output = compute_compounding(&investment_input)?;
    Ok(serde_json::to_value(output)?)
}
