use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::amortization::{compute_amortization, LoanInput, PaymentFrequency};

use crate::input;

const HUNDRED: Decimal = dec!(100);

/// Payment frequency flag, mapped onto the core enum.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    BiWeekly,
    Weekly,
}

impl From<FrequencyArg> for PaymentFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => PaymentFrequency::Monthly,
            FrequencyArg::BiWeekly => PaymentFrequency::BiWeekly,
            FrequencyArg::Weekly => PaymentFrequency::Weekly,
        }
    }
}

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct AmortizeArgs {
    /// Property purchase price
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Cash down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Amortization period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Payment frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: FrequencyArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment: args.down_payment,
            // Flags take percent; the core takes decimals
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")? / HUNDRED,
            amortization_years: args.years.ok_or("--years is required (or provide --input)")?,
            payment_frequency: args.frequency.into(),
        }
    };

    let output = compute_amortization(&loan_input)?;
    Ok(serde_json::to_value(output)?)
}
