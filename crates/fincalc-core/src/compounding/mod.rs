//! Compound-interest growth projection with periodic contributions.

pub mod growth;

pub use growth::{
    compute_compounding, CompoundingFrequency, CompoundingOutput, InvestmentInput, YearRow,
};
