pub mod amortize;
pub mod compound;
