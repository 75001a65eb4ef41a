//! Abstract elements of a solve: variables, literals, and the values a variable may take.

pub mod literal;
pub mod valuation;
