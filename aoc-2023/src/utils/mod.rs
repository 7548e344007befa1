//! Parsing, grid and integer helpers used by the daily solvers

pub mod grid;
pub mod math;
pub mod parse;
