//! Advent of Code 2023 puzzle solutions with automatic registration
//!
//! Each day is a module under [`year_2023`] whose `Solver` type derives
//! `AutoRegisterSolver`, so linking this crate is enough for the runner to
//! find it.

pub mod utils;
pub mod year_2023;
