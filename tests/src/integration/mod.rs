//! # Integration Flows
//!
//! Whole-network scenarios: the reference store/lookup run, large joins
//! under bucket pressure, config loading and concurrent drivers.

pub mod flows;
