//! Utilities that are used across `scpercent`.

pub mod args;
pub mod cigar;
pub mod display;
pub mod formats;
