//! Functionality related to scanning a BAM file for soft-clipped records.

pub mod command;
pub mod compute;
pub mod source;
