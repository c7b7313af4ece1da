//! `scpercent` is a command line tool that reports the percentage of alignment
//! records in a BAM file whose CIGAR string contains at least one soft clip.
//! This package is composed of both a library crate, as well as a binary
//! crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `scpercent`. The scanning routine is written against
//! the [`scan::source::AlignmentSource`] trait, so any alignment reader that
//! can hand out records one at a time can be plugged into
//! [`scan::compute::count_soft_clipped`].
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod errors;
pub mod scan;
pub mod utils;
