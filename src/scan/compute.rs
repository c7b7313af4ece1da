//! Module holding the logic for counting soft-clipped records.

use std::fmt;

use tracing::debug;

use crate::errors::Result;
use crate::errors::ScanError;
use crate::scan::source::AlignmentSource;
use crate::scan::source::CigarRecord;
use crate::utils::display::RecordCounter;

/// The tallies accumulated over a single pass through a source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoftClipCounts {
    /// The number of records read.
    pub total: u64,

    /// The number of records containing at least one soft clip. Never larger
    /// than `total`.
    pub soft_clipped: u64,
}

impl SoftClipCounts {
    /// Tallies one record.
    pub fn record(&mut self, is_soft_clipped: bool) {
        self.total += 1;

        if is_soft_clipped {
            self.soft_clipped += 1;
        }
    }

    /// Computes the percentage of soft-clipped records. Fails with
    /// [`ScanError::EmptyInput`] when no records were counted.
    pub fn percentage(&self) -> Result<SoftClipPercentage> {
        if self.total == 0 {
            return Err(ScanError::EmptyInput);
        }

        let (a, b) = (self.soft_clipped as f64, self.total as f64);
        Ok(SoftClipPercentage(a / b * 100.0))
    }
}

/// The percentage of records that contain a soft clip, in `[0.0, 100.0]`.
/// Displays with exactly two decimal places.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SoftClipPercentage(pub f64);

impl fmt::Display for SoftClipPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Reads every record from a source whose header has already been read and
/// counts how many of them are soft-clipped.
///
/// Any record that fails to decode ends the scan with a
/// [`ScanError::Read`]; records are never skipped.
pub fn count_soft_clipped<S>(source: &mut S) -> Result<SoftClipCounts>
where
    S: AlignmentSource,
{
    let mut counts = SoftClipCounts::default();
    let mut counter = RecordCounter::default();

    loop {
        let number = counter.get() + 1;
        let read_error = |err| ScanError::Read {
            record: number,
            source: err,
        };

        let record = match source.read_record().map_err(read_error)? {
            Some(record) => record,
            None => break,
        };

        let is_soft_clipped = record.is_soft_clipped().map_err(read_error)?;
        counts.record(is_soft_clipped);
        counter.inc();
    }

    debug!(
        "scanned {} record(s), {} soft-clipped",
        counts.total, counts.soft_clipped
    );

    Ok(counts)
}
