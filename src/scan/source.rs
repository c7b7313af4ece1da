//! The capability interface the scanner reads alignment records through.
//!
//! Opening a source is its constructor and closing it is its [`Drop`]
//! implementation, which leaves two operations to abstract over: reading the
//! header and reading the next record. Anything that can provide those (a BAM
//! file, an in-memory list of records in a test) can be scanned without the
//! scanning loop knowing where the records came from.

use std::collections::VecDeque;
use std::io;

use noodles::bam;
use noodles::sam::alignment::RecordBuf;

use crate::utils::cigar::contains_soft_clip;

/// An alignment record whose CIGAR operations can be inspected.
pub trait CigarRecord {
    /// Reports whether any CIGAR operation in this record is a soft clip.
    fn is_soft_clipped(&self) -> io::Result<bool>;
}

impl CigarRecord for bam::Record {
    fn is_soft_clipped(&self) -> io::Result<bool> {
        contains_soft_clip(self.cigar().iter().map(|result| result.map(|op| op.kind())))
    }
}

impl CigarRecord for RecordBuf {
    fn is_soft_clipped(&self) -> io::Result<bool> {
        contains_soft_clip(self.cigar().as_ref().iter().map(|op| Ok(op.kind())))
    }
}

/// A stream of alignment records preceded by a header.
pub trait AlignmentSource {
    /// The type of record handed out by [`AlignmentSource::read_record`].
    type Record: CigarRecord;

    /// Reads and validates the header. This must be called once, before the
    /// first record is read.
    fn read_header(&mut self) -> io::Result<()>;

    /// Reads the next record, returning `None` at the end of the stream. The
    /// returned record is only valid until the next call, which is free to
    /// reuse its buffer.
    fn read_record(&mut self) -> io::Result<Option<&Self::Record>>;
}

/// An [`AlignmentSource`] over records that are already in memory.
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: VecDeque<RecordBuf>,
    current: Option<RecordBuf>,
}

impl InMemorySource {
    /// Creates a new [`InMemorySource`] that yields `records` in order.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RecordBuf>,
    {
        Self {
            records: records.into_iter().collect(),
            current: None,
        }
    }
}

impl AlignmentSource for InMemorySource {
    type Record = RecordBuf;

    fn read_header(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read_record(&mut self) -> io::Result<Option<&Self::Record>> {
        self.current = self.records.pop_front();
        Ok(self.current.as_ref())
    }
}
