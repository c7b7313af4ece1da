//! Utilities related to CIGAR string processing.

use std::io;

use noodles::sam::alignment::record::cigar::op::Kind;

/// Reports whether a sequence of CIGAR operation kinds contains a soft clip.
///
/// Operations are visited left to right and the scan stops at the first soft
/// clip, so a record is only ever counted once no matter how many soft clips
/// it carries. The operations are fallible because lazily decoded records
/// (such as BAM records) only decode their CIGAR as it is walked; the first
/// decoding error is returned as-is.
pub fn contains_soft_clip<I>(kinds: I) -> io::Result<bool>
where
    I: IntoIterator<Item = io::Result<Kind>>,
{
    for kind in kinds {
        if kind? == Kind::SoftClip {
            return Ok(true);
        }
    }

    Ok(false)
}
