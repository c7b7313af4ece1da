//! Functionality relating to the `scpercent` command itself.

use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;
use tracing::info;

use crate::errors::Result;
use crate::errors::ScanError;
use crate::scan::compute::count_soft_clipped;
use crate::scan::compute::SoftClipPercentage;
use crate::scan::source::AlignmentSource;
use crate::utils::args::threads_in_range;
use crate::utils::args::DEFAULT_THREADS;
use crate::utils::formats::bam::BamSource;

/// Clap arguments for the `scpercent` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the BAM file.
    #[arg(value_name = "BAM")]
    pub src: PathBuf,

    /// Number of threads to use for decompression. Excessive threads may not
    /// improve performance due to I/O limitations.
    #[arg(value_name = "THREADS", default_value_t = DEFAULT_THREADS)]
    #[arg(value_parser = threads_in_range, allow_negative_numbers = true)]
    pub threads: NonZeroUsize,
}

/// Scans the BAM file at `src` with `threads` decompression workers and
/// returns the percentage of its records that contain a soft clip.
///
/// The file, the decoder, and the record buffer are all released before this
/// function returns, whether the scan succeeded or not.
pub fn scan_path<P>(src: P, threads: NonZeroUsize) -> Result<SoftClipPercentage>
where
    P: AsRef<Path>,
{
    let src = src.as_ref();

    // (1) Open the file and apply the thread count.
    let mut source = BamSource::open(src, threads)?;

    // (2) Read the header.
    debug!("reading the header");
    source.read_header().map_err(|err| ScanError::Header {
        path: src.to_path_buf(),
        source: err,
    })?;

    // (3) Count the records.
    debug!("counting soft-clipped records");
    let counts = count_soft_clipped(&mut source)?;
    drop(source);

    // (4) Compute the percentage.
    counts.percentage()
}

/// Main function for the `scpercent` command.
pub fn scan(args: ScanArgs) -> anyhow::Result<()> {
    info!("Starting scan...");
    debug!("  [*] Source: {}", args.src.display());
    debug!("  [*] Threads: {}", args.threads);

    let percentage = scan_path(&args.src, args.threads)?;
    println!("{}", percentage);

    info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use noodles::sam::alignment::record::cigar::op::Kind;
    use noodles::sam::alignment::record::cigar::Op;

    use super::*;
    use crate::utils::formats::bam::fixtures::empty_raw_header;
    use crate::utils::formats::bam::fixtures::write_bam;
    use crate::utils::formats::bam::fixtures::write_bgzf;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScanArgs,
    }

    fn parse(argv: &[&str]) -> std::result::Result<ScanArgs, clap::Error> {
        TestCli::try_parse_from(std::iter::once("scpercent").chain(argv.iter().copied()))
            .map(|cli| cli.args)
    }

    fn threads(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn ten_records_three_clipped() -> Vec<Vec<Op>> {
        (0..10)
            .map(|i| match i {
                0 => vec![Op::new(Kind::SoftClip, 4), Op::new(Kind::Match, 46)],
                3 => vec![
                    Op::new(Kind::Match, 20),
                    Op::new(Kind::SoftClip, 2),
                    Op::new(Kind::Match, 20),
                ],
                9 => vec![
                    Op::new(Kind::SoftClip, 1),
                    Op::new(Kind::Match, 48),
                    Op::new(Kind::SoftClip, 1),
                ],
                _ => vec![
                    Op::new(Kind::HardClip, 5),
                    Op::new(Kind::Match, 45),
                    Op::new(Kind::Deletion, 2),
                    Op::new(Kind::Match, 5),
                ],
            })
            .collect()
    }

    #[test]
    fn test_three_of_ten_records() -> anyhow::Result<()> {
        let file = write_bam(&ten_records_three_clipped())?;
        let percentage = scan_path(file.path(), threads(1))?;
        assert_eq!(percentage.to_string(), "30.00");
        Ok(())
    }

    #[test]
    fn test_single_unclipped_record() -> anyhow::Result<()> {
        let file = write_bam(&[vec![Op::new(Kind::Match, 50)]])?;
        let percentage = scan_path(file.path(), threads(1))?;
        assert_eq!(percentage.to_string(), "0.00");
        Ok(())
    }

    #[test]
    fn test_thread_count_does_not_change_the_result() -> anyhow::Result<()> {
        let file = write_bam(&ten_records_three_clipped())?;
        let single = scan_path(file.path(), threads(1))?;
        let multi = scan_path(file.path(), threads(8))?;
        assert_eq!(single, multi);
        Ok(())
    }

    #[test]
    fn test_scanning_twice_is_idempotent() -> anyhow::Result<()> {
        let file = write_bam(&ten_records_three_clipped())?;
        let first = scan_path(file.path(), DEFAULT_THREADS)?;
        let second = scan_path(file.path(), DEFAULT_THREADS)?;
        assert_eq!(first.to_string(), second.to_string());
        Ok(())
    }

    #[test]
    fn test_header_only_file_has_no_lines() -> anyhow::Result<()> {
        let file = write_bam(&[])?;
        let err = scan_path(file.path(), threads(2)).unwrap_err();
        assert!(matches!(err, ScanError::EmptyInput));
        assert_eq!(err.to_string(), "No lines found.");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_open_error() {
        let err = scan_path("nonexistent.bam", threads(1)).unwrap_err();
        assert!(matches!(err, ScanError::Open { .. }));
    }

    #[test]
    fn test_malformed_header_is_a_header_error() -> anyhow::Result<()> {
        let file = write_bgzf(b"BAM")?;
        let err = scan_path(file.path(), threads(1)).unwrap_err();
        assert!(matches!(err, ScanError::Header { .. }));
        Ok(())
    }

    #[test]
    fn test_truncated_record_is_a_read_error() -> anyhow::Result<()> {
        let mut data = empty_raw_header();
        data.extend_from_slice(&64u32.to_le_bytes());
        let file = write_bgzf(&data)?;

        let err = scan_path(file.path(), threads(1)).unwrap_err();
        assert!(matches!(err, ScanError::Read { record: 1, .. }));
        Ok(())
    }

    #[test]
    fn test_parse_defaults_to_eight_threads() -> anyhow::Result<()> {
        let args = parse(&["sample.bam"])?;
        assert_eq!(args.src, PathBuf::from("sample.bam"));
        assert_eq!(args.threads.get(), 8);
        Ok(())
    }

    #[test]
    fn test_parse_explicit_thread_count() -> anyhow::Result<()> {
        let args = parse(&["sample.bam", "4"])?;
        assert_eq!(args.threads.get(), 4);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_thread_counts() {
        for bad in ["0", "-3", "abc"] {
            assert!(parse(&["sample.bam", bad]).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_parse_requires_a_source() {
        assert!(parse(&[]).is_err());
    }
}
