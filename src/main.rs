use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use git_testament::{git_testament, render_testament};
use scpercent::errors::{exit, ExitCode};
use scpercent::scan::command::ScanArgs;

git_testament!(TESTAMENT);

const AFTER_HELP: &str = "\
Notes:
  - For small BAM files, using 'samtools view' might be faster and more straightforward.
  - Excessive threads may not improve performance due to I/O limitations.

Alternative using samtools:
  samtools view -@ [threads] <BAM file> | awk '{ total_lines++; if ($6 ~ /S/) lines_with_s++ } \
END { printf \"%.2f\\n\", lines_with_s / total_lines * 100 }'";

/// Calculates the percentage of reads in a BAM file that contain soft
/// clipping (CIGAR 'S').
#[derive(Parser)]
#[command(name = "scpercent", after_long_help = AFTER_HELP)]
struct Cli {
    #[command(flatten)]
    args: ScanArgs,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

fn main() {
    let version = render_testament!(TESTAMENT);

    let parsed = Cli::command()
        .version(version)
        .try_get_matches()
        .and_then(|mut matches| Cli::from_arg_matches_mut(&mut matches));

    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(ExitCode::Failure as i32);
            }
        },
    };

    let mut level = tracing::Level::WARN;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(e) = scpercent::scan::command::scan(cli.args) {
        tracing::debug!("{:?}", e);
        exit(e, ExitCode::Failure);
    }
}
