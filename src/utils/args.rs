//! Utilities related to the parsing of arguments.

use std::num::NonZeroUsize;

//===================//
// Number of Threads //
//===================//

/// The number of decompression workers used when none is given on the command
/// line.
pub const DEFAULT_THREADS: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(n) => n,
    None => unreachable!(),
};

/// Utility method to parse the thread count passed in on the command line and
/// ensure it is a positive integer. Anything with trailing garbage, a sign, or
/// a value of zero is rejected.
pub fn threads_in_range(threads_raw: &str) -> Result<NonZeroUsize, String> {
    let invalid = || format!("Invalid number of threads '{}'.", threads_raw);

    if !threads_raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    threads_raw
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(invalid)
}
