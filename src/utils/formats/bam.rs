//! Utilities related to opening and reading Binary Alignment Map (BAM) files.

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;

use noodles::bam;
use noodles::bgzf;
use tracing::debug;

use crate::errors::Result;
use crate::errors::ScanError;
use crate::scan::source::AlignmentSource;

/// The largest number of decompression workers a [`BamSource`] will spawn.
pub const MAX_WORKER_COUNT: usize = 1024;

/// The first four bytes of every BGZF block: the gzip magic, the deflate
/// method, and the `FEXTRA` flag.
const BGZF_MAGIC: [u8; 4] = [0x1f, 0x8b, 0x08, 0x04];

//==================================//
// Binary Alignment Map (BAM) files //
//==================================//

/// Attempts to open a BGZF-compressed file from a given source. The leading
/// bytes are checked so that plain text or non-BGZF files are rejected before
/// any decompression is attempted. Note that this function is private because
/// it should never be called by an external module (use [`BamSource::open`]
/// instead).
fn open<P>(src: P) -> io::Result<File>
where
    P: AsRef<Path>,
{
    let mut file = File::open(src)?;

    let mut magic = [0; BGZF_MAGIC.len()];
    match file.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "file is too short to be a BGZF container",
            ))
        }
        Err(e) => return Err(e),
    }

    if magic != BGZF_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "not a BGZF-compressed file",
        ));
    }

    file.rewind()?;
    Ok(file)
}

/// A BAM file opened for a single linear pass.
///
/// The source owns the file handle, the (possibly multithreaded) BGZF decoder
/// and one record buffer that is reused for every read. Dropping the source
/// closes the file and joins any decompression workers.
pub struct BamSource {
    /// The path the file was opened from.
    path: PathBuf,

    /// A reader for the BAM file.
    reader: bam::io::Reader<Box<dyn Read>>,

    /// The record buffer handed out by [`AlignmentSource::read_record`].
    record: bam::Record,
}

impl BamSource {
    /// Opens a BAM file and configures its decompression with `worker_count`
    /// workers. A single worker decodes on the calling thread; any more and
    /// blocks are inflated ahead of the reader on a worker pool.
    pub fn open<P>(src: P, worker_count: NonZeroUsize) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = src.as_ref().to_path_buf();

        // (1) Open the file and make sure it looks like a BGZF container.
        debug!("opening BAM file: {}", path.display());
        let file = open(&path).map_err(|source| ScanError::Open {
            path: path.clone(),
            source,
        })?;

        // (2) Apply the decompression worker count.
        if worker_count.get() > MAX_WORKER_COUNT {
            return Err(ScanError::Config {
                requested: worker_count.get(),
                max: MAX_WORKER_COUNT,
            });
        }

        debug!("using {} decompression worker(s)", worker_count);
        let decoder: Box<dyn Read> = if worker_count.get() == 1 {
            Box::new(bgzf::Reader::new(file))
        } else {
            Box::new(bgzf::MultithreadedReader::with_worker_count(
                worker_count,
                file,
            ))
        };

        Ok(Self {
            path,
            reader: bam::io::Reader::from(decoder),
            record: bam::Record::default(),
        })
    }

    /// Gets the path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlignmentSource for BamSource {
    type Record = bam::Record;

    fn read_header(&mut self) -> io::Result<()> {
        let header = self.reader.read_header()?;
        debug!(
            "read header with {} reference sequence(s)",
            header.reference_sequences().len()
        );
        Ok(())
    }

    fn read_record(&mut self) -> io::Result<Option<&Self::Record>> {
        match self.reader.read_record(&mut self.record)? {
            0 => Ok(None),
            _ => Ok(Some(&self.record)),
        }
    }
}
