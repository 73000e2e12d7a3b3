/*!
 * Content-based video file hashing.
 *
 * Computes the 64-bit moviehash used by the subtitle catalog to identify a
 * video independently of its file name: the file size plus the sums of the
 * first and last 64 KiB read as little-endian 64-bit integers, with
 * wraparound arithmetic throughout. The catalog expects this exact
 * algorithm, so the value must be bit-exact across implementations.
 */

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::errors::FingerprintError;

/// Size of each hashed window in bytes
const WINDOW_SIZE: u64 = 65536;

/// Minimum file size required to compute a hash (head and tail windows)
pub const MIN_FILE_SIZE: u64 = WINDOW_SIZE * 2;

/// A 64-bit content fingerprint of a video file
///
/// Two files with identical size and matching head/tail windows produce the
/// same hash; collisions are accepted, not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieHash(u64);

impl MovieHash {
    /// Compute the hash of the file at `path`
    ///
    /// Fails with [`FingerprintError::TooSmall`] when the file holds fewer
    /// than [`MIN_FILE_SIZE`] bytes. The file is opened read-only and never
    /// mutated.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FingerprintError> {
        let mut file = File::open(path.as_ref())?;
        let size = file.metadata()?.len();

        if size < MIN_FILE_SIZE {
            return Err(FingerprintError::TooSmall { size });
        }

        let mut hash = size;
        hash = hash.wrapping_add(sum_window(&mut file)?);

        file.seek(SeekFrom::Start(size - WINDOW_SIZE))?;
        hash = hash.wrapping_add(sum_window(&mut file)?);

        Ok(MovieHash(hash))
    }

    /// The raw 64-bit hash value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieHash {
    /// Renders as the fixed-width 16-digit lowercase hex form the catalog
    /// expects as a search key
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Sum one 64 KiB window as little-endian signed 64-bit words, wrapping
fn sum_window<R: Read>(reader: &mut R) -> Result<u64, FingerprintError> {
    let mut buf = vec![0u8; WINDOW_SIZE as usize];
    reader.read_exact(&mut buf)?;

    let mut sum = 0u64;
    for chunk in buf.chunks_exact(8) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        sum = sum.wrapping_add(i64::from_le_bytes(word) as u64);
    }

    Ok(sum)
}
