//! Streaming content fingerprinting.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use blake3::Hasher;
use tracing::warn;

use dupesweep_core::Fingerprint;

/// Chunk size for streamed hashing; memory use is independent of file size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the BLAKE3 fingerprint of a file, reading in fixed-size chunks.
///
/// Never propagates a raw I/O error: a permission failure or a file
/// removed mid-scan degrades to `None`, logged for observability.
pub fn fingerprint_file(path: &Path) -> Option<Fingerprint> {
    match try_fingerprint(path) {
        Ok(fp) => Some(fp),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "fingerprinting failed");
            None
        }
    }
}

fn try_fingerprint(path: &Path) -> std::io::Result<Fingerprint> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint::new(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identical_files_share_a_fingerprint() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "same bytes").unwrap();
        fs::write(temp.path().join("b.txt"), "same bytes").unwrap();

        let a = fingerprint_file(&temp.path().join("a.txt")).unwrap();
        let b = fingerprint_file(&temp.path().join("b.txt")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_byte_difference_changes_fingerprint() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "same bytes").unwrap();
        fs::write(temp.path().join("b.txt"), "same byteZ").unwrap();

        let a = fingerprint_file(&temp.path().join("a.txt")).unwrap();
        let b = fingerprint_file(&temp.path().join("b.txt")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_large_file_spanning_multiple_chunks() {
        let temp = TempDir::new().unwrap();
        let content = vec![0x5au8; CHUNK_SIZE * 3 + 17];
        fs::write(temp.path().join("big.bin"), &content).unwrap();

        let fp = fingerprint_file(&temp.path().join("big.bin")).unwrap();
        assert_eq!(fp.0, *blake3::hash(&content).as_bytes());
    }

    #[test]
    fn test_missing_file_degrades_to_none() {
        let temp = TempDir::new().unwrap();
        assert!(fingerprint_file(&temp.path().join("gone.txt")).is_none());
    }
}
