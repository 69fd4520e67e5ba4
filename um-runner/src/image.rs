//! Program image loading: the byte -> word conversion collaborator.
//!
//! A program image is a file whose length is divisible by 4. Each group of
//! four consecutive bytes packs into one big-endian 32-bit word, and the
//! whole sequence becomes the initial contents of array 0.

use std::fmt;

/// The program image's byte length was not a multiple of 4, so it cannot be
/// packed into whole 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageError {
    pub len: usize,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "program image length {} is not a multiple of 4 bytes",
            self.len
        )
    }
}

impl std::error::Error for ImageError {}

/// Pack a byte buffer into big-endian 32-bit words (A is most significant).
pub fn words_from_be_bytes(bytes: &[u8]) -> Result<Vec<u32>, ImageError> {
    if bytes.len() % 4 != 0 {
        return Err(ImageError { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// The inverse of [`words_from_be_bytes`]. Used only by tests exercising the
/// round-trip property; not part of the running program's data path.
#[must_use]
pub fn be_bytes_from_words(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}
