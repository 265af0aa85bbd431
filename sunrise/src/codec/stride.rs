//! Decoy stride key.

use super::errors::{CodecError, CodecResult};
use rand::Rng;
use std::fmt;

/// Smallest permitted stride
pub const MIN_STRIDE: u8 = 2;

/// Largest permitted stride
pub const MAX_STRIDE: u8 = 9;

/// Modulus selecting which entries carry a decoy prefix.
///
/// Stored on the wire as the single trailing digit of the encoded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride(u8);

impl Stride {
    /// Every valid stride, smallest first
    pub const ALL: [Stride; 8] = [
        Stride(2),
        Stride(3),
        Stride(4),
        Stride(5),
        Stride(6),
        Stride(7),
        Stride(8),
        Stride(9),
    ];

    /// Create a stride from its numeric value
    ///
    /// # Errors
    ///
    /// * `CodecError::StrideOutOfRange` - Value outside 2..=9
    pub fn new(value: u8) -> CodecResult<Self> {
        if (MIN_STRIDE..=MAX_STRIDE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CodecError::StrideOutOfRange(value))
        }
    }

    /// Draw a stride uniformly from 2..=9
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(MIN_STRIDE..=MAX_STRIDE))
    }

    /// Parse the trailing key character of an encoded string
    ///
    /// # Errors
    ///
    /// * `CodecError::InvalidStride` - Not an ASCII digit in 2..=9
    pub fn from_key(key: char) -> CodecResult<Self> {
        key.to_digit(10)
            .and_then(|digit| Self::new(digit as u8).ok())
            .ok_or(CodecError::InvalidStride(key))
    }

    /// The key character written at the end of an encoded string
    pub fn as_key(self) -> char {
        char::from(b'0' + self.0)
    }

    /// Numeric value
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether the entry at `index` carries a decoy
    pub fn marks(self, index: usize) -> bool {
        index % usize::from(self.0) == 0
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
