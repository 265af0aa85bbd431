//! Per-encoding nonce.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Random filler interleaved with identity fields.
///
/// Carries no meaning and is discarded on decode. A fresh one is drawn for
/// every encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    text: String,
}

impl Nonce {
    /// Draw a random v4 UUID from `rng`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.random();
        Self::from_uuid(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Use a fixed UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            text: uuid.hyphenated().to_string(),
        }
    }

    /// The five hyphen groups (8-4-4-4-12 hex digits)
    pub fn segments(&self) -> Vec<&str> {
        self.text.split('-').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_segments_follow_uuid_grouping() {
        let mut rng = StdRng::seed_from_u64(42);
        let nonce = Nonce::generate(&mut rng);
        let lengths: Vec<usize> = nonce.segments().iter().map(|s| s.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(
            nonce
                .segments()
                .iter()
                .all(|s| s.chars().all(|c| c.is_ascii_hexdigit()))
        );
    }

    #[test]
    fn test_generated_nonce_is_version_four() {
        let mut rng = StdRng::seed_from_u64(1);
        let nonce = Nonce::generate(&mut rng);
        assert!(nonce.segments()[2].starts_with('4'));
    }

    #[test]
    fn test_fresh_nonce_per_draw() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_ne!(Nonce::generate(&mut rng), Nonce::generate(&mut rng));
    }
}
