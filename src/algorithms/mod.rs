/// Mining algorithm trait and implementations
pub mod builtin;
pub mod permutation;
pub mod primitives;
pub mod timetravel10;

use std::cmp::Ordering;

use crate::error::Result;
use crate::params::{DIGEST_LEN, HEADER_LEN};

/// Trait for mining hash algorithms
pub trait HashAlgorithm {
    /// Get the algorithm name
    fn name(&self) -> &str;

    /// Compute the proof-of-work hash of a prepared 80-byte block header
    fn hash(&self, header: &[u8; HEADER_LEN]) -> Result<[u8; DIGEST_LEN]>;

    /// Check a hash against a full 256-bit target
    /// Both are little-endian (byte 31 is most significant); equal counts as a hit
    fn meets_target(&self, hash: &[u8; DIGEST_LEN], target: &[u8; DIGEST_LEN]) -> bool {
        hash.iter().rev().cmp(target.iter().rev()) != Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl HashAlgorithm for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn hash(&self, _header: &[u8; HEADER_LEN]) -> Result<[u8; DIGEST_LEN]> {
            Ok([0u8; DIGEST_LEN])
        }
    }

    #[test]
    fn test_meets_target_little_endian() {
        let mut hash = [0xFFu8; 32];
        hash[31] = 0x00;
        hash[30] = 0x01;

        let mut target = [0u8; 32];
        target[31] = 0x00;
        target[30] = 0x02;

        // Most significant bytes decide, low bytes are irrelevant
        assert!(Fixed.meets_target(&hash, &target));
        assert!(!Fixed.meets_target(&target, &hash));

        // Equal is accepted
        assert!(Fixed.meets_target(&target, &target));
    }
}
