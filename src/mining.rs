use std::fmt;
use std::str::FromStr;

use crate::algorithms::permutation::{AlgoOrder, TwistedLabel};
use crate::algorithms::primitives::PrimitiveCatalog;
use crate::algorithms::timetravel10::chain;
use crate::error::{Result, TimeTravelError};
use crate::params::{DIFF1_TARGET_WORD, DIGEST_LEN, HEADER_LEN, NONCE_OFFSET};

/// Block timestamp as sent by the pool (8 hex digits, big-endian)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ntime(u32);

impl Ntime {
    pub fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Parse the pool's ntime field. Anything but exactly 4 hex bytes is rejected.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix("0x").unwrap_or(hex);
        if digits.len() != 8 {
            return Err(TimeTravelError::MalformedNtime {
                input: hex.to_string(),
                reason: format!("expected 8 hex characters, got {}", digits.len()),
            });
        }

        let mut bytes = [0u8; 4];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| TimeTravelError::MalformedNtime {
            input: hex.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }

    pub fn order(&self) -> AlgoOrder {
        AlgoOrder::for_ntime(self.0)
    }

    pub fn label(&self) -> TwistedLabel {
        TwistedLabel::for_ntime(self.0)
    }
}

impl FromStr for Ntime {
    type Err = TimeTravelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Ntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Build the chain input from raw work data
///
/// The first 19 words of `data` are little-endian and get byte-swapped;
/// the nonce is appended big-endian.
pub fn prepare_header(data: &[u8; HEADER_LEN], nonce: u32) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    for (dst, src) in header[..NONCE_OFFSET]
        .chunks_exact_mut(4)
        .zip(data[..NONCE_OFFSET].chunks_exact(4))
    {
        dst.copy_from_slice(src);
        dst.reverse();
    }
    set_header_nonce(&mut header, nonce);
    header
}

pub fn set_header_nonce(header: &mut [u8; HEADER_LEN], nonce: u32) {
    header[NONCE_OFFSET..].copy_from_slice(&nonce.to_be_bytes());
}

/// Digest word 7 as the scan loop compares it (native little-endian)
pub fn digest_word7(digest: &[u8; DIGEST_LEN]) -> u32 {
    u32::from_le_bytes([digest[28], digest[29], digest[30], digest[31]])
}

/// Digest word 7 normalized big-endian, as share verification reads it
pub fn digest_word7_be(digest: &[u8; DIGEST_LEN]) -> u32 {
    u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]])
}

/// 256-bit share target, little-endian (byte 31 most significant)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target([u8; 32]);

impl Target {
    pub const MAX: Target = Target([0xFF; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Target whose only non-zero word is word 7
    pub fn from_word7(word: u32) -> Self {
        let mut bytes = [0u8; 32];
        bytes[28..].copy_from_slice(&word.to_le_bytes());
        Self(bytes)
    }

    pub fn word7(&self) -> u32 {
        digest_word7(&self.0)
    }

    /// Convert nBits compact format to a full 256-bit target
    pub fn from_compact(nbits: u32) -> Self {
        let mut target = [0u8; 32];

        let exponent = (nbits >> 24) as usize;
        let mantissa = nbits & 0x00FF_FFFF;

        if exponent <= 3 {
            // Small exponent: shift right
            let shifted = mantissa >> (8 * (3 - exponent));
            target[..4].copy_from_slice(&shifted.to_le_bytes());
            return Self(target);
        }

        for (i, byte) in mantissa.to_le_bytes()[..3].iter().enumerate() {
            let position = exponent - 3 + i;
            if position < 32 {
                target[position] = *byte;
            } else if *byte != 0 {
                // Larger than 256 bits
                return Self::MAX;
            }
        }

        Self(target)
    }

    /// Parse 64 hex characters in storage (little-endian) order
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix("0x").unwrap_or(hex);
        if digits.len() != 64 {
            return Err(TimeTravelError::MalformedTarget(format!(
                "expected 64 hex characters, got {}",
                digits.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl FromStr for Target {
    type Err = TimeTravelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Outcome of checking one nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Above even the difficulty-1 threshold
    Reject,
    /// Valid at difficulty 1 but not at the work's target
    BelowNetworkFloor,
    MeetsTarget,
}

impl Verdict {
    pub fn classify(hash_word: u32, target_word: u32) -> Self {
        if hash_word > DIFF1_TARGET_WORD {
            Self::Reject
        } else if hash_word > target_word {
            Self::BelowNetworkFloor
        } else {
            Self::MeetsTarget
        }
    }

    /// Conventional integer code: -1, 0, 1
    pub fn code(self) -> i32 {
        match self {
            Self::Reject => -1,
            Self::BelowNetworkFloor => 0,
            Self::MeetsTarget => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Reject => "reject",
            Self::BelowNetworkFloor => "below target",
            Self::MeetsTarget => "meets target",
        };
        write!(f, "{}", text)
    }
}

/// A unit of work: raw header data, share target and block timestamp
#[derive(Debug, Clone)]
pub struct Work {
    pub data: [u8; HEADER_LEN],
    pub target: Target,
    pub ntime: Ntime,
}

impl Work {
    pub fn new(data: [u8; HEADER_LEN], target: Target, ntime: Ntime) -> Self {
        Self { data, target, ntime }
    }

    /// Nonce stored in the data, big-endian at offset 76
    pub fn nonce(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[NONCE_OFFSET..]);
        u32::from_be_bytes(bytes)
    }

    pub fn set_nonce(&mut self, nonce: u32) {
        self.data[NONCE_OFFSET..].copy_from_slice(&nonce.to_be_bytes());
    }
}

/// Three-way check of `nonce` against difficulty 1 and the work's target
///
/// Digest word 7 is read big-endian here, unlike the scan loop's direct
/// comparison; the target word stays little-endian.
pub fn verify(catalog: &PrimitiveCatalog, work: &Work, nonce: u32) -> Result<Verdict> {
    let header = prepare_header(&work.data, nonce);
    let digest = chain(catalog, &header, &work.ntime.order())?;

    let hash_word = digest_word7_be(&digest);
    let target_word = work.target.word7();
    tracing::debug!(
        "htarget {:08x} diff1 {:08x} hash {:08x}",
        target_word,
        DIFF1_TARGET_WORD,
        hash_word
    );

    Ok(Verdict::classify(hash_word, target_word))
}

/// Recompute the hash of a work item with its stored nonce
pub fn regen_hash(catalog: &PrimitiveCatalog, work: &Work) -> Result<[u8; DIGEST_LEN]> {
    let header = prepare_header(&work.data, work.nonce());
    chain(catalog, &header, &work.ntime.order())
}
