//! Algorithm constants for TimeTravel10

/// Reference instant (seconds) the permutation schedule counts from
pub const ANCHOR_TIME: u32 = 1_492_973_331;

/// Number of chained hash functions per evaluation
pub const HASH_FUNC_COUNT: usize = 10;

/// Size of the permutation schedule (8!, not 10!)
///
/// Only the last eight positions of the ordering ever move, so the first
/// two chain steps are always Blake then BMW.
pub const PERMUTATION_COUNT: u32 = 40_320;

/// Easiest accepted value of digest word 7
pub const DIFF1_TARGET_WORD: u32 = 0x0000_ffff;

/// ntime used when a work item carries none
pub const DEFAULT_NTIME: &str = "00000000";

/// Block header length fed to the first chain step
pub const HEADER_LEN: usize = 80;

/// Byte offset of the 32-bit nonce inside the header
pub const NONCE_OFFSET: usize = 76;

/// Output size every catalog primitive must produce
pub const NATIVE_DIGEST_LEN: usize = 64;

/// Length of the final proof-of-work digest
pub const DIGEST_LEN: usize = 32;
