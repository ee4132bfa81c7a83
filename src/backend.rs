/// Mining backend abstraction layer (Hexagonal Architecture - Port)
/// Lets the surrounding miner drive nonce scanning without knowing where it runs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::algorithms::primitives::PrimitiveCatalog;
use crate::algorithms::timetravel10::TimeTravel10;
use crate::algorithms::HashAlgorithm;
use crate::error::Result;
use crate::mining::{digest_word7, prepare_header, set_header_nonce, Work};
use crate::params::DIGEST_LEN;

/// How a scan over a nonce range ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A nonce met the work's target; it was written into the work data
    Found,
    /// Every nonce up to `max_nonce` was tried
    Exhausted,
    /// The cancel flag was raised between two nonces
    Cancelled,
}

/// Result of a mining attempt
#[derive(Clone, Debug)]
pub struct ScanResult {
    pub outcome: ScanOutcome,
    /// Last nonce hashed (or the start nonce if none was); resume from here
    pub last_nonce: u32,
    pub hashes_computed: u64,
    pub hash: Option<[u8; DIGEST_LEN]>,
}

impl ScanResult {
    pub fn found_share(&self) -> bool {
        self.outcome == ScanOutcome::Found
    }

    pub fn nonce(&self) -> Option<u32> {
        self.found_share().then_some(self.last_nonce)
    }
}

/// Mining backend trait - abstract interface for nonce scanning
pub trait MiningBackend: Send + Sync {
    /// Scan nonces `start_nonce + 1 ..= max_nonce` of `work`
    ///
    /// # Arguments
    /// * `work` - Work item; its nonce field is overwritten on success
    /// * `start_nonce` - Last nonce already covered
    /// * `max_nonce` - Inclusive end of the range
    /// * `cancel` - Checked once per nonce
    fn scan(
        &self,
        work: &mut Work,
        start_nonce: u32,
        max_nonce: u32,
        cancel: &AtomicBool,
    ) -> Result<ScanResult>;

    /// Get the algorithm name
    fn algorithm_name(&self) -> &str;
}

/// Single-threaded CPU scanner
///
/// Cheap to clone; clones share the primitive catalog.
#[derive(Debug, Clone)]
pub struct CpuBackend {
    catalog: Arc<PrimitiveCatalog>,
}

impl CpuBackend {
    pub fn new(catalog: Arc<PrimitiveCatalog>) -> Self {
        Self { catalog }
    }
}

impl MiningBackend for CpuBackend {
    fn scan(
        &self,
        work: &mut Work,
        start_nonce: u32,
        max_nonce: u32,
        cancel: &AtomicBool,
    ) -> Result<ScanResult> {
        let algo = TimeTravel10::new(self.catalog.clone(), work.ntime.value());
        let result = scan_nonces(&algo, work, start_nonce, max_nonce, cancel)?;

        if let Some(hash) = &result.hash {
            tracing::debug!(
                "nonce {:08x} full 256-bit target met: {}",
                result.last_nonce,
                algo.meets_target(hash, work.target.as_bytes())
            );
        }
        Ok(result)
    }

    fn algorithm_name(&self) -> &str {
        "timetravel10"
    }
}

/// Try successive nonces until one meets the work's target word
///
/// The order is fixed by the work's ntime, so it is computed once for the
/// whole range.
pub fn scan_nonces<A: HashAlgorithm>(
    algo: &A,
    work: &mut Work,
    start_nonce: u32,
    max_nonce: u32,
    cancel: &AtomicBool,
) -> Result<ScanResult> {
    let target_word = work.target.word7();
    let mut header = prepare_header(&work.data, start_nonce);
    let mut nonce = start_nonce;
    let mut hashes: u64 = 0;

    tracing::debug!(
        "{} scan {:08x}..={:08x} ntime {} htarget {:08x}",
        algo.name(),
        start_nonce,
        max_nonce,
        work.ntime,
        target_word
    );

    let outcome = loop {
        if nonce >= max_nonce {
            break ScanOutcome::Exhausted;
        }
        if cancel.load(Ordering::SeqCst) {
            break ScanOutcome::Cancelled;
        }

        nonce += 1;
        set_header_nonce(&mut header, nonce);
        let hash = algo.hash(&header)?;
        hashes += 1;

        let hash_word = digest_word7(&hash);
        tracing::trace!("nonce {:08x} hash word {:08x}", nonce, hash_word);

        if hash_word <= target_word {
            work.set_nonce(nonce);
            tracing::debug!("share found at nonce {:08x} after {} hashes", nonce, hashes);
            return Ok(ScanResult {
                outcome: ScanOutcome::Found,
                last_nonce: nonce,
                hashes_computed: hashes,
                hash: Some(hash),
            });
        }
    };

    tracing::debug!("scan {:?} at nonce {:08x} after {} hashes", outcome, nonce, hashes);
    Ok(ScanResult {
        outcome,
        last_nonce: nonce,
        hashes_computed: hashes,
        hash: None,
    })
}
