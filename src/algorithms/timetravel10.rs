use std::sync::Arc;

use super::permutation::{AlgoOrder, TwistedLabel};
use super::primitives::PrimitiveCatalog;
use super::HashAlgorithm;
use crate::error::Result;
use crate::params::{DIGEST_LEN, HEADER_LEN, NATIVE_DIGEST_LEN};

/// TimeTravel10 hash chain
///
/// 1. The block timestamp picks one of 40320 orders of ten X11 primitives
/// 2. The 80-byte header goes through the first primitive
/// 3. Each later primitive hashes the previous 64-byte output
/// 4. The first 32 bytes of the last output are the proof-of-work hash
///
/// Proof-of-work of Bitcore (BTX)
#[derive(Debug, Clone)]
pub struct TimeTravel10 {
    catalog: Arc<PrimitiveCatalog>,
    ntime: u32,
    order: AlgoOrder,
}

impl TimeTravel10 {
    pub fn new(catalog: Arc<PrimitiveCatalog>, ntime: u32) -> Self {
        Self {
            catalog,
            ntime,
            order: AlgoOrder::for_ntime(ntime),
        }
    }

    pub fn ntime(&self) -> u32 {
        self.ntime
    }

    pub fn order(&self) -> &AlgoOrder {
        &self.order
    }

    pub fn label(&self) -> TwistedLabel {
        TwistedLabel::for_ntime(self.ntime)
    }
}

impl HashAlgorithm for TimeTravel10 {
    fn name(&self) -> &str {
        "timetravel10"
    }

    fn hash(&self, header: &[u8; HEADER_LEN]) -> Result<[u8; DIGEST_LEN]> {
        chain(&self.catalog, header, &self.order)
    }
}

/// Scratch space for one chain evaluation
///
/// Step 0 writes `front`; after that odd steps read `front` and write
/// `back`, even steps read `back` and write `front`.
struct ChainState {
    front: [u8; NATIVE_DIGEST_LEN],
    back: [u8; NATIVE_DIGEST_LEN],
}

impl ChainState {
    fn new() -> Self {
        Self {
            front: [0u8; NATIVE_DIGEST_LEN],
            back: [0u8; NATIVE_DIGEST_LEN],
        }
    }

    /// (source, destination) for a step after the first
    fn buffers(&mut self, step: usize) -> (&[u8; NATIVE_DIGEST_LEN], &mut [u8; NATIVE_DIGEST_LEN]) {
        let Self { front, back } = self;
        if step % 2 == 1 {
            (&*front, back)
        } else {
            (&*back, front)
        }
    }

    /// Buffer written by `step`
    fn written_by(&self, step: usize) -> &[u8; NATIVE_DIGEST_LEN] {
        if step % 2 == 1 {
            &self.back
        } else {
            &self.front
        }
    }
}

/// Run the ten-step chain over `input` in the given order
pub fn chain(
    catalog: &PrimitiveCatalog,
    input: &[u8; HEADER_LEN],
    order: &AlgoOrder,
) -> Result<[u8; DIGEST_LEN]> {
    let mut state = ChainState::new();
    let [first, rest @ ..] = order.primitives();

    catalog.digest_into(*first, input, &mut state.front)?;
    for (offset, primitive) in rest.iter().enumerate() {
        let (source, destination) = state.buffers(offset + 1);
        catalog.digest_into(*primitive, source, destination)?;
    }

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&state.written_by(rest.len())[..DIGEST_LEN]);
    Ok(digest)
}
