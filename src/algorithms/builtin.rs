//! Chain primitives whose crates do not implement `digest` 0.10

use cubehash::CubeHashParams;

use super::primitives::HashFunction;
use crate::params::NATIVE_DIGEST_LEN;

/// BLAKE-512 (final round version) backed by `blake-hash`
///
/// `blake-hash` is still on `digest` 0.9, so its own `Digest` trait drives it.
#[derive(Clone, Default)]
pub struct Blake512 {
    initial: blake_hash::Blake512,
}

impl HashFunction for Blake512 {
    fn digest_into(&self, input: &[u8], out: &mut [u8; NATIVE_DIGEST_LEN]) {
        let mut state = self.initial.clone();
        blake_hash::Digest::update(&mut state, input);
        out.copy_from_slice(&blake_hash::Digest::finalize(state));
    }
}

/// CubeHash16/32-512 parameters: revision 2 runs 160 initial and 160 final rounds
const CUBEHASH512: CubeHashParams = CubeHashParams {
    revision: 2,
    hash_len_bits: 512,
};

/// CubeHash16/32-512 backed by `cubehash`
///
/// The crate's hasher is not `Clone`, so every call runs the init rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeHash512;

impl HashFunction for CubeHash512 {
    fn digest_into(&self, input: &[u8], out: &mut [u8; NATIVE_DIGEST_LEN]) {
        let mut state = cubehash::CubeHashBest::new(CUBEHASH512);
        state.update(input);
        out.copy_from_slice(&state.finalize());
    }
}
