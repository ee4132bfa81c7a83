#![allow(dead_code)]

use sha2::{Digest, Sha512};
use std::sync::Arc;

use timetravel_miner::params::NATIVE_DIGEST_LEN;
use timetravel_miner::{HashFunction, Primitive, PrimitiveCatalog};

/// SHA-512 over a one-byte tag followed by the input
///
/// Stands in for the whole primitive set (Luffa, SHAvite and SIMD have no
/// built-in); the tag keeps the slots distinct so ordering still matters.
pub struct TaggedSha512(pub u8);

impl HashFunction for TaggedSha512 {
    fn digest_into(&self, input: &[u8], out: &mut [u8; NATIVE_DIGEST_LEN]) {
        let digest = Sha512::new().chain_update([self.0]).chain_update(input).finalize();
        out.copy_from_slice(&digest);
    }
}

/// Every slot (Echo included) is tagged SHA-512 with tag = primitive id
pub fn tagged_catalog() -> Arc<PrimitiveCatalog> {
    let catalog = Primitive::ALL
        .iter()
        .fold(PrimitiveCatalog::builder(), |b, p| b.register(*p, TaggedSha512(p.id())))
        .build()
        .expect("all slots registered");
    Arc::new(catalog)
}

/// Tagged SHA-512 everywhere except the built-in Keccak-512 slot
pub fn keccak_catalog() -> Arc<PrimitiveCatalog> {
    let catalog = Primitive::ALL
        .iter()
        .filter(|p| **p != Primitive::Keccak)
        .fold(PrimitiveCatalog::builder(), |b, p| b.register(*p, TaggedSha512(p.id())))
        .build()
        .expect("all slots registered");
    Arc::new(catalog)
}

pub fn hex32(text: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    hex::decode_to_slice(text, &mut out).expect("valid fixture");
    out
}
