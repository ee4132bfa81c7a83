use std::fmt;

use digest::Digest;

use super::builtin::{Blake512, CubeHash512};
use crate::error::{Result, TimeTravelError};
use crate::params::NATIVE_DIGEST_LEN;

/// The eleven 512-bit hash functions of the X11 family, by chain id
///
/// Ids 0-9 are what the permutation schedule draws from. `Echo` (id 10)
/// has a code character but is never selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Primitive {
    Blake = 0,
    Bmw = 1,
    Groestl = 2,
    Skein = 3,
    Jh = 4,
    Keccak = 5,
    Luffa = 6,
    Cubehash = 7,
    Shavite = 8,
    Simd = 9,
    Echo = 10,
}

impl Primitive {
    pub const ALL: [Primitive; SLOT_COUNT] = [
        Self::Blake,
        Self::Bmw,
        Self::Groestl,
        Self::Skein,
        Self::Jh,
        Self::Keccak,
        Self::Luffa,
        Self::Cubehash,
        Self::Shavite,
        Self::Simd,
        Self::Echo,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blake => "blake512",
            Self::Bmw => "bmw512",
            Self::Groestl => "groestl512",
            Self::Skein => "skein512",
            Self::Jh => "jh512",
            Self::Keccak => "keccak512",
            Self::Luffa => "luffa512",
            Self::Cubehash => "cubehash512",
            Self::Shavite => "shavite512",
            Self::Simd => "simd512",
            Self::Echo => "echo512",
        }
    }

    /// Single-character code: '0'-'9', then 'A' onwards
    pub fn code(self) -> char {
        let id = self.id();
        if id < 10 {
            (b'0' + id) as char
        } else {
            (b'A' + (id - 10)) as char
        }
    }

    pub fn from_code(c: char) -> Result<Self> {
        let id = match c {
            '0'..='9' => c as u8 - b'0',
            'A'..='Z' => c as u8 - b'A' + 10,
            _ => return Err(TimeTravelError::InvalidCode(c)),
        };
        Self::from_id(id).ok_or(TimeTravelError::InvalidCode(c))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 512-bit hash function usable as one chain step
///
/// Implementations start from a fresh state on every call; nothing may
/// carry over between calls or between threads.
pub trait HashFunction: Send + Sync {
    fn digest_into(&self, input: &[u8], out: &mut [u8; NATIVE_DIGEST_LEN]);
}

/// Initialized hasher state that is cloned for every digest
///
/// The stored state is never updated in place, so one template can be
/// shared by any number of concurrent chain evaluations.
#[derive(Clone)]
pub struct DigestTemplate<D> {
    initial: D,
}

impl<D: Digest + Clone> DigestTemplate<D> {
    /// Wrap `D` for the given catalog slot, rejecting non-64-byte digests
    pub fn new(primitive: Primitive) -> Result<Self> {
        let size = <D as Digest>::output_size();
        if size != NATIVE_DIGEST_LEN {
            return Err(TimeTravelError::DigestSize { primitive, size });
        }
        Ok(Self { initial: D::new() })
    }
}

impl<D> HashFunction for DigestTemplate<D>
where
    D: Digest + Clone + Send + Sync,
{
    fn digest_into(&self, input: &[u8], out: &mut [u8; NATIVE_DIGEST_LEN]) {
        let mut state = self.initial.clone();
        Digest::update(&mut state, input);
        out.copy_from_slice(&state.finalize());
    }
}

const SLOT_COUNT: usize = 11;

type Slots = [Option<Box<dyn HashFunction>>; SLOT_COUNT];

/// Immutable set of primitive implementations, indexed by chain id
///
/// Built once and shared (e.g. behind an `Arc`) by every worker.
pub struct PrimitiveCatalog {
    slots: Slots,
}

impl PrimitiveCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn contains(&self, primitive: Primitive) -> bool {
        self.slots[primitive.id() as usize].is_some()
    }

    /// Run one chain step: hash `input` with `primitive` into `out`
    pub fn digest_into(
        &self,
        primitive: Primitive,
        input: &[u8],
        out: &mut [u8; NATIVE_DIGEST_LEN],
    ) -> Result<()> {
        let function = self.slots[primitive.id() as usize]
            .as_deref()
            .ok_or(TimeTravelError::MissingPrimitive(primitive))?;
        function.digest_into(input, out);
        Ok(())
    }
}

impl fmt::Debug for PrimitiveCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<&str> = Primitive::ALL
            .iter()
            .filter(|p| self.contains(**p))
            .map(|p| p.as_str())
            .collect();
        f.debug_struct("PrimitiveCatalog")
            .field("registered", &registered)
            .finish()
    }
}

fn template<D: Digest>() -> DigestTemplate<D> {
    DigestTemplate { initial: D::new() }
}

/// Collects primitive implementations before freezing them into a catalog
///
/// `new()` fills every slot that has a registry implementation: BLAKE,
/// BMW, Groestl, Skein, JH, Keccak (pre-NIST padding, `sha3::Keccak512`)
/// and CubeHash. Luffa, SHAvite and SIMD must be registered by the caller.
pub struct CatalogBuilder {
    slots: Slots,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::empty()
            .register(Primitive::Blake, Blake512::default())
            .register(Primitive::Bmw, template::<bmw_hash::Bmw512>())
            .register(Primitive::Groestl, template::<groestl::Groestl512>())
            .register(Primitive::Skein, template::<skein::Skein512>())
            .register(Primitive::Jh, template::<jh::Jh512>())
            .register(Primitive::Keccak, template::<sha3::Keccak512>())
            .register(Primitive::Cubehash, CubeHash512)
    }

    /// A builder with no slot filled
    pub fn empty() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    pub fn register<F>(mut self, primitive: Primitive, function: F) -> Self
    where
        F: HashFunction + 'static,
    {
        self.slots[primitive.id() as usize] = Some(Box::new(function));
        self
    }

    /// Register any RustCrypto hasher with a 64-byte output
    pub fn register_digest<D>(self, primitive: Primitive) -> Result<Self>
    where
        D: Digest + Clone + Send + Sync + 'static,
    {
        let template = DigestTemplate::<D>::new(primitive)?;
        Ok(self.register(primitive, template))
    }

    /// Freeze the catalog. Every selectable primitive (ids 0-9) must be present.
    pub fn build(self) -> Result<PrimitiveCatalog> {
        if let Some(missing) = Primitive::ALL
            .iter()
            .take(crate::params::HASH_FUNC_COUNT)
            .find(|p| self.slots[p.id() as usize].is_none())
        {
            return Err(TimeTravelError::MissingPrimitive(*missing));
        }
        Ok(PrimitiveCatalog { slots: self.slots })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
