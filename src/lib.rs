// Library interface for the miner front end and tests
pub mod algorithms;
pub mod backend;
pub mod error;
pub mod mining;
pub mod params;

pub use algorithms::permutation::{AlgoOrder, TwistedLabel};
pub use algorithms::primitives::{CatalogBuilder, DigestTemplate, HashFunction, Primitive, PrimitiveCatalog};
pub use algorithms::timetravel10::{chain, TimeTravel10};
pub use algorithms::HashAlgorithm;
pub use backend::{CpuBackend, MiningBackend, ScanOutcome, ScanResult};
pub use error::{Result, TimeTravelError};
pub use mining::{Ntime, Target, Verdict, Work};
