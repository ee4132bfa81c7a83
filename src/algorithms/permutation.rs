use std::fmt;
use std::str::FromStr;

use crate::algorithms::primitives::Primitive;
use crate::error::{Result, TimeTravelError};
use crate::params::{ANCHOR_TIME, HASH_FUNC_COUNT, PERMUTATION_COUNT};

/// 10! - the number of distinct orders of ten primitives
const FULL_PERMUTATIONS: u32 = 3_628_800;

/// Position of `ntime` in the permutation schedule, always below 40320
pub fn schedule_index(ntime: u32) -> u32 {
    ntime.wrapping_sub(ANCHOR_TIME) % PERMUTATION_COUNT
}

/// Advance `items` to the next lexicographic permutation
///
/// Returns `false` when `items` was already the last permutation; it is
/// then reset to ascending order.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() <= 1 {
        return false;
    }

    let mut tail = items.len() - 1;
    while tail > 0 && items[tail - 1] >= items[tail] {
        tail -= 1;
    }

    if tail > 0 {
        let mut j = items.len() - 1;
        while j > tail && items[j] <= items[tail - 1] {
            j -= 1;
        }
        items.swap(tail - 1, j);
    }

    items[tail..].reverse();
    tail != 0
}

fn factorial(n: usize) -> u32 {
    (1..=n as u32).product()
}

/// The order in which the ten chain steps apply their primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgoOrder([Primitive; HASH_FUNC_COUNT]);

impl AlgoOrder {
    pub const IDENTITY: AlgoOrder = AlgoOrder([
        Primitive::Blake,
        Primitive::Bmw,
        Primitive::Groestl,
        Primitive::Skein,
        Primitive::Jh,
        Primitive::Keccak,
        Primitive::Luffa,
        Primitive::Cubehash,
        Primitive::Shavite,
        Primitive::Simd,
    ]);

    /// Order selected for a block timestamp
    pub fn for_ntime(ntime: u32) -> Self {
        Self::from_index(schedule_index(ntime))
    }

    /// The `index`-th lexicographic permutation of ids 0-9 (Lehmer decoding)
    ///
    /// Equal to applying [`next_permutation`] `index` times to the identity.
    pub fn from_index(index: u32) -> Self {
        let mut remaining: Vec<Primitive> = Self::IDENTITY.0.to_vec();
        let mut rank = index % FULL_PERMUTATIONS;
        let mut order = Self::IDENTITY.0;

        for (position, slot) in order.iter_mut().enumerate() {
            let radix = factorial(HASH_FUNC_COUNT - 1 - position);
            let digit = (rank / radix) as usize;
            rank %= radix;
            *slot = remaining.remove(digit);
        }

        Self(order)
    }

    /// Reference path: step the identity forward `index` times
    pub fn by_stepping(index: u32) -> Self {
        let mut order = Self::IDENTITY.0;
        for _ in 0..index {
            next_permutation(&mut order);
        }
        Self(order)
    }

    /// Lexicographic rank among all orders of the ten selectable primitives
    ///
    /// `None` when the order contains `Echo`.
    pub fn rank(&self) -> Option<u32> {
        let mut rank = 0;
        for (position, primitive) in self.0.iter().enumerate() {
            if primitive.id() as usize >= HASH_FUNC_COUNT {
                return None;
            }
            let smaller_after = self.0[position + 1..]
                .iter()
                .filter(|later| later.id() < primitive.id())
                .count() as u32;
            rank += smaller_after * factorial(HASH_FUNC_COUNT - 1 - position);
        }
        Some(rank)
    }

    pub fn primitives(&self) -> &[Primitive; HASH_FUNC_COUNT] {
        &self.0
    }

    /// The ten-character code string, e.g. `0123456789`
    pub fn code(&self) -> String {
        self.0.iter().map(|p| p.code()).collect()
    }

    /// Parse a code string; it must name ten distinct primitives
    pub fn from_code(code: &str) -> Result<Self> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != HASH_FUNC_COUNT {
            return Err(TimeTravelError::InvalidOrderLength(chars.len()));
        }

        let mut order = Self::IDENTITY.0;
        for (i, c) in chars.into_iter().enumerate() {
            let primitive = Primitive::from_code(c)?;
            if order[..i].contains(&primitive) {
                return Err(TimeTravelError::DuplicatePrimitive(primitive));
            }
            order[i] = primitive;
        }
        Ok(Self(order))
    }
}

impl Default for AlgoOrder {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for AlgoOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for primitive in &self.0 {
            write!(f, "{}", primitive.code())?;
        }
        Ok(())
    }
}

impl FromStr for AlgoOrder {
    type Err = TimeTravelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// `_<index>_<code>_` label used to cross-check other implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwistedLabel {
    pub index: u32,
    pub order: AlgoOrder,
}

impl TwistedLabel {
    pub fn for_ntime(ntime: u32) -> Self {
        let index = schedule_index(ntime);
        Self {
            index,
            order: AlgoOrder::from_index(index),
        }
    }
}

impl fmt::Display for TwistedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_{}_", self.index, self.order)
    }
}
