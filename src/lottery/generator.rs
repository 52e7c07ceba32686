//! Bounded random draw.

use std::collections::HashSet;

use rand::{thread_rng, Rng};

use crate::error::GenerationError;

/// Upper bound on numbers per draw, so a catalog entry cannot ask for an unbounded allocation.
pub const MAX_DRAW_COUNT: usize = 1_000;

/// Validates a draw request without sampling anything.
pub fn check_request(min: u32, max: u32, count: usize) -> Result<(), GenerationError> {
    if min > max {
        return Err(GenerationError::InvalidBounds { min, max });
    }
    if count == 0 {
        return Err(GenerationError::InvalidCount);
    }
    if count > MAX_DRAW_COUNT {
        return Err(GenerationError::TooMany { count, limit: MAX_DRAW_COUNT });
    }
    let distinct = u64::from(max - min) + 1;
    if min > 0 && count as u64 > distinct {
        return Err(GenerationError::Impossible { min, max, count });
    }
    Ok(())
}

/// Draws `count` numbers uniformly from `min..=max` with the thread-local RNG.
///
/// Repeats are allowed only when `min == 0`; otherwise values are resampled until
/// `count` distinct numbers are collected. Output keeps draw order.
pub fn generate(min: u32, max: u32, count: usize) -> Result<Vec<u32>, GenerationError> {
    generate_with_rng(&mut thread_rng(), min, max, count)
}

pub fn generate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    min: u32,
    max: u32,
    count: usize,
) -> Result<Vec<u32>, GenerationError> {
    check_request(min, max, count)?;
    let mut out = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(if min == 0 { 0 } else { count });
    while out.len() < count {
        let n = rng.gen_range(min..=max);
        if min == 0 || seen.insert(n) {
            out.push(n);
        }
    }
    Ok(out)
}
