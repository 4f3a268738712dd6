//! Container item sampling
//!
//! Both the compiled check and the sleuth walk container items through
//! `sample_indices`, so for one seed they visit the same items in the same
//! order.

use super::config::Strategy;

/// Number of items inspected in a container of `len` items.
pub fn sample_count(len: usize, strategy: Strategy) -> usize {
    if len == 0 {
        return 0;
    }
    match strategy {
        Strategy::O0 => 0,
        Strategy::O1 => 1,
        Strategy::Ologn => (len.ilog2() as usize + 1).min(len),
        Strategy::On => len,
    }
}

/// Indices inspected in a container of `len` items, starting at `seed % len`
/// and wrapping around.
pub fn sample_indices(len: usize, strategy: Strategy, seed: u64) -> impl Iterator<Item = usize> {
    let count = sample_count(len, strategy);
    let start = if len == 0 {
        0
    } else {
        (seed % len as u64) as usize
    };
    (0..count).map(move |k| (start + k) % len)
}
