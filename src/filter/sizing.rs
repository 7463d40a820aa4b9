//! Filter sizing.

use super::block::BLOCK_SIZE;
use crate::error::{Error, Result};

/// Number of bytes needed to hold `bits` bits.
pub fn byte_count(bits: u64) -> u64 {
    bits.div_ceil(8)
}

/// Number of blocks in a filter intended to hold `num_values` distinct values
/// with `bits_per_value` bits of filter state each.
///
/// ```
/// use splitbloom::filter::{blocks_needed, SplitBlockFilter};
///
/// let num_blocks = blocks_needed(1000, 10);
/// assert_eq!(num_blocks, 40);
/// let filter = SplitBlockFilter::new(num_blocks as u32);
/// assert_eq!(filter.as_bytes().len(), 1280);
/// ```
pub fn blocks_needed(num_values: u64, bits_per_value: u32) -> usize {
    let bits = u128::from(num_values) * u128::from(bits_per_value);
    let bytes = bits.div_ceil(8);
    let blocks = bytes.div_ceil(BLOCK_SIZE as u128);
    usize::try_from(blocks).unwrap_or(usize::MAX)
}

/// Validate a serialized filter length and return its block count.
///
/// The length must be a multiple of the block size and the block count must
/// fit in 32 bits.
pub(crate) fn block_count_of(byte_len: u64) -> Result<u32> {
    if byte_len % BLOCK_SIZE as u64 != 0 {
        return Err(Error::invalid_argument(format!(
            "bloom filter length {} is not a multiple of the block size {}",
            byte_len, BLOCK_SIZE
        )));
    }
    u32::try_from(byte_len / BLOCK_SIZE as u64).map_err(|_| {
        Error::invalid_argument(format!("bloom filter length {} has too many blocks", byte_len))
    })
}

/// Expected false positive rate of a filter with `num_blocks` blocks holding
/// `num_values` distinct values, assuming uniformly distributed hashes.
///
/// Block loads are Poisson distributed with mean `num_values / num_blocks`; a
/// block holding `k` values answers a foreign fragment with probability
/// `(1 - (31/32)^k)^8`.
pub fn false_positive_rate(num_blocks: usize, num_values: u64) -> f64 {
    if num_blocks == 0 || num_values == 0 {
        return 0.0;
    }

    let lambda = num_values as f64 / num_blocks as f64;
    let miss: f64 = 1.0 - 1.0 / 32.0;

    // Sum until the Poisson tail is negligible. Probabilities are tracked in
    // log space since e^-lambda underflows for heavily loaded filters.
    let limit = (lambda + 12.0 * lambda.sqrt() + 32.0).ceil() as u64;
    let ln_lambda = lambda.ln();
    let mut ln_poisson = -lambda;
    let mut rate: f64 = 0.0;
    for k in 0..=limit {
        if k > 0 {
            ln_poisson += ln_lambda - (k as f64).ln();
        }
        rate += ln_poisson.exp() * (1.0 - miss.powf(k as f64)).powi(8);
    }
    rate.min(1.0)
}
