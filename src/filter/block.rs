//! The 256-bit block, the unit of insertion, lookup and I/O.
//!
//! A block is eight little-endian 32-bit words. Each word is an independent
//! one-bit Bloom filter: a 32-bit fragment of the value hash is multiplied by
//! a per-word salt and the top five bits of the product select the bit.
//!
//! Layout and salts follow the Parquet `BloomFilter.md` specification, so the
//! bytes of a block are exactly its on-disk representation.

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Number of 32-bit words in a block.
pub const WORDS_PER_BLOCK: usize = 8;

const WORD_SIZE: usize = 4;

/// Per-word salts, from the Parquet bloom filter specification.
pub const SALT: [u32; WORDS_PER_BLOCK] = [
    0x47b6137b, 0x44974d91, 0x8824ad5b, 0xa2b7289d, 0x705495c7, 0x2df1424b, 0x9efc4947, 0x5c6bfb31,
];

/// A single split block.
///
/// # Example
/// ```
/// use splitbloom::filter::Block;
///
/// let mut block = Block::new();
/// block.insert(42);
/// assert!(block.check(42));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    /// Create an empty block.
    pub const fn new() -> Self {
        Self([0u8; BLOCK_SIZE])
    }

    /// Create a block from its serialized bytes.
    pub const fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Set the eight bits derived from `fragment`.
    #[inline]
    pub fn insert(&mut self, fragment: u32) {
        insert_fragment(&mut self.0, fragment);
    }

    /// Test whether all eight bits derived from `fragment` are set.
    #[inline]
    pub fn check(&self, fragment: u32) -> bool {
        check_fragment(&self.0, fragment)
    }

    /// Get word `i` of the block, or `None` if `i >= WORDS_PER_BLOCK`.
    pub fn word(&self, i: usize) -> Option<u32> {
        self.0.chunks_exact(WORD_SIZE).nth(i).map(load_word)
    }

    /// Clear all bits.
    pub fn reset(&mut self) {
        self.0 = [0u8; BLOCK_SIZE];
    }

    /// The block's bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// The block's bytes, mutably. Used as the target of ranged reads.
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_SIZE] {
        &mut self.0
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let words: Vec<String> = self.0.chunks_exact(WORD_SIZE).map(|w| format!("{:08x}", load_word(w))).collect();
        f.debug_tuple("Block").field(&words.join(" ")).finish()
    }
}

impl From<[u8; BLOCK_SIZE]> for Block {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

/// The single-bit mask for word `i`.
#[inline(always)]
fn mask(fragment: u32, i: usize) -> u32 {
    1u32 << (fragment.wrapping_mul(SALT[i]) >> 27)
}

#[inline(always)]
fn load_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Insert into a block stored in place in a larger buffer.
///
/// `bytes` must be exactly one block long.
#[inline]
pub(crate) fn insert_fragment(bytes: &mut [u8], fragment: u32) {
    debug_assert_eq!(bytes.len(), BLOCK_SIZE);
    for (i, word) in bytes.chunks_exact_mut(WORD_SIZE).enumerate() {
        let value = load_word(word) | mask(fragment, i);
        word.copy_from_slice(&value.to_le_bytes());
    }
}

/// Check a block stored in place in a larger buffer.
///
/// `bytes` must be exactly one block long.
#[inline]
pub(crate) fn check_fragment(bytes: &[u8], fragment: u32) -> bool {
    debug_assert_eq!(bytes.len(), BLOCK_SIZE);
    bytes
        .chunks_exact(WORD_SIZE)
        .enumerate()
        .all(|(i, word)| load_word(word) & mask(fragment, i) != 0)
}
