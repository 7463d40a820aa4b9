//! Configuration options for splitbloom filters and probes.

use serde::{Deserialize, Serialize};

/// Default number of bits of filter state per distinct value.
pub const DEFAULT_BITS_PER_VALUE: u32 = 10;

/// Default number of idle scratch blocks kept by a [`BlockPool`](crate::pool::BlockPool).
pub const DEFAULT_POOL_CAPACITY: usize = 256;

/// Configuration options for sizing filters and pooling probe buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Bits of filter state per distinct value.
    /// Default: 10
    pub bits_per_value: u32,

    /// Maximum number of idle scratch blocks retained by a block pool.
    /// Releases beyond this are dropped.
    /// Default: 256
    pub pool_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { bits_per_value: DEFAULT_BITS_PER_VALUE, pool_capacity: DEFAULT_POOL_CAPACITY }
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bits per value.
    pub fn bits_per_value(mut self, bits: u32) -> Self {
        self.bits_per_value = bits;
        self
    }

    /// Sets the block pool capacity.
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.bits_per_value == 0 {
            return Err(crate::Error::invalid_argument("bits_per_value must be > 0"));
        }
        if self.pool_capacity == 0 {
            return Err(crate::Error::invalid_argument("pool_capacity must be > 0"));
        }
        Ok(())
    }
}
