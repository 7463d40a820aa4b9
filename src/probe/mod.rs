//! Disk-backed probing.
//!
//! A serialized filter does not have to be loaded to be probed. The block a
//! hash maps to is computed from the filter's byte length alone, so a single
//! 32-byte positional read answers one membership query.
//!
//! ```text
//! source: [ ... | block 0 | block 1 | ... | block n-1 | ... ]
//!                ^ offset                  32 bytes each
//! ```

mod read_at;
mod remote;

pub use read_at::ReadAt;
pub use remote::{check_split_block, RemoteFilter};
