//! Backend implementations for scrypt key derivation.
//!
//! Both backends compute the same keys and only differ in how the `p` block
//! groups are scheduled:
//!
//! - [`sequential::SequentialScrypt`]: one group after the other on the calling thread
//! - [`parallel::ParallelScrypt`]: all groups on the rayon thread pool

pub mod parallel;
pub mod sequential;
