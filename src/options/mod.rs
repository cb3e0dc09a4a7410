//! Options Module
//!
//! Typed option sets for each kind of engine call.
//!
//! ## Lifetimes
//! - `OpenOptions` and `ReadOptions` become a native handle for exactly one
//!   call and are released when that call returns, on success or failure
//! - `WriteOptions` do the same for single puts and deletes, but a `Batch`
//!   keeps its write-options handle for as long as the batch lives
//! - An iterator releases its read-options handle as soon as it is built
//!
//! Every type can be built directly with chained setters or translated from
//! a [`Config`](crate::Config) map; keys a type does not know are ignored.

mod open;
mod read;
mod write;

pub use open::OpenOptions;
pub use read::ReadOptions;
pub use write::WriteOptions;
