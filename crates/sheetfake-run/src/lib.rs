//! Emulation of the platform's client/server call boundary.
//!
//! Server-side operations are registered by name in an [`OperationRegistry`] and
//! reached through a [`ScriptRun`]. The boundary reproduces two behaviors of the
//! real one:
//!
//! - results are never returned inline; exactly one handler runs, on a later turn
//!   of the [`TaskQueue`];
//! - results holding date-times or NaN cannot be serialized. By default they are
//!   silently replaced by `null` (with a warning), as in production; in strict mode
//!   the failure handler receives a [`RunError::Serialization`] instead.
//!
//! # Architecture
//!
//! - **Value** (`value.rs`): the argument/result tree
//! - **Check** (`check.rs`): the serializability walk and wire encoding
//! - **Queue** (`queue.rs`): deferred FIFO delivery
//! - **Registry** (`registry.rs`): name to operation lookup
//! - **Runner** (`runner.rs`): invocation, handler chaining and call state

pub mod check;
pub mod error;
pub mod queue;
pub mod registry;
pub mod runner;
pub mod value;

// Re-export key types
pub use check::{check_serializable, to_json, Unserializable};
pub use error::{Result, RunError, UnsupportedKind};
pub use queue::TaskQueue;
pub use registry::{Operation, OperationRegistry};
pub use runner::{Call, CallState, FailureHandler, RunOptions, Runner, ScriptRun, SuccessHandler};
pub use value::Value;
