//! Scene Object Registry: the live set of interactive, hit-testable objects.
//!
//! # Invariants
//! - Object ids are unique and never reused.
//! - Removal is idempotent; a removed object is never picked again.
//! - Iteration (and therefore pick tie-breaking) follows insertion order.

pub mod registry;

pub use registry::{Hit, InteractiveObject, Registry, RegistryError, RegistryEvent};
