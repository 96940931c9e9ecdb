//! Shared foundation for the punchcard workspace.
//!
//! Downstream crates import the ambient stack from here instead of naming the
//! underlying crates themselves, so swapping an implementation stays a
//! one-crate change.

pub use anyhow::{Error, Result, anyhow, bail};
pub use reqwest;
pub use schemars::JsonSchema;
pub use serde_json as json;
pub use serde_json::Value;
pub use tokio;

pub mod sync {
    pub use tokio::sync::{Mutex, RwLock, mpsc, oneshot, watch};
}
