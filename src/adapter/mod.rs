//! External classification capabilities and their normalization boundary.
//!
//! Three pluggable capabilities — semantic intent classification,
//! named-entity recognition, and text generation — each behind a trait so
//! the pipeline never depends on a concrete service. Failures here never
//! cross the orchestrator boundary; they degrade to the rule-based path.

pub mod hf;
pub mod normalize;
pub mod types;

pub use hf::*;
pub use normalize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("inference service unreachable at {0}")]
    Connection(String),

    #[error("inference service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("malformed service response: {0}")]
    MalformedResponse(String),
}
