//! Record types, CLI output protocol, and errors shared across agent identifier crates.

pub mod error;
pub mod protocol;

pub use error::{BoxError, CodecError, ErrorKind, Stage};
pub use protocol::{AgentIdentifierRecord, DecodeOutcome, ErrorResponse};
