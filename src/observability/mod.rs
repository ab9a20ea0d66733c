//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / signer / client / driver
//!     → logging.rs (structured log events on stderr)
//! driver result
//!     → stdout (request ID only)
//! ```

pub mod logging;

pub use logging::init_logging;
