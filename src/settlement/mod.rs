//! Settlement request construction, execution and inspection.

pub mod driver;
pub mod inspect;
pub mod request;

pub use driver::{connect, run, run_from_env, SettlementError, SettlementOutcome};
pub use inspect::{details, details_from_env, list, list_from_env};
pub use request::{build_request, display_amount};
