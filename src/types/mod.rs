//! Response shapes mirroring the JSON bodies of each endpoint.

pub mod account;
pub mod envelope;

pub use account::*;
pub use envelope::{ApiResponse, ResponseStatus};
