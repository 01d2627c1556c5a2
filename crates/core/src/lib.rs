//! Core types, wire protocol, and error taxonomy for the tubenote client stack.

pub mod error;
pub mod nav;
pub mod protocol;
pub mod session;

pub use error::{ApiErrorCode, Error, Result};
pub use nav::Route;
pub use protocol::*;
pub use session::*;
