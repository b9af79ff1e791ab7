// Shared request/response plumbing

pub mod error;
pub mod pagination;

pub use error::*;
pub use pagination::*;
