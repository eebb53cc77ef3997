//! HMAC engine and keyed context.

pub mod context;
pub mod engine;

pub use context::HmacContext;
