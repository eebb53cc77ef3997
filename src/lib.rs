#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod digest;
pub mod errors;
pub mod hmac;

pub use config::{HmacConfig, Strictness};
pub use digest::{CryptoAlg, DigestResolver, KeyedMac, RustCryptoResolver, MAX_HMAC_SIZE};
pub use errors::HmacError;
pub use hmac::HmacContext;
