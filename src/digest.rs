//! Digest identifiers and the resolver seam between them and a keyed engine.

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "serde_derive")]
use serde::de::{Error, Unexpected, Visitor};

#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};

use crate::errors::HmacError;
use crate::hmac::engine::{HmacSha224, HmacSha256, HmacSha384, HmacSha512};

/// Largest tag, in bytes, any supported algorithm produces.
pub const MAX_HMAC_SIZE: usize = 64;

/// Digest algorithm identifier, as handed out by the algorithm registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptoAlg {
    None,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl CryptoAlg {
    /// Registry name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            CryptoAlg::None => "NONE",
            CryptoAlg::Md5 => "MD5",
            CryptoAlg::Sha1 => "SHA1",
            CryptoAlg::Sha224 => "SHA224",
            CryptoAlg::Sha256 => "SHA256",
            CryptoAlg::Sha384 => "SHA384",
            CryptoAlg::Sha512 => "SHA512",
        }
    }

    /// Output size of the digest in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            CryptoAlg::None => 0,
            CryptoAlg::Md5 => 16,
            CryptoAlg::Sha1 => 20,
            CryptoAlg::Sha224 => 28,
            CryptoAlg::Sha256 => 32,
            CryptoAlg::Sha384 => 48,
            CryptoAlg::Sha512 => 64,
        }
    }

    /// Parse a registry name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            CryptoAlg::None,
            CryptoAlg::Md5,
            CryptoAlg::Sha1,
            CryptoAlg::Sha224,
            CryptoAlg::Sha256,
            CryptoAlg::Sha384,
            CryptoAlg::Sha512,
        ]
        .into_iter()
        .find(|alg| alg.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CryptoAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde_derive")]
impl Serialize for CryptoAlg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde_derive")]
impl<'de> Deserialize<'de> for CryptoAlg {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CryptoAlgVisitor;

        impl<'de> Visitor<'de> for CryptoAlgVisitor {
            type Value = CryptoAlg;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("digest algorithm name")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                CryptoAlg::from_name(v)
                    .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(CryptoAlgVisitor)
    }
}

/// Keyed MAC state bound to one algorithm and one key.
///
/// Implementations must wipe their key schedule and partial state when
/// dropped. The context never clones an engine and releases it only by
/// dropping it.
pub trait KeyedMac {
    /// Restart accumulation with the bound key.
    fn reset(&mut self) -> Result<(), HmacError>;

    fn update(&mut self, data: &[u8]) -> Result<(), HmacError>;

    /// Write the tag into `out` and return its length.
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, HmacError>;

    /// Tag length in bytes.
    fn output_len(&self) -> usize;
}

/// Maps a digest identifier to a keyed engine.
pub trait DigestResolver {
    type Mac: KeyedMac;

    /// Build an engine for `algorithm` keyed with `key`, or signal that the
    /// algorithm is unsupported.
    fn resolve(&self, algorithm: CryptoAlg, key: &[u8]) -> Result<Self::Mac, HmacError>;
}

/// Resolver backed by the RustCrypto `hmac` and `sha2` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoResolver;

/// Engine handed out by [`RustCryptoResolver`].
pub enum RustCryptoMac {
    Sha224(HmacSha224),
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

macro_rules! dispatch {
    ($self:expr, $mac:ident => $body:expr) => {
        match $self {
            RustCryptoMac::Sha224($mac) => $body,
            RustCryptoMac::Sha256($mac) => $body,
            RustCryptoMac::Sha384($mac) => $body,
            RustCryptoMac::Sha512($mac) => $body,
        }
    };
}

impl KeyedMac for RustCryptoMac {
    fn reset(&mut self) -> Result<(), HmacError> {
        dispatch!(self, mac => mac.reset())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HmacError> {
        dispatch!(self, mac => KeyedMac::update(mac, data))
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, HmacError> {
        dispatch!(self, mac => mac.finalize_into(out))
    }

    fn output_len(&self) -> usize {
        dispatch!(self, mac => mac.output_len())
    }
}

impl DigestResolver for RustCryptoResolver {
    type Mac = RustCryptoMac;

    fn resolve(&self, algorithm: CryptoAlg, key: &[u8]) -> Result<Self::Mac, HmacError> {
        use cryptraits::hmac::Hmac as _;

        let mac = match algorithm {
            CryptoAlg::Sha224 => RustCryptoMac::Sha224(HmacSha224::new_from_slice(key)?),
            CryptoAlg::Sha256 => RustCryptoMac::Sha256(HmacSha256::new_from_slice(key)?),
            CryptoAlg::Sha384 => RustCryptoMac::Sha384(HmacSha384::new_from_slice(key)?),
            CryptoAlg::Sha512 => RustCryptoMac::Sha512(HmacSha512::new_from_slice(key)?),
            CryptoAlg::None | CryptoAlg::Md5 | CryptoAlg::Sha1 => {
                return Err(HmacError::UnsupportedAlgorithm(algorithm))
            }
        };

        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [CryptoAlg; 4] = [
        CryptoAlg::Sha224,
        CryptoAlg::Sha256,
        CryptoAlg::Sha384,
        CryptoAlg::Sha512,
    ];

    #[test]
    fn test_resolved_output_len_matches_registry() {
        for alg in SUPPORTED {
            let mac = RustCryptoResolver.resolve(alg, b"key").unwrap();
            assert_eq!(mac.output_len(), alg.digest_size());
            assert!(mac.output_len() <= MAX_HMAC_SIZE);
        }
    }

    #[test]
    fn test_unsupported_algorithms() {
        for alg in [CryptoAlg::None, CryptoAlg::Md5, CryptoAlg::Sha1] {
            assert_eq!(
                RustCryptoResolver.resolve(alg, b"key").err(),
                Some(HmacError::UnsupportedAlgorithm(alg))
            );
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CryptoAlg::from_name("SHA256"), Some(CryptoAlg::Sha256));
        assert_eq!(CryptoAlg::from_name("sha512"), Some(CryptoAlg::Sha512));
        assert_eq!(CryptoAlg::from_name("md5"), Some(CryptoAlg::Md5));
        assert_eq!(CryptoAlg::from_name("BLAKE2"), None);
    }

    #[cfg(feature = "serde_derive")]
    #[test]
    fn test_crypto_alg_serde() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        assert_tokens(&CryptoAlg::Sha384, &[Token::Str("SHA384")]);
        assert_de_tokens_error::<CryptoAlg>(
            &[Token::Str("WHIRLPOOL")],
            "invalid value: string \"WHIRLPOOL\", expected digest algorithm name",
        );
    }
}
