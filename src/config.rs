//! HMAC context configuration.

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "serde_derive")]
use serde::de::{Error, Unexpected, Visitor};

#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};

/// How strictly the context checks lifecycle preconditions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Every operation checks the context is initialized and fails with
    /// `UseBeforeInit` otherwise.
    #[default]
    Strict,

    /// No up-front check; the caller sequences operations correctly. An
    /// operation that still reaches a missing engine fails with the error of
    /// its stage.
    Fast,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Strict => "strict",
            Strictness::Fast => "fast",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde_derive")]
impl Serialize for Strictness {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde_derive")]
impl<'de> Deserialize<'de> for Strictness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StrictnessVisitor;

        impl<'de> Visitor<'de> for StrictnessVisitor {
            type Value = Strictness;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"strict\" or \"fast\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                match v {
                    "strict" => Ok(Strictness::Strict),
                    "fast" => Ok(Strictness::Fast),
                    _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_str(StrictnessVisitor)
    }
}

/// HMAC context configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HmacConfig {
    pub strictness: Strictness,
}

impl HmacConfig {
    /// Configuration that always validates context state.
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }

    /// Configuration that skips state validation.
    pub fn fast() -> Self {
        Self {
            strictness: Strictness::Fast,
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }
}
