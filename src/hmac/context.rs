//! Keyed HMAC context.
//!
//! [`HmacContext`] drives one MAC computation at a time through
//! `init`, any number of `update` calls, and `finalize`. `reset` restarts
//! accumulation with the key bound by the last `init`.
//!
//! The context owns its engine exclusively. The engine wipes its key schedule
//! and partial state when dropped, and the context releases it only by
//! dropping it: on re-init, on a failed init, and when the context itself is
//! dropped.

use log::{debug, trace, warn};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::{HmacConfig, Strictness};
use crate::digest::{CryptoAlg, DigestResolver, KeyedMac, RustCryptoResolver, MAX_HMAC_SIZE};
use crate::errors::HmacError;

struct Bound<M> {
    algorithm: CryptoAlg,
    mac: M,
}

/// Keyed HMAC context.
///
/// Not `Clone` and not synchronized: one context serves one caller.
pub struct HmacContext<R = RustCryptoResolver>
where
    R: DigestResolver,
{
    resolver: R,
    config: HmacConfig,
    bound: Option<Bound<R::Mac>>,
}

impl HmacContext<RustCryptoResolver> {
    /// Uninitialized context with the default (strict) configuration.
    pub fn new() -> Self {
        Self::with_config(HmacConfig::default())
    }

    /// Uninitialized context.
    pub fn with_config(config: HmacConfig) -> Self {
        Self::with_resolver(RustCryptoResolver, config)
    }

    /// Context bound to `algorithm` and `key`.
    pub fn with_key(algorithm: CryptoAlg, key: &[u8]) -> Result<Self, HmacError> {
        let mut context = Self::new();
        context.init(algorithm, key)?;
        Ok(context)
    }
}

impl Default for HmacContext<RustCryptoResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> HmacContext<R>
where
    R: DigestResolver,
{
    /// Uninitialized context resolving digests through `resolver`.
    pub fn with_resolver(resolver: R, config: HmacConfig) -> Self {
        Self {
            resolver,
            config,
            bound: None,
        }
    }

    /// Bind `algorithm` and `key`, discarding any previous state.
    ///
    /// The previous engine is wiped before the new one is built. On failure
    /// the context is left uninitialized.
    pub fn init(&mut self, algorithm: CryptoAlg, key: &[u8]) -> Result<(), HmacError> {
        self.erase();

        let mac = self.resolver.resolve(algorithm, key).map_err(|err| {
            warn!("HMAC init failed for {}: {:?}", algorithm, err);
            HmacError::PrimitiveInit
        })?;

        debug!(
            "HMAC context bound to {} with a {}-byte key",
            algorithm,
            key.len()
        );

        self.bound = Some(Bound { algorithm, mac });

        Ok(())
    }

    /// Restart accumulation with the algorithm and key bound by the last
    /// `init`. No new key material is taken.
    pub fn reset(&mut self) -> Result<(), HmacError> {
        self.check_initialized()?;

        self.engine(HmacError::PrimitiveReset)?
            .reset()
            .map_err(|err| engine_failure("reset", err, HmacError::PrimitiveReset))?;

        trace!("HMAC context reset");

        Ok(())
    }

    /// Feed `data` into the running MAC.
    pub fn update(&mut self, data: &[u8]) -> Result<(), HmacError> {
        self.check_initialized()?;

        self.engine(HmacError::PrimitiveUpdate)?
            .update(data)
            .map_err(|err| engine_failure("update", err, HmacError::PrimitiveUpdate))
    }

    /// Write the tag over everything fed since the last `init` or `reset`
    /// into `out` and return its length.
    ///
    /// The running MAC is consumed. Call `reset` or `init` before feeding the
    /// next message; updating straight after `finalize` is not supported.
    pub fn finalize(&mut self, out: &mut [u8]) -> Result<usize, HmacError> {
        self.check_initialized()?;

        let mac = self.engine(HmacError::PrimitiveFinalize)?;

        if out.len() < mac.output_len() {
            return Err(HmacError::OutputTooShort);
        }

        let len = mac
            .finalize_into(out)
            .map_err(|err| engine_failure("finalize", err, HmacError::PrimitiveFinalize))?;

        trace!("HMAC context finalized a {}-byte tag", len);

        Ok(len)
    }

    /// Finalize and compare the tag with `expected` in constant time.
    pub fn finalize_verify(&mut self, expected: &[u8]) -> Result<(), HmacError> {
        let mut tag = Zeroizing::new([0u8; MAX_HMAC_SIZE]);
        let len = self.finalize(&mut tag[..])?;

        if bool::from(tag[..len].ct_eq(expected)) {
            Ok(())
        } else {
            Err(HmacError::MacError)
        }
    }

    /// Tag length of the bound algorithm.
    ///
    /// With [`Strictness::Fast`] an uninitialized context reports 0.
    pub fn size(&self) -> Result<usize, HmacError> {
        self.check_initialized()?;

        Ok(self.bound.as_ref().map_or(0, |bound| bound.mac.output_len()))
    }

    /// Whether an algorithm and key are currently bound.
    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    /// Algorithm bound by the last successful `init`.
    pub fn algorithm(&self) -> Option<CryptoAlg> {
        self.bound.as_ref().map(|bound| bound.algorithm)
    }

    /// Configuration the context was created with.
    pub fn config(&self) -> &HmacConfig {
        &self.config
    }

    fn check_initialized(&self) -> Result<(), HmacError> {
        match self.config.strictness {
            Strictness::Strict if self.bound.is_none() => Err(HmacError::UseBeforeInit),
            _ => Ok(()),
        }
    }

    fn engine(&mut self, stage: HmacError) -> Result<&mut R::Mac, HmacError> {
        self.bound.as_mut().map(|bound| &mut bound.mac).ok_or(stage)
    }

    fn erase(&mut self) {
        if let Some(bound) = self.bound.take() {
            trace!("wiping HMAC state for {}", bound.algorithm);
            drop(bound);
        }
    }
}

impl<R> Drop for HmacContext<R>
where
    R: DigestResolver,
{
    fn drop(&mut self) {
        self.erase();
    }
}

fn engine_failure(stage: &str, err: HmacError, mapped: HmacError) -> HmacError {
    warn!("HMAC engine failed during {}: {:?}", stage, err);
    mapped
}
