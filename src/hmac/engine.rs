//! RustCrypto based HMAC engine.

use core::mem::ManuallyDrop;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use cryptraits::convert::Len;
use hmac::digest::{typenum::Unsigned, FixedOutputReset, KeyInit, Mac, OutputSizeUser};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::digest::KeyedMac;
use crate::errors::HmacError;

/// HMAC engine over a RustCrypto MAC.
///
/// The keyed state (inner and outer pad digests, running digest, block
/// buffer) is held in a `ManuallyDrop` and wiped in place on drop.
pub struct Hmac<M>(ManuallyDrop<M>)
where
    M: Mac + KeyInit + FixedOutputReset;

/// SHA-224 based HMAC.
pub type HmacSha224 = Hmac<hmac::Hmac<Sha224>>;

/// SHA-256 based HMAC.
pub type HmacSha256 = Hmac<hmac::Hmac<Sha256>>;

/// SHA-384 based HMAC.
pub type HmacSha384 = Hmac<hmac::Hmac<Sha384>>;

/// SHA-512 based HMAC.
pub type HmacSha512 = Hmac<hmac::Hmac<Sha512>>;

impl<M> Drop for Hmac<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    fn drop(&mut self) {
        // SAFETY: RustCrypto HMAC state is made of fixed-size arrays and
        // counters without heap data or drop glue, and is never read again.
        unsafe { zeroize::zeroize_flat_type(&mut *self.0 as *mut M) }
    }
}

impl<M> Hmac<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    fn finalize_tag(&mut self) -> hmac::digest::Output<M> {
        <M as Mac>::finalize_reset(&mut self.0).into_bytes()
    }
}

impl<M> cryptraits::hmac::Hmac for Hmac<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    type E = HmacError;

    fn new_from_slice(key: &[u8]) -> Result<Self, Self::E>
    where
        Self: Sized,
    {
        let mac = <M as KeyInit>::new_from_slice(key).or(Err(HmacError::InvalidLength))?;
        Ok(Self(ManuallyDrop::new(mac)))
    }

    fn update(&mut self, data: &[u8]) {
        <M as Mac>::update(&mut self.0, data);
    }

    fn verify_slice(mut self, tag: &[u8]) -> Result<(), Self::E> {
        let code = self.finalize_tag();

        if bool::from(code.as_slice().ct_eq(tag)) {
            Ok(())
        } else {
            Err(HmacError::MacError)
        }
    }

    fn finalize(mut self) -> Vec<u8> {
        self.finalize_tag().to_vec()
    }
}

impl<M> KeyedMac for Hmac<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    fn reset(&mut self) -> Result<(), HmacError> {
        <M as Mac>::reset(&mut self.0);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HmacError> {
        <M as Mac>::update(&mut self.0, data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize, HmacError> {
        let len = self.output_len();
        let out = out.get_mut(..len).ok_or(HmacError::OutputTooShort)?;

        out.copy_from_slice(&self.finalize_tag());

        Ok(len)
    }

    fn output_len(&self) -> usize {
        <M as OutputSizeUser>::output_size()
    }
}

impl<M> Len for Hmac<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    const LEN: usize = <<M as OutputSizeUser>::OutputSize as Unsigned>::USIZE;
}
