//! Block ciphers and public key signatures.
//!
//! The [`block_cipher`] module holds the symmetric framework: a cipher trait,
//! a stateful engine wrapper and a by-name registry. The [`rsa`] module holds
//! RSA keys, key generation and the RSA-PSS signature scheme.

mod error;

pub mod block_cipher;
pub mod rsa;

pub use error::CipherError;
pub use rand::{DefaultRand, Rand};

/// Signature generation over an arbitrary message.
pub trait Sign {
    fn sign(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError>;
}

/// Signature verification. `false` covers every failure mode past parameter
/// setup; no detail about why a signature was rejected escapes this boundary.
pub trait Verify {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> bool;
}
