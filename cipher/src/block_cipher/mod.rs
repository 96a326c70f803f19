//! Symmetric block cipher framework.
//!
//! A concrete cipher implements [`BlockCipherSpi`]: pure, stateless block
//! transforms over an opaque session key. [`BlockCipherEngine`] wraps a
//! cipher with the init/use/reset life cycle, and [`registry`] hands out
//! self-tested engines by name.

mod engine;
mod null;
mod serpent;

pub mod registry;

pub use engine::{BlockCipherEngine, CipherState};
pub use null::NullCipher;
pub use serpent::Serpent;

use crate::CipherError;

/// A known answer vector: encrypting the all-zero block of
/// `ciphertext.len()` bytes under `key` must yield `ciphertext`.
pub struct KnownAnswer {
    pub key: &'static [u8],
    pub ciphertext: &'static [u8],
}

/// The service-provider interface a concrete block cipher implements.
///
/// `encrypt` and `decrypt` are only ever called with buffers of exactly
/// `block_size` bytes and a key produced by `make_key`, the engine enforces
/// that.
pub trait BlockCipherSpi {
    const NAME: &'static str;

    /// Expanded key material. Opaque to everything but the cipher itself.
    type SessionKey;

    /// Supported block sizes in bytes, first entry is the default.
    fn block_sizes(&self) -> &'static [usize];

    /// Supported key material lengths in bytes.
    fn key_sizes(&self) -> &'static [usize];

    fn default_block_size(&self) -> usize {
        self.block_sizes()[0]
    }

    fn make_key(&self, material: &[u8], block_size: usize)
        -> Result<Self::SessionKey, CipherError>;

    fn encrypt(&self, input: &[u8], output: &mut [u8], key: &Self::SessionKey, block_size: usize);

    fn decrypt(&self, input: &[u8], output: &mut [u8], key: &Self::SessionKey, block_size: usize);

    fn known_answers(&self) -> &'static [KnownAnswer] {
        &[]
    }

    /// Scrub a discarded session key. Ciphers whose keys hold secret
    /// material override this.
    fn scrub_key(&self, _key: &mut Self::SessionKey) {}
}
