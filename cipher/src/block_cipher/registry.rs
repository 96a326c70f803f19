//! By-name construction of self-tested cipher engines.

use crate::block_cipher::{BlockCipherEngine, BlockCipherSpi, NullCipher, Serpent};
use crate::CipherError;

/// Canonical names accepted by [`create`].
pub const NAMES: [&str; 2] = [
    <Serpent as BlockCipherSpi>::NAME,
    <NullCipher as BlockCipherSpi>::NAME,
];

/// An engine for any registered cipher.
pub enum Cipher {
    Serpent(BlockCipherEngine<Serpent>),
    Null(BlockCipherEngine<NullCipher>),
}

macro_rules! with_engine {
    ($self: ident, $e: ident => $body: expr) => {
        match $self {
            Cipher::Serpent($e) => $body,
            Cipher::Null($e) => $body,
        }
    };
}

impl Cipher {
    pub fn name(&self) -> &'static str {
        with_engine!(self, e => e.name())
    }

    pub fn block_sizes(&self) -> &'static [usize] {
        with_engine!(self, e => e.block_sizes())
    }

    pub fn key_sizes(&self) -> &'static [usize] {
        with_engine!(self, e => e.key_sizes())
    }

    pub fn current_block_size(&self) -> Result<usize, CipherError> {
        with_engine!(self, e => e.current_block_size())
    }

    pub fn init(&mut self, material: &[u8], block_size: Option<usize>) -> Result<(), CipherError> {
        with_engine!(self, e => e.init(material, block_size))
    }

    pub fn reset(&mut self) {
        with_engine!(self, e => e.reset())
    }

    pub fn encrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        with_engine!(self, e => e.encrypt_block(input, output))
    }

    pub fn decrypt_block(&self, input: &[u8], output: &mut [u8]) -> Result<(), CipherError> {
        with_engine!(self, e => e.decrypt_block(input, output))
    }

    pub fn self_test(&self) -> bool {
        with_engine!(self, e => e.self_test())
    }
}

/// Look up `name` case-insensitively and hand out a fresh engine.
///
/// `Ok(None)` means the name is simply not registered. `Err(SelfTestFailed)`
/// means the cipher exists but its implementation failed the power-on
/// correctness check, which is an integrity failure rather than a caller
/// mistake.
pub fn create(name: &str) -> Result<Option<Cipher>, CipherError> {
    let engine = match name.trim().to_lowercase().as_str() {
        "serpent" => Cipher::Serpent(BlockCipherEngine::new(Serpent)),
        "null" => Cipher::Null(BlockCipherEngine::new(NullCipher)),
        _ => return Ok(None),
    };

    if !engine.self_test() {
        return Err(CipherError::SelfTestFailed(engine.name()));
    }

    Ok(Some(engine))
}

/// The registered cipher names.
pub fn names() -> &'static [&'static str] {
    &NAMES
}
