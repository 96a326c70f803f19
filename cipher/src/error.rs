use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// engine used before `init`
    NotInitialized,
    /// `init` called on an engine that already holds a session key
    AlreadyInitialized,
    /// requested block size is not advertised by the cipher
    UnsupportedBlockSize { cipher: &'static str, real: usize },
    /// key material length is not advertised by the cipher
    InvalidKeySize {
        real: usize,
        supported: &'static [usize],
    },
    /// input or output buffer is not exactly one block
    InvalidBlockSize { target: usize, real: usize },
    /// a cipher failed its power-on known answer and symmetry checks
    SelfTestFailed(&'static str),
    InvalidParameter(String),
    /// an integer representative fell outside `[0, n-1]`
    OutOfRange(&'static str),
    /// a signature representative does not fit the fixed octet width
    IntegerTooLarge,
    InvalidPublicKey(String),
    InvalidPrivateKey(String),
    /// signature blob does not start with the raw format magic
    BadMagic(u32),
    BadVersion(u8),
    Truncated { need: usize, got: usize },
}

impl Display for CipherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::NotInitialized => {
                write!(f, "cipher: the engine is not initialized")
            }
            CipherError::AlreadyInitialized => {
                write!(f, "cipher: the engine is already initialized")
            }
            CipherError::UnsupportedBlockSize { cipher, real } => {
                write!(f, "cipher: `{}` does not support block size {}", cipher, real)
            }
            CipherError::InvalidKeySize { real, supported } => {
                write!(
                    f,
                    "cipher: invalid key size {}, supported sizes are {:?}",
                    real, supported
                )
            }
            CipherError::InvalidBlockSize { target, real } => {
                write!(f, "cipher: need a {} byte block, got {} bytes", target, real)
            }
            CipherError::SelfTestFailed(name) => {
                write!(f, "cipher: `{}` failed its self test", name)
            }
            CipherError::InvalidParameter(s) => write!(f, "{}", s),
            CipherError::OutOfRange(what) => {
                write!(f, "rsa: {} out of range", what)
            }
            CipherError::IntegerTooLarge => {
                write!(f, "rsa: integer too large")
            }
            CipherError::InvalidPublicKey(s) => write!(f, "{}", s),
            CipherError::InvalidPrivateKey(s) => write!(f, "{}", s),
            CipherError::BadMagic(magic) => {
                write!(f, "sig: bad magic {:#010x}", magic)
            }
            CipherError::BadVersion(v) => {
                write!(f, "sig: unsupported format version {}", v)
            }
            CipherError::Truncated { need, got } => {
                write!(f, "sig: truncated input, need {} bytes but got {}", need, got)
            }
        }
    }
}

impl std::error::Error for CipherError {}
