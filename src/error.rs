use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GnudError {
    #[error("unknown cipher `{0}`, try --list")]
    UnknownCipher(String),

    #[error("unknown hash `{0}`")]
    UnknownHash(String),

    #[error("invalid block: expect {expect} bytes, got {got}")]
    InvalidBlockLen { expect: usize, got: usize },
}
