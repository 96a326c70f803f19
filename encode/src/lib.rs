mod error;

pub mod base16;

pub use error::EncodeError;
