pub mod cmd;
pub mod error;

pub use error::GnudError;
