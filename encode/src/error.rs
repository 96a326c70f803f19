use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// character outside of the codec alphabet, with its index in the input
    InvalidChar { idx: usize, ch: char },
    /// input length is not a whole number of encoded groups
    InvalidLen(usize),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::InvalidChar { idx, ch } => {
                write!(f, "invalid character `{}` at index {}", ch, idx)
            }
            EncodeError::InvalidLen(len) => {
                write!(f, "invalid input length {}", len)
            }
        }
    }
}

impl std::error::Error for EncodeError {}
