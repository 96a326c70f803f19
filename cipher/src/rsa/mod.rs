//! RSA keys, key pair generation and the RSA-PSS signature scheme
//! (PKCS #1 v2.2 / IEEE P1363a).

mod key;
mod keygen;
mod pss;

pub mod codec;

pub use key::{PrivateKey, PublicKey};
pub use keygen::KeyPairGenerator;
pub use pss::{PssSign, PssVerify};
