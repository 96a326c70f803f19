//! The raw wire format for RSA-PSS signatures.
//!
//! A framed signature is `magic || version || length || bytes`: the 4-byte
//! magic `0x474E5544` ("GNUD"), the version octet `0x01`, a big-endian
//! `u32` byte count and the signature octets themselves.

use crate::CipherError;

pub const RAW_MAGIC: [u8; 4] = [0x47, 0x4e, 0x55, 0x44];
pub const RAW_VERSION: u8 = 0x01;

const HEADER_LEN: usize = 9;

pub fn encode_signature(signature: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + signature.len());
    out.extend_from_slice(&RAW_MAGIC);
    out.push(RAW_VERSION);
    out.extend_from_slice(&(signature.len() as u32).to_be_bytes());
    out.extend_from_slice(signature);
    out
}

pub fn decode_signature(buf: &[u8]) -> Result<Vec<u8>, CipherError> {
    if buf.len() < HEADER_LEN {
        return Err(CipherError::Truncated {
            need: HEADER_LEN,
            got: buf.len(),
        });
    }

    if buf[..4] != RAW_MAGIC {
        return Err(CipherError::BadMagic(u32::from_be_bytes([
            buf[0], buf[1], buf[2], buf[3],
        ])));
    }

    if buf[4] != RAW_VERSION {
        return Err(CipherError::BadVersion(buf[4]));
    }

    let len = u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]) as usize;
    let body = &buf[HEADER_LEN..];
    if body.len() < len {
        return Err(CipherError::Truncated {
            need: len,
            got: body.len(),
        });
    }

    Ok(body[..len].to_vec())
}
