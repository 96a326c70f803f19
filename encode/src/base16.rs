//! Base16 (hex) codec, RFC 4648 section 8.

use crate::EncodeError;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";

pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() << 1);
    for &b in data {
        out.push(ALPHABET[(b >> 4) as usize] as char);
        out.push(ALPHABET[(b & 0xf) as usize] as char);
    }
    out
}

/// Decode hex text, accepting both upper and lower case digits.
pub fn decode(s: &str) -> Result<Vec<u8>, EncodeError> {
    if s.len() & 1 != 0 {
        return Err(EncodeError::InvalidLen(s.len()));
    }

    let mut out = Vec::with_capacity(s.len() >> 1);
    let mut hi = 0u8;
    for (idx, ch) in s.chars().enumerate() {
        let v = match ch {
            '0'..='9' => ch as u8 - b'0',
            'a'..='f' => ch as u8 - b'a' + 10,
            'A'..='F' => ch as u8 - b'A' + 10,
            _ => return Err(EncodeError::InvalidChar { idx, ch }),
        };
        if idx & 1 == 0 {
            hi = v;
        } else {
            out.push((hi << 4) | v);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use crate::base16;
    use crate::EncodeError;

    #[test]
    fn rfc4648() {
        let cases = [
            ("", ""),
            ("f", "66"),
            ("fo", "666f"),
            ("foo", "666f6f"),
            ("foob", "666f6f62"),
            ("fooba", "666f6f6261"),
            ("foobar", "666f6f626172"),
        ];

        for (raw, hex) in cases {
            assert_eq!(base16::encode(raw.as_bytes()), hex);
            assert_eq!(base16::decode(hex).unwrap(), raw.as_bytes());
        }
    }

    #[test]
    fn mixed_case() {
        assert_eq!(
            base16::decode("DeadBEEF").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(base16::decode("abc"), Err(EncodeError::InvalidLen(3)));
        assert_eq!(
            base16::decode("0g"),
            Err(EncodeError::InvalidChar { idx: 1, ch: 'g' })
        );
    }
}
