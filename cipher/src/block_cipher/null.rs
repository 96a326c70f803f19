use crate::block_cipher::BlockCipherSpi;
use crate::CipherError;

const BLOCK_SIZES: [usize; 3] = [16, 24, 32];

// every length from 8 through 63 bytes
const KEY_SIZES: [usize; 56] = {
    let mut sizes = [0usize; 56];
    let mut i = 0;
    while i < sizes.len() {
        sizes[i] = i + 8;
        i += 1;
    }
    sizes
};

/// The identity cipher. Useful for exercising the engine and registry
/// plumbing and as a baseline in tests; provides no security whatsoever.
pub struct NullCipher;

impl BlockCipherSpi for NullCipher {
    const NAME: &'static str = "null";

    type SessionKey = ();

    fn block_sizes(&self) -> &'static [usize] {
        &BLOCK_SIZES
    }

    fn key_sizes(&self) -> &'static [usize] {
        &KEY_SIZES
    }

    fn make_key(&self, material: &[u8], _block_size: usize) -> Result<(), CipherError> {
        if !KEY_SIZES.contains(&material.len()) {
            return Err(CipherError::InvalidKeySize {
                real: material.len(),
                supported: &KEY_SIZES,
            });
        }
        Ok(())
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8], _key: &(), _block_size: usize) {
        output.copy_from_slice(input);
    }

    fn decrypt(&self, input: &[u8], output: &mut [u8], _key: &(), _block_size: usize) {
        output.copy_from_slice(input);
    }
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{BlockCipherEngine, NullCipher};
    use crate::CipherError;

    #[test]
    fn identity() {
        for bs in [16usize, 24, 32] {
            let mut engine = BlockCipherEngine::new(NullCipher);
            engine.init(&[0u8; 8], Some(bs)).unwrap();

            let pt = (0..bs).map(|i| i as u8).collect::<Vec<_>>();
            let mut ct = vec![0u8; bs];
            engine.encrypt_block(pt.as_slice(), ct.as_mut_slice()).unwrap();
            assert_eq!(ct, pt);
            engine.decrypt_block(pt.as_slice(), ct.as_mut_slice()).unwrap();
            assert_eq!(ct, pt);
        }
    }

    #[test]
    fn key_size_range() {
        let mut engine = BlockCipherEngine::new(NullCipher);
        assert!(matches!(
            engine.init(&[0u8; 7], None),
            Err(CipherError::InvalidKeySize { real: 7, .. })
        ));
        assert!(matches!(
            engine.init(&[0u8; 64], None),
            Err(CipherError::InvalidKeySize { real: 64, .. })
        ));
        engine.init(&[0u8; 63], None).unwrap();
    }
}
