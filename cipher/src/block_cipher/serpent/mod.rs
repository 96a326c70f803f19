//! The Serpent block cipher, the AES finalist by Anderson, Biham and
//! Knudsen. A 32-round substitution-permutation network over four 32-bit
//! words, with a 128-bit block and 128/192/256-bit keys.

mod sbox;

use crate::block_cipher::{BlockCipherSpi, KnownAnswer};
use crate::CipherError;
use sbox::{ISBOX, SBOX};

/// Fractional part of the golden ratio, (sqrt(5)+1)/2.
const PHI: u32 = 0x9e3779b9;

const ROUNDS: usize = 32;
const BLOCK_SIZES: [usize; 1] = [16];
const KEY_SIZES: [usize; 3] = [16, 24, 32];

// ecb_vk vector I=9
const KAT: [KnownAnswer; 1] = [KnownAnswer {
    key: &[
        0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
    ciphertext: &[
        0x55, 0x87, 0xb5, 0xbc, 0xb9, 0xee, 0x5a, 0x28, 0xba, 0x2b, 0xac, 0xc4, 0x18, 0x00, 0x52,
        0x40,
    ],
}];

pub struct Serpent;

/// The 132 round-key words of an expanded Serpent key.
pub struct SerpentKey([u32; 4 * (ROUNDS + 1)]);

#[cfg(feature = "sec-zeroize")]
impl zeroize::Zeroize for SerpentKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl BlockCipherSpi for Serpent {
    const NAME: &'static str = "serpent";

    type SessionKey = SerpentKey;

    fn block_sizes(&self) -> &'static [usize] {
        &BLOCK_SIZES
    }

    fn key_sizes(&self) -> &'static [usize] {
        &KEY_SIZES
    }

    fn make_key(
        &self,
        material: &[u8],
        _block_size: usize,
    ) -> Result<SerpentKey, CipherError> {
        if !KEY_SIZES.contains(&material.len()) {
            return Err(CipherError::InvalidKeySize {
                real: material.len(),
                supported: &KEY_SIZES,
            });
        }

        // The prekey: key words in reverse byte-group order, then the
        // golden-ratio recurrence. The session key is w[8..140].
        let mut w = [0u32; 140];
        for (wi, c) in w.iter_mut().zip(material.chunks_exact(4).rev()) {
            *wi = u32::from_be_bytes([c[0], c[1], c[2], c[3]]);
        }
        // pad keys shorter than 256 bits
        if material.len() < 32 {
            w[material.len() / 4] = 1;
        }
        for i in 8..w.len() {
            let t = w[i - 8] ^ w[i - 5] ^ w[i - 3] ^ w[i - 1] ^ PHI ^ (i as u32 - 8);
            w[i] = t.rotate_left(11);
        }

        let mut k = [0u32; 4 * (ROUNDS + 1)];
        k.copy_from_slice(&w[8..]);

        // scramble each 4-word group, starting with S3 and stepping down
        for (i, g) in k.chunks_exact_mut(4).enumerate() {
            let out = SBOX[(35 - i) % 8](g[0], g[1], g[2], g[3]);
            g.copy_from_slice(&out);
        }

        Ok(SerpentKey(k))
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8], key: &SerpentKey, _block_size: usize) {
        let key = &key.0;
        let mut x = load_block(input);

        for r in 0..ROUNDS {
            let k = &key[4 * r..4 * r + 4];
            x = SBOX[r % 8](x[0] ^ k[0], x[1] ^ k[1], x[2] ^ k[2], x[3] ^ k[3]);
            if r != ROUNDS - 1 {
                transform(&mut x);
            }
        }

        for (xi, ki) in x.iter_mut().zip(&key[128..]) {
            *xi ^= ki;
        }

        store_block(&x, output);
    }

    fn decrypt(&self, input: &[u8], output: &mut [u8], key: &SerpentKey, _block_size: usize) {
        let key = &key.0;
        let mut x = load_block(input);

        x = ISBOX[7](
            x[0] ^ key[128],
            x[1] ^ key[129],
            x[2] ^ key[130],
            x[3] ^ key[131],
        );
        for r in (0..ROUNDS - 1).rev() {
            transform_inv(&mut x, &key[4 * (r + 1)..4 * (r + 1) + 4]);
            x = ISBOX[r % 8](x[0], x[1], x[2], x[3]);
        }

        for (xi, ki) in x.iter_mut().zip(&key[..4]) {
            *xi ^= ki;
        }

        store_block(&x, output);
    }

    fn known_answers(&self) -> &'static [KnownAnswer] {
        &KAT
    }

    #[cfg(feature = "sec-zeroize")]
    fn scrub_key(&self, key: &mut SerpentKey) {
        use zeroize::Zeroize;
        key.zeroize();
    }
}

// x[3] holds the first four input bytes, x[0] the last four
fn load_block(input: &[u8]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (xi, c) in x.iter_mut().zip(input.chunks_exact(4).rev()) {
        *xi = u32::from_be_bytes([c[0], c[1], c[2], c[3]]);
    }
    x
}

fn store_block(x: &[u32; 4], output: &mut [u8]) {
    for (xi, c) in x.iter().rev().zip(output.chunks_exact_mut(4)) {
        c.copy_from_slice(&xi.to_be_bytes());
    }
}

/// The linear transformation.
fn transform(x: &mut [u32; 4]) {
    x[0] = x[0].rotate_left(13);
    x[2] = x[2].rotate_left(3);
    x[1] ^= x[0] ^ x[2];
    x[3] ^= x[2] ^ (x[0] << 3);
    x[1] = x[1].rotate_left(1);
    x[3] = x[3].rotate_left(7);
    x[0] ^= x[1] ^ x[3];
    x[2] ^= x[3] ^ (x[1] << 7);
    x[0] = x[0].rotate_left(5);
    x[2] = x[2].rotate_left(22);
}

/// The inverse linear transformation, with the round-key XOR folded in.
fn transform_inv(x: &mut [u32; 4], key: &[u32]) {
    for (xi, ki) in x.iter_mut().zip(key) {
        *xi ^= ki;
    }

    x[2] = x[2].rotate_right(22);
    x[0] = x[0].rotate_right(5);
    x[2] ^= x[3] ^ (x[1] << 7);
    x[0] ^= x[1] ^ x[3];
    x[3] = x[3].rotate_right(7);
    x[1] = x[1].rotate_right(1);
    x[3] ^= x[2] ^ (x[0] << 3);
    x[1] ^= x[0] ^ x[2];
    x[2] = x[2].rotate_right(3);
    x[0] = x[0].rotate_right(13);
}

#[cfg(test)]
mod tests {
    use crate::block_cipher::{BlockCipherEngine, Serpent};

    fn engine_with_key(key: &[u8]) -> BlockCipherEngine<Serpent> {
        let mut engine = BlockCipherEngine::new(Serpent);
        engine.init(key, None).unwrap();
        engine
    }

    #[test]
    fn known_answer() {
        let key = encode::base16::decode("008000000000000000000000000000000000000000000000")
            .unwrap();
        let engine = engine_with_key(key.as_slice());

        let (pt, mut ct) = ([0u8; 16], [0u8; 16]);
        engine.encrypt_block(&pt, &mut ct).unwrap();
        assert_eq!(
            encode::base16::encode(&ct),
            "5587b5bcb9ee5a28ba2bacc418005240"
        );

        let mut back = [0u8; 16];
        engine.decrypt_block(&ct, &mut back).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn symmetry_all_key_sizes() {
        for ks in [16usize, 24, 32] {
            let key = (0..ks).map(|i| i as u8).collect::<Vec<_>>();
            let engine = engine_with_key(key.as_slice());

            let pt = (0..16).map(|i| (0xf0 | i) as u8).collect::<Vec<_>>();
            let (mut ct, mut back) = ([0u8; 16], [0u8; 16]);
            engine.encrypt_block(pt.as_slice(), &mut ct).unwrap();
            assert_ne!(ct.to_vec(), pt, "key size => {ks}");
            engine.decrypt_block(&ct, &mut back).unwrap();
            assert_eq!(back.to_vec(), pt, "key size => {ks}");
        }
    }

    #[test]
    fn deterministic() {
        let engine = engine_with_key(&[0x5a; 32]);
        let pt = [0xa5u8; 16];
        let (mut c1, mut c2) = ([0u8; 16], [0u8; 16]);
        engine.encrypt_block(&pt, &mut c1).unwrap();
        engine.encrypt_block(&pt, &mut c2).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn distinct_keys_distinct_ciphertexts() {
        let (e1, e2) = (engine_with_key(&[0u8; 16]), engine_with_key(&[1u8; 16]));
        let pt = [0u8; 16];
        let (mut c1, mut c2) = ([0u8; 16], [0u8; 16]);
        e1.encrypt_block(&pt, &mut c1).unwrap();
        e2.encrypt_block(&pt, &mut c2).unwrap();
        assert_ne!(c1, c2);
    }
}
