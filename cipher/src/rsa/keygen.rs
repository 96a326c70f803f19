use crate::rsa::PrivateKey;
use crate::CipherError;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::Rand;
use utils::BigUintExt;

/// RSA key pair generator.
///
/// `p` is sampled as an odd `M`-bit integer, `M = ceil(L/2)`, and accepted
/// once probably prime and coprime to `e`. `q` is sampled the same way but
/// bounded only through the requirement that `p * q` has exactly `L` bits;
/// its individual range is never pinned down. The modulus bit length is
/// exact by construction.
pub struct KeyPairGenerator {
    bits: usize,
    e: BigUint,
    test_rounds: usize,
}

impl KeyPairGenerator {
    pub const MIN_MODULUS_BITS: usize = 1024;

    /// Default Miller-Rabin round count, error at most `4^{-50} = 2^{-100}`.
    pub const DEFAULT_TEST_ROUNDS: usize = 50;

    pub const DEFAULT_EXPONENT: u32 = 65537;

    pub fn new(bits: usize) -> Result<Self, CipherError> {
        if bits < Self::MIN_MODULUS_BITS {
            return Err(CipherError::InvalidParameter(format!(
                "rsa: modulus bit length {} is less than the minimum {}",
                bits,
                Self::MIN_MODULUS_BITS
            )));
        }

        Ok(Self {
            bits,
            e: BigUint::from(Self::DEFAULT_EXPONENT),
            test_rounds: Self::DEFAULT_TEST_ROUNDS,
        })
    }

    pub fn with_test_rounds(mut self, rounds: usize) -> Self {
        self.test_rounds = rounds;
        self
    }

    pub fn modulus_bits(&self) -> usize {
        self.bits
    }

    pub fn generate<R: Rand>(&self, rd: &mut R) -> Result<PrivateKey, CipherError> {
        let m = (self.bits + 1) / 2;
        let one = BigUint::one();
        let lower = &one << (m - 1);

        let p = loop {
            let c = self.sample_odd(m, rd);
            if c < lower {
                continue;
            }
            if c.gcd(&self.e).is_one() && c.probably_prime(self.test_rounds, rd) {
                break c;
            }
        };

        let q = loop {
            let c = self.sample_odd(m, rd);
            if c == p {
                continue;
            }
            if (&p * &c).bits() as usize != self.bits {
                continue;
            }
            if c.gcd(&self.e).is_one() && c.probably_prime(self.test_rounds, rd) {
                break c;
            }
        };

        let phi = (&p - &one) * (&q - &one);
        let d = self.e.modinv(&phi).ok_or_else(|| {
            CipherError::InvalidParameter(
                "rsa: public exponent is not invertible modulo phi(n)".to_string(),
            )
        })?;

        PrivateKey::new_with_factor(p, q, self.e.clone(), d)
    }

    // odd integer of at most `bits` bits
    fn sample_odd<R: Rand>(&self, bits: usize, rd: &mut R) -> BigUint {
        let nbytes = (bits + 7) >> 3;
        let mask = match bits & 7 {
            0 => 0xffu8,
            r => (1u8 << r) - 1,
        };

        let mut buf = vec![0u8; nbytes];
        rd.rand(buf.as_mut_slice());
        buf[0] &= mask;
        buf[nbytes - 1] |= 1;
        BigUint::from_bytes_be(buf.as_slice())
    }
}
