use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rand;

const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Arithmetic helpers on `BigUint` used by the RSA key machinery.
pub trait BigUintExt {
    /// `self^{-1} mod m`, `None` if `gcd(self, m) != 1`.
    fn modinv(&self, m: &Self) -> Option<BigUint>;

    /// Uniform random integer in `[0, self)`. `self` must not be zero.
    fn gen_below<R: Rand>(&self, rd: &mut R) -> BigUint;

    /// Miller-Rabin primality test preceded by trial division. For an odd
    /// candidate the probability of a false positive is at most `4^{-rounds}`.
    fn probably_prime<R: Rand>(&self, rounds: usize, rd: &mut R) -> bool;
}

impl BigUintExt for BigUint {
    fn modinv(&self, m: &Self) -> Option<BigUint> {
        let (a, m) = (BigInt::from(self.clone()), BigInt::from(m.clone()));
        let g = a.extended_gcd(&m);
        if !g.gcd.is_one() {
            return None;
        }

        g.x.mod_floor(&m).to_biguint()
    }

    fn gen_below<R: Rand>(&self, rd: &mut R) -> BigUint {
        debug_assert!(!self.is_zero());

        let bits = self.bits();
        let nbytes = ((bits + 7) >> 3) as usize;
        // mask off the excess bits of the top byte so that roughly half of
        // the samples land below the bound
        let mask = match bits & 7 {
            0 => 0xffu8,
            r => (1u8 << r) - 1,
        };

        let mut buf = vec![0u8; nbytes];
        loop {
            rd.rand(buf.as_mut_slice());
            buf[0] &= mask;
            let candidate = BigUint::from_bytes_be(buf.as_slice());
            if &candidate < self {
                break candidate;
            }
        }
    }

    fn probably_prime<R: Rand>(&self, rounds: usize, rd: &mut R) -> bool {
        let two = BigUint::from(2u32);
        if self < &two {
            return false;
        }

        if let Some(n) = self.to_u32() {
            return SMALL_PRIMES.contains(&n) || small_prime_witness(n);
        }

        for p in SMALL_PRIMES {
            if (self % p).is_zero() {
                return false;
            }
        }

        // self - 1 = d * 2^s
        let nm1 = self - 1u32;
        let s = nm1.trailing_zeros().unwrap_or(0);
        let d = &nm1 >> s;

        let bound = self - 3u32;
        'witness: for _ in 0..rounds {
            let a = bound.gen_below(rd) + &two;
            let mut x = a.modpow(&d, self);
            if x.is_one() || x == nm1 {
                continue;
            }
            for _ in 1..s {
                x = x.modpow(&two, self);
                if x == nm1 {
                    continue 'witness;
                }
            }
            return false;
        }

        true
    }
}

// exact test for candidates small enough to trial divide completely
fn small_prime_witness(n: u32) -> bool {
    if n < 2 || n & 1 == 0 {
        return n == 2;
    }
    let mut f = 3u32;
    while f.saturating_mul(f) <= n {
        if n % f == 0 {
            return false;
        }
        f += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::BigUintExt;
    use num_bigint::BigUint;
    use num_traits::{Num, One};
    use xrand::rngs::StdRng;
    use xrand::SeedableRng;

    #[test]
    fn modinv() {
        let (a, m) = (BigUint::from(3u32), BigUint::from(11u32));
        assert_eq!(a.modinv(&m), Some(BigUint::from(4u32)));

        let (a, m) = (BigUint::from(6u32), BigUint::from(9u32));
        assert_eq!(a.modinv(&m), None);

        let e = BigUint::from(65537u32);
        let phi = BigUint::from_str_radix(
            "290684273230919398073906666257052538168",
            10,
        )
        .unwrap();
        let d = e.modinv(&phi).unwrap();
        assert!((&d * &e) % &phi == BigUint::one());
    }

    #[test]
    fn gen_below() {
        let mut rd = StdRng::seed_from_u64(0x5eed);
        let bound = BigUint::from_str_radix("fedcba9876543210fedcba9876543210", 16).unwrap();
        for _ in 0..64 {
            assert!(bound.gen_below(&mut rd) < bound);
        }
    }

    #[test]
    fn probably_prime_small() {
        let mut rd = StdRng::seed_from_u64(1);
        let primes = [2u32, 3, 5, 7, 251, 257, 65537, 1000003];
        let composites = [0u32, 1, 4, 9, 255, 65535, 1000001];
        for p in primes {
            assert!(BigUint::from(p).probably_prime(16, &mut rd), "{p}");
        }
        for c in composites {
            assert!(!BigUint::from(c).probably_prime(16, &mut rd), "{c}");
        }
    }

    #[test]
    fn probably_prime_large() {
        let mut rd = StdRng::seed_from_u64(2);
        // 2^127 - 1, Mersenne prime
        let m127 = (BigUint::one() << 127u32) - 1u32;
        assert!(m127.probably_prime(32, &mut rd));
        // 2^128 + 1 = 59649589127497217 * 5704689200685129054721
        let f7 = (BigUint::one() << 128u32) + 1u32;
        assert!(!f7.probably_prime(32, &mut rd));
    }
}
