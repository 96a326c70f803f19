use crate::CipherError;
use num_bigint::{BigInt, BigUint};
use num_traits::{Euclid, One};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utils::BigUintExt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // public exponent, gcd(e, (p-1)(q-1)) = 1
    e: BigUint,
}

/// An RSA private key, either in the plain `(n, d)` form or carrying the
/// prime factorisation for the CRT fast path. Both forms produce identical
/// signatures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrivateKey {
    pk: PublicKey,
    // d * e = 1 % (p-1)(q-1)
    d: BigUint,
    factor: Option<PrimeFactor>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PrimeFactor {
    p: BigUint,
    q: BigUint,
    // d % (p - 1)
    d_p: BigUint,
    // d % (q - 1)
    d_q: BigUint,
    // q^{-1} % p
    q_inv: BigUint,
}

impl PublicKey {
    /// note: does not check that `n` and `e` are valid RSA parameters
    pub fn new_uncheck(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// RSAVP1: `s^e mod n`, the signature verification primitive.
    pub fn rsavp1(&self, s: &BigUint) -> Result<BigUint, CipherError> {
        if s < &self.n {
            Ok(s.modpow(&self.e, &self.n))
        } else {
            Err(CipherError::OutOfRange("signature representative"))
        }
    }

    pub fn is_valid(&self) -> Result<(), CipherError> {
        if self.e < BigUint::from(2u8) {
            Err(CipherError::InvalidPublicKey(format!(
                "rsa: public exponent {:#x} is too small",
                self.e
            )))
        } else if self.e > BigUint::from(u32::MAX - 1) {
            Err(CipherError::InvalidPublicKey(format!(
                "rsa: public exponent {:#x} is too large",
                self.e
            )))
        } else {
            Ok(())
        }
    }
}

impl PrivateKey {
    /// Plain form without the prime factorisation; signing falls back to
    /// `m^d mod n`.
    pub fn new_uncheck(n: BigUint, e: BigUint, d: BigUint) -> Self {
        Self {
            pk: PublicKey::new_uncheck(n, e),
            d,
            factor: None,
        }
    }

    /// Build a key from its factorisation, deriving `n` and the CRT
    /// parameters. Fails if `q` has no inverse modulo `p`.
    pub fn new_with_factor(
        p: BigUint,
        q: BigUint,
        e: BigUint,
        d: BigUint,
    ) -> Result<Self, CipherError> {
        let one = BigUint::one();
        let q_inv = q.modinv(&p).ok_or_else(|| {
            CipherError::InvalidPrivateKey("rsa: p and q are not coprime".to_string())
        })?;
        let (d_p, d_q) = (&d % (&p - &one), &d % (&q - &one));

        let pk = PublicKey::new_uncheck(&p * &q, e);
        Ok(Self {
            pk,
            d,
            factor: Some(PrimeFactor {
                p,
                q,
                d_p,
                d_q,
                q_inv,
            }),
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// RSASP1: `m^d mod n`, the signature generation primitive. Keys that
    /// carry their factorisation take the CRT path.
    pub fn rsasp1(&self, m: &BigUint) -> Result<BigUint, CipherError> {
        if m < &self.pk.n {
            Ok(self.rsasp1_uncheck(m))
        } else {
            Err(CipherError::OutOfRange("message representative"))
        }
    }

    // s1 = m^dP mod p, s2 = m^dQ mod q
    // h = (s1 - s2) * qInv mod p
    // s = s2 + q * h
    fn rsasp1_uncheck(&self, m: &BigUint) -> BigUint {
        match self.factor.as_ref() {
            Some(factor) => {
                let c = BigInt::from(m.clone());
                let (p, q) = (
                    BigInt::from(factor.p.clone()),
                    BigInt::from(factor.q.clone()),
                );
                let mut s1 = c.modpow(&BigInt::from(factor.d_p.clone()), &p);
                let s2 = c.modpow(&BigInt::from(factor.d_q.clone()), &q);

                s1 -= &s2;
                s1 *= BigInt::from(factor.q_inv.clone());
                let h = s1.rem_euclid(&p);
                (s2 + q * h)
                    .to_biguint()
                    .expect("this always can be converted to biguint")
            }
            None => m.modpow(&self.d, &self.pk.n),
        }
    }

    pub fn is_valid(&self) -> Result<(), CipherError> {
        self.pk.is_valid()?;

        if let Some(factor) = self.factor.as_ref() {
            if &factor.p * &factor.q != self.pk.n {
                return Err(CipherError::InvalidPrivateKey(
                    "rsa: modulus is not the product of p and q".to_string(),
                ));
            }

            let de = &self.d * &self.pk.e;
            let one = BigUint::one();
            for prime in [&factor.p, &factor.q] {
                if !(&de % (prime - &one)).is_one() {
                    return Err(CipherError::InvalidPrivateKey(
                        "rsa: d is not an inverse of e".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.factor.as_ref() {
            Some(factor) => write!(
                f,
                "{{pk: {}, d: {:#x}, p: {:#x}, q: {:#x}}}",
                self.pk, self.d, factor.p, factor.q
            ),
            None => write!(f, "{{pk: {}, d: {:#x}}}", self.pk, self.d),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rsa::PrivateKey;
    use num_bigint::BigUint;
    use num_traits::Num;

    // 128-bit key lifted from a gnutls self test
    fn gnu_tls_key() -> PrivateKey {
        let e = BigUint::from(65537u32);
        let d = BigUint::from_str_radix("31877380284581499213530787347443987241", 10).unwrap();
        let (p, q) = (
            BigUint::from_str_radix("16775196964030542637", 10).unwrap(),
            BigUint::from_str_radix("17328218193455850539", 10).unwrap(),
        );
        PrivateKey::new_with_factor(p, q, e, d).unwrap()
    }

    #[test]
    fn key_basics() {
        let key = gnu_tls_key();
        key.is_valid().unwrap();

        let n = BigUint::from_str_radix("290684273230919398108010081414538931343", 10).unwrap();
        assert_eq!(key.public_key().modulus(), &n);
        assert_eq!(key.public_key().exponent(), &BigUint::from(65537u32));

        let m = BigUint::from(42u32);
        let s = key.rsasp1(&m).unwrap();
        assert_eq!(key.public_key().rsavp1(&s).unwrap(), m);
    }

    #[test]
    fn crt_and_plain_paths_agree() {
        let key = gnu_tls_key();
        let plain = PrivateKey::new_uncheck(
            key.public_key().modulus().clone(),
            key.public_key().exponent().clone(),
            key.d.clone(),
        );

        for m in [0u64, 1, 2, 42, 0xdead_beef, u64::MAX] {
            let m = BigUint::from(m);
            assert_eq!(key.rsasp1(&m).unwrap(), plain.rsasp1(&m).unwrap(), "m => {m}");
        }
    }

    #[test]
    fn range_checks() {
        let key = gnu_tls_key();
        let n = key.public_key().modulus().clone();

        assert!(key.rsasp1(&n).is_err());
        assert!(key.rsasp1(&(&n + 1u32)).is_err());
        assert!(key.public_key().rsavp1(&n).is_err());

        let edge = &n - 1u32;
        assert!(key.rsasp1(&edge).is_ok());
        assert!(key.public_key().rsavp1(&edge).is_ok());
    }

    #[test]
    fn rejects_inconsistent_factorisation() {
        let key = gnu_tls_key();
        let bad = PrivateKey::new_with_factor(
            BigUint::from_str_radix("16775196964030542637", 10).unwrap(),
            BigUint::from_str_radix("17328218193455850539", 10).unwrap(),
            BigUint::from(65537u32),
            &key.d + 1u32,
        )
        .unwrap();
        assert!(bad.is_valid().is_err());
    }

    #[test]
    fn keys_survive_json() {
        let key = gnu_tls_key();
        let text = serde_json::to_string(&key).unwrap();
        let back: PrivateKey = serde_json::from_str(text.as_str()).unwrap();
        back.is_valid().unwrap();

        let m = BigUint::from(7u32);
        assert_eq!(key.rsasp1(&m).unwrap(), back.rsasp1(&m).unwrap());
    }
}
