//! RSA-PSS, the probabilistic signature scheme of Bellare and Rogaway as
//! standardised in PKCS #1 v2.2.
//!
//! Signatures are framed with the raw codec from [`crate::rsa::codec`];
//! verification accepts exactly that format.

use crate::rsa::{codec, PrivateKey, PublicKey};
use crate::{CipherError, Rand, Sign, Verify};
use crypto_hash::Digest;
use num_bigint::BigUint;
use std::cell::RefCell;
use std::ops::Range;

pub struct PssVerify<H: Digest> {
    key: PublicKey,
    // salt length in bytes
    slen: usize,
    hlen: usize,
    hf: RefCell<H>,
}

pub struct PssSign<H: Digest, R: Rand> {
    key: PrivateKey,
    pss: PssVerify<H>,
    rd: RefCell<R>,
}

impl<H: Digest> AsRef<PublicKey> for PssVerify<H> {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl<H: Digest, R: Rand> AsRef<PrivateKey> for PssSign<H, R> {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

impl<H: Digest> PssVerify<H> {
    /// `salt_len` of `None` selects a salt as long as the digest.
    pub fn new(key: PublicKey, hasher: H, salt_len: Option<usize>) -> Result<Self, CipherError> {
        if hasher.digest_bits() & 7 != 0 {
            return Err(CipherError::InvalidParameter(
                "pss: hasher bits must be a multiple of 8".to_string(),
            ));
        }

        key.is_valid()?;
        let (klen, hlen) = (
            (key.modulus().bits() as usize + 7) >> 3,
            hasher.digest_len(),
        );
        if klen < hlen + 2 {
            return Err(CipherError::InvalidParameter(
                "pss: the public key modulus is too short".to_string(),
            ));
        }

        let slen = salt_len.unwrap_or(hlen);
        let em_len = (key.modulus().bits() as usize + 6) >> 3;
        if em_len < hlen + slen + 2 {
            return Err(CipherError::InvalidParameter(
                "pss: the salt is too long for the key".to_string(),
            ));
        }

        Ok(Self {
            key,
            slen,
            hlen,
            hf: RefCell::new(hasher),
        })
    }

    pub fn salt_len(&self) -> usize {
        self.slen
    }

    pub fn hash_len(&self) -> usize {
        self.hlen
    }

    pub fn key_bits(&self) -> usize {
        self.key.modulus().bits() as usize
    }

    /// Octet width `k` of the modulus.
    pub fn key_len(&self) -> usize {
        (self.key_bits() + 7) >> 3
    }

    pub fn em_bits(&self) -> usize {
        self.key_bits() - 1
    }

    pub fn em_len(&self) -> usize {
        (self.em_bits() + 7) >> 3
    }

    // (db_idx, hash_idx) into em = maskedDB || H || 0xbc
    fn idx_bound(&self) -> (Range<usize>, Range<usize>) {
        let (em_len, hlen) = (self.em_len(), self.hlen);
        (0..em_len - hlen - 1, em_len - hlen - 1..em_len - 1)
    }

    fn mgf1_xor(&self, em: &mut [u8]) {
        let (db_idx, h_idx) = self.idx_bound();
        let (mut done, mut count, out_len) = (0usize, 0u32, db_idx.end - db_idx.start);

        let mut hf = self.hf.borrow_mut();
        while done < out_len {
            hf.update(&em[h_idx.clone()]);
            hf.update(count.to_be_bytes().as_ref());
            let d = hf.finish();

            em[db_idx.clone()]
                .iter_mut()
                .skip(done)
                .zip(d)
                .for_each(|(a, b)| {
                    *a ^= b;
                    done += 1;
                });

            count += 1;
        }
    }

    // em = maskedDB || H || 0xbc
    // H = Hash(0x00 * 8 || Hash(msg) || salt)
    // db = ps || 0x01 || salt
    // maskedDB = MGF(H, em_len - hlen - 1) ^ db
    fn emsa_pss_encode_with_salt(
        &self,
        msg: &[u8],
        salt: &[u8],
        em: &mut Vec<u8>,
    ) -> Result<(), CipherError> {
        let (em_len, slen) = (self.em_len(), self.slen);

        em.clear();
        em.resize(em_len, 0);

        let mut hasher = self.hf.borrow_mut();
        hasher.update(msg);
        let m_hash = hasher.finish();

        hasher.update([0u8; 8].as_slice());
        hasher.update(m_hash.as_slice());
        hasher.update(salt);
        let h = hasher.finish();
        drop(hasher);

        let (db_idx, h_idx) = self.idx_bound();
        em[h_idx.clone()].copy_from_slice(h.as_slice());
        em[h_idx.end] = 0xbc;
        em[db_idx.end - slen - 1] = 0x01;
        em[db_idx.end - slen..db_idx.end].copy_from_slice(salt);
        self.mgf1_xor(em.as_mut_slice());
        em[0] &= 0xffu8 >> ((em_len << 3) - self.em_bits());

        Ok(())
    }

    fn emsa_pss_verify(&self, msg: &[u8], em: &mut [u8]) -> bool {
        let (em_len, slen) = (self.em_len(), self.slen);
        if em.len() != em_len {
            return false;
        }

        // trailer and the bits above em_bits
        let excess = (em_len << 3) - self.em_bits();
        if em[em_len - 1] != 0xbc {
            return false;
        }
        if excess > 0 && em[0] & (0xffu8 << (8 - excess)) != 0 {
            return false;
        }

        let (db_idx, h_idx) = self.idx_bound();
        self.mgf1_xor(em);
        em[0] &= 0xffu8 >> excess;

        // db = ps || 0x01 || salt
        if em.iter().take(db_idx.end - slen - 1).any(|&a| a != 0) {
            return false;
        }
        if em[db_idx.end - slen - 1] != 0x01 {
            return false;
        }

        let mut hasher = self.hf.borrow_mut();
        hasher.update(msg);
        let m_hash = hasher.finish();

        hasher.update([0u8; 8].as_slice());
        hasher.update(m_hash.as_slice());
        hasher.update(&em[db_idx.end - slen..db_idx.end]);
        let h = hasher.finish();

        h == em[h_idx]
    }

    fn verify_inner(&self, msg: &[u8], signature: &[u8]) -> bool {
        let raw = match codec::decode_signature(signature) {
            Ok(raw) => raw,
            Err(_) => return false,
        };
        if raw.len() != self.key_len() {
            return false;
        }

        let s = BigUint::from_bytes_be(raw.as_slice());
        let m = match self.key.rsavp1(&s) {
            Ok(m) => m,
            Err(_) => return false,
        };

        let em_len = self.em_len();
        let mut em = m.to_bytes_be();
        if em.len() > em_len {
            return false;
        }
        let len = em.len();
        em.resize(em_len, 0);
        em.rotate_right(em_len - len);

        self.emsa_pss_verify(msg, em.as_mut_slice())
    }
}

impl<H: Digest, R: Rand> PssSign<H, R> {
    /// `salt_len` of `None` selects a salt as long as the digest.
    pub fn new(
        key: PrivateKey,
        hasher: H,
        rd: R,
        salt_len: Option<usize>,
    ) -> Result<Self, CipherError> {
        key.is_valid()?;
        Self::new_uncheck(key, hasher, rd, salt_len)
    }

    /// Skips the private key consistency check.
    pub fn new_uncheck(
        key: PrivateKey,
        hasher: H,
        rd: R,
        salt_len: Option<usize>,
    ) -> Result<Self, CipherError> {
        let pss = PssVerify::new(key.public_key().clone(), hasher, salt_len)?;
        Ok(Self {
            key,
            pss,
            rd: RefCell::new(rd),
        })
    }

    pub fn salt_len(&self) -> usize {
        self.pss.salt_len()
    }

    pub fn key_len(&self) -> usize {
        self.pss.key_len()
    }

    fn sign_inner(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut em = vec![];
        {
            let (mut salt, mut rd) = (vec![0u8; self.pss.slen], self.rd.borrow_mut());
            rd.rand(salt.as_mut_slice());
            drop(rd);
            self.pss.emsa_pss_encode_with_salt(msg, salt.as_slice(), &mut em)?;
        }

        let m = BigUint::from_bytes_be(em.as_slice());
        let s = self.key.rsasp1(&m)?;

        let raw = s.to_bytes_be();
        let k = self.pss.key_len();
        if raw.len() > k {
            return Err(CipherError::IntegerTooLarge);
        }
        let mut fixed = vec![0u8; k];
        fixed[k - raw.len()..].copy_from_slice(raw.as_slice());

        signature.clear();
        signature.extend_from_slice(codec::encode_signature(fixed.as_slice()).as_slice());
        Ok(())
    }
}

impl<H: Digest> Verify for PssVerify<H> {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> bool {
        self.verify_inner(msg, signature)
    }
}

impl<H: Digest, R: Rand> Verify for PssSign<H, R> {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> bool {
        self.pss.verify_inner(msg, signature)
    }
}

impl<H: Digest, R: Rand> Sign for PssSign<H, R> {
    fn sign(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError> {
        self.sign_inner(msg, signature)
    }
}

#[cfg(test)]
mod tests {
    use crate::rsa::{codec, PrivateKey, PssSign, PssVerify, PublicKey};
    use crate::{Sign, Verify};
    use crypto_hash::{SHA1, SHA256};
    use num_bigint::BigUint;
    use num_traits::Num;
    use xrand::rngs::StdRng;
    use xrand::SeedableRng;

    // RSA-PSS reference vector key (1024 bit)
    fn reference_key() -> PrivateKey {
        let (e, d, p, q) = (
            BigUint::from(0x10001u32),
            BigUint::from_str_radix("77db0681e603c83450e5201b64064bb909ee62caf04270464aa875bee008674e79b612fb443acdb7c925d6fe4d585977c3074e2ad604f59fde4a0494d6643124f245132b34b1ebbe86d6224a003af425d26300cdb1089bef63f44c3d9ea34143045a3e1ee73f917cbeb7b96641a539b3f777cd081d69e9fbe0f7b081bd0a361d", 16).unwrap(),
            BigUint::from_str_radix("c5d940adfaee20d634f1aed7768dc40b050873f75e4d2eb192eba01db5896a90c4362c7a3f83cd3116aebc178dcb00cb321d760d9c9edfe4fb191f6c169b8c5b", 16).unwrap(),
            BigUint::from_str_radix("d6a304998f9c9c81afdc04d39adab29ef4c98574cfa73464bee5dc16c36e1d95b2276e0486f49020f5d06b7dc524032c3a2929f2f25c7b482e52bc835861b5b7", 16).unwrap(),
        );
        PrivateKey::new_with_factor(p, q, e, d).unwrap()
    }

    #[test]
    fn emsa_pss_reference_vector() {
        let msg = vec![
            0x85u8, 0x9e, 0xef, 0x2f, 0xd7, 0x8a, 0xca, 0x00, 0x30, 0x8b, 0xdc, 0x47, 0x11, 0x93,
            0xbf, 0x55, 0xbf, 0x9d, 0x78, 0xdb, 0x8f, 0x8a, 0x67, 0x2b, 0x48, 0x46, 0x34, 0xf3,
            0xc9, 0xc2, 0x6e, 0x64, 0x78, 0xae, 0x10, 0x26, 0x0f, 0xe0, 0xdd, 0x8c, 0x08, 0x2e,
            0x53, 0xa5, 0x29, 0x3a, 0xf2, 0x17, 0x3c, 0xd5, 0x0c, 0x6d, 0x5d, 0x35, 0x4f, 0xeb,
            0xf7, 0x8b, 0x26, 0x02, 0x1c, 0x25, 0xc0, 0x27, 0x12, 0xe7, 0x8c, 0xd4, 0x69, 0x4c,
            0x9f, 0x46, 0x97, 0x77, 0xe4, 0x51, 0xe7, 0xf8, 0xe9, 0xe0, 0x4c, 0xd3, 0x73, 0x9c,
            0x6b, 0xbf, 0xed, 0xae, 0x48, 0x7f, 0xb5, 0x56, 0x44, 0xe9, 0xca, 0x74, 0xff, 0x77,
            0xa5, 0x3c, 0xb7, 0x29, 0x80, 0x2f, 0x6e, 0xd4, 0xa5, 0xff, 0xa8, 0xba, 0x15, 0x98,
            0x90, 0xfc,
        ];
        let salt = vec![
            0xe3u8, 0xb5, 0xd5, 0xd0, 0x02, 0xc1, 0xbc, 0xe5, 0x0c, 0x2b, 0x65, 0xef, 0x88, 0xa1,
            0x88, 0xd8, 0x3b, 0xce, 0x7e, 0x61,
        ];
        let expected = vec![
            0x66u8, 0xe4, 0x67, 0x2e, 0x83, 0x6a, 0xd1, 0x21, 0xba, 0x24, 0x4b, 0xed, 0x65, 0x76,
            0xb8, 0x67, 0xd9, 0xa4, 0x47, 0xc2, 0x8a, 0x6e, 0x66, 0xa5, 0xb8, 0x7d, 0xee, 0x7f,
            0xbc, 0x7e, 0x65, 0xaf, 0x50, 0x57, 0xf8, 0x6f, 0xae, 0x89, 0x84, 0xd9, 0xba, 0x7f,
            0x96, 0x9a, 0xd6, 0xfe, 0x02, 0xa4, 0xd7, 0x5f, 0x74, 0x45, 0xfe, 0xfd, 0xd8, 0x5b,
            0x6d, 0x3a, 0x47, 0x7c, 0x28, 0xd2, 0x4b, 0xa1, 0xe3, 0x75, 0x6f, 0x79, 0x2d, 0xd1,
            0xdc, 0xe8, 0xca, 0x94, 0x44, 0x0e, 0xcb, 0x52, 0x79, 0xec, 0xd3, 0x18, 0x3a, 0x31,
            0x1f, 0xc8, 0x96, 0xda, 0x1c, 0xb3, 0x93, 0x11, 0xaf, 0x37, 0xea, 0x4a, 0x75, 0xe2,
            0x4b, 0xdb, 0xfd, 0x5c, 0x1d, 0xa0, 0xde, 0x7c, 0xec, 0xdf, 0x1a, 0x89, 0x6f, 0x9d,
            0x8b, 0xc8, 0x16, 0xd9, 0x7c, 0xd7, 0xa2, 0xc4, 0x3b, 0xad, 0x54, 0x6f, 0xbe, 0x8c,
            0xfe, 0xbc,
        ];

        let key = reference_key();
        let pss =
            PssVerify::new(key.public_key().clone(), SHA1::new(), Some(salt.len())).unwrap();

        let mut em = Vec::with_capacity(expected.len());
        pss.emsa_pss_encode_with_salt(msg.as_slice(), salt.as_slice(), &mut em)
            .unwrap();
        assert_eq!(em, expected);

        assert!(pss.emsa_pss_verify(msg.as_slice(), em.as_mut_slice()));
    }

    #[test]
    fn sign_verify_round_trip() {
        let key = reference_key();
        let rd = StdRng::seed_from_u64(0x7055);
        let pss = PssSign::new(key, SHA256::new(), rd, None).unwrap();

        let msg = b"The quick brown fox jumps over the lazy dog";
        let mut sig = vec![];
        pss.sign(msg.as_slice(), &mut sig).unwrap();

        // framed with the raw codec, body is exactly k bytes
        assert_eq!(&sig[..4], &codec::RAW_MAGIC);
        assert_eq!(
            codec::decode_signature(sig.as_slice()).unwrap().len(),
            pss.key_len()
        );

        assert!(pss.verify(msg.as_slice(), sig.as_slice()));
    }

    #[test]
    fn verify_rejects_tampering() {
        let key = reference_key();
        let rd = StdRng::seed_from_u64(7);
        let pss = PssSign::new(key, SHA256::new(), rd, None).unwrap();

        let msg = b"attack at dawn";
        let mut sig = vec![];
        pss.sign(msg.as_slice(), &mut sig).unwrap();
        assert!(pss.verify(msg.as_slice(), sig.as_slice()));

        assert!(!pss.verify(b"attack at dusk", sig.as_slice()));

        let mut bent = sig.clone();
        *bent.last_mut().unwrap() ^= 1;
        assert!(!pss.verify(msg.as_slice(), bent.as_slice()));

        // damaged framing and truncation also read as invalid
        let mut bad_magic = sig.clone();
        bad_magic[0] = 0;
        assert!(!pss.verify(msg.as_slice(), bad_magic.as_slice()));
        assert!(!pss.verify(msg.as_slice(), &sig[..sig.len() - 1]));
        assert!(!pss.verify(msg.as_slice(), &[]));
    }

    #[test]
    fn verify_with_wrong_key_fails() {
        let key = reference_key();
        let rd = StdRng::seed_from_u64(11);
        let pss = PssSign::new(key, SHA256::new(), rd, None).unwrap();

        let msg = b"key binding";
        let mut sig = vec![];
        pss.sign(msg.as_slice(), &mut sig).unwrap();

        // a different modulus of the same width
        let other = PublicKey::new_uncheck(
            reference_key().public_key().modulus() - 2u32,
            BigUint::from(0x10001u32),
        );
        let verifier = PssVerify::new(other, SHA256::new(), None).unwrap();
        assert!(!verifier.verify(msg.as_slice(), sig.as_slice()));
    }

    #[test]
    fn zero_length_salt() {
        let key = reference_key();
        let rd = StdRng::seed_from_u64(13);
        let pss = PssSign::new(key, SHA1::new(), rd, Some(0)).unwrap();

        let msg = b"deterministic with an empty salt";
        let (mut s1, mut s2) = (vec![], vec![]);
        pss.sign(msg.as_slice(), &mut s1).unwrap();
        pss.sign(msg.as_slice(), &mut s2).unwrap();
        assert_eq!(s1, s2);
        assert!(pss.verify(msg.as_slice(), s1.as_slice()));
    }

    #[test]
    fn salt_too_long_for_key() {
        let key = reference_key();
        let rd = StdRng::seed_from_u64(17);
        assert!(PssSign::new(key, SHA256::new(), rd, Some(1024)).is_err());
    }
}
