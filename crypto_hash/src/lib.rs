//! Message digest algorithms.
//!
//! `Digest` is object safe so callers that pick a hash at runtime can work
//! with `Box<dyn Digest>` obtained from [`by_name`].

mod sha1;
mod sha256;

pub use sha1::SHA1;
pub use sha256::SHA256;

/// An incremental message digest.
pub trait Digest {
    /// Size in bits of the internal block.
    fn block_bits(&self) -> usize;

    /// Size in bits of the digest.
    fn digest_bits(&self) -> usize;

    fn update(&mut self, data: &[u8]);

    /// Consume the buffered message, returning the digest. The state is
    /// reset afterwards so the instance can be reused.
    fn finish(&mut self) -> Vec<u8>;

    fn reset(&mut self);

    fn digest_len(&self) -> usize {
        (self.digest_bits() + 7) >> 3
    }
}

impl<D: Digest + ?Sized> Digest for Box<D> {
    fn block_bits(&self) -> usize {
        self.as_ref().block_bits()
    }

    fn digest_bits(&self) -> usize {
        self.as_ref().digest_bits()
    }

    fn update(&mut self, data: &[u8]) {
        self.as_mut().update(data)
    }

    fn finish(&mut self) -> Vec<u8> {
        self.as_mut().finish()
    }

    fn reset(&mut self) {
        self.as_mut().reset()
    }
}

/// Case-insensitive lookup of a digest by canonical name. Unknown names
/// yield `None`.
pub fn by_name(name: &str) -> Option<Box<dyn Digest>> {
    match name.trim().to_lowercase().as_str() {
        "sha1" | "sha-1" | "sha160" => Some(Box::new(SHA1::new())),
        "sha256" | "sha-256" => Some(Box::new(SHA256::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::by_name;

    #[test]
    fn factory() {
        for name in ["sha1", "SHA-1", "sha160", "sha256", "Sha-256", " sha256 "] {
            assert!(by_name(name).is_some(), "case => {name}");
        }
        assert!(by_name("md5").is_none());
        assert!(by_name("").is_none());
    }

    #[test]
    fn factory_digest_len() {
        let h = by_name("sha1").unwrap();
        assert_eq!(h.digest_len(), 20);
        let h = by_name("sha256").unwrap();
        assert_eq!(h.digest_len(), 32);
    }
}
