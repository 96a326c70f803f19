use crate::Rand;
use xrand::rngs::OsRng;
use xrand::RngCore;

/// Random bytes sourced from the operating system CSPRNG.
#[derive(Copy, Clone, Default)]
pub struct DefaultRand(OsRng);

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.0.fill_bytes(random);
    }
}

#[cfg(test)]
mod tests {
    use crate::{DefaultRand, Rand};

    #[test]
    fn default_rand() {
        let mut rd = DefaultRand::default();
        let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
        rd.rand(&mut a);
        rd.rand(&mut b);
        assert_ne!(a, b);
    }
}
