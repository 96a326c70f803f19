mod default_rand;

pub use default_rand::DefaultRand;

/// Fill `random` with random bytes.
pub trait Rand {
    fn rand(&mut self, random: &mut [u8]);
}

impl<T: xrand::RngCore> Rand for T {
    fn rand(&mut self, random: &mut [u8]) {
        self.fill_bytes(random);
    }
}
