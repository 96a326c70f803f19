use crate::Digest;

const INIT: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// SHA-1, FIPS 180-4.
#[derive(Clone)]
pub struct SHA1 {
    state: [u32; 5],
    buf: [u8; 64],
    idx: usize,
    len: u64,
}

impl SHA1 {
    pub fn new() -> Self {
        Self {
            state: INIT,
            buf: [0u8; 64],
            idx: 0,
            len: 0,
        }
    }

    /// One-shot digest of `msg`.
    pub fn digest(msg: &[u8]) -> [u8; 20] {
        let mut h = Self::new();
        h.update(msg);
        let d = Digest::finish(&mut h);
        let mut out = [0u8; 20];
        out.copy_from_slice(d.as_slice());
        out
    }

    fn compress(state: &mut [u32; 5], block: &[u8]) {
        let mut w = [0u32; 80];
        for (wi, c) in w.iter_mut().zip(block.chunks_exact(4)) {
            *wi = u32::from_be_bytes([c[0], c[1], c[2], c[3]]);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let (mut a, mut b, mut c, mut d, mut e) =
            (state[0], state[1], state[2], state[3], state[4]);

        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = match i / 20 {
                0 => ((b & c) | (!b & d), 0x5A827999u32),
                1 => (b ^ c ^ d, 0x6ED9EBA1),
                2 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
                _ => (b ^ c ^ d, 0xCA62C1D6),
            };
            let t = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(wi);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = t;
        }

        state[0] = state[0].wrapping_add(a);
        state[1] = state[1].wrapping_add(b);
        state[2] = state[2].wrapping_add(c);
        state[3] = state[3].wrapping_add(d);
        state[4] = state[4].wrapping_add(e);
    }
}

impl Default for SHA1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Digest for SHA1 {
    fn block_bits(&self) -> usize {
        512
    }

    fn digest_bits(&self) -> usize {
        160
    }

    fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add((data.len() as u64) << 3);

        if self.idx > 0 {
            let n = data.len().min(64 - self.idx);
            self.buf[self.idx..self.idx + n].copy_from_slice(&data[..n]);
            self.idx += n;
            data = &data[n..];
            if self.idx < 64 {
                // data exhausted before the buffer filled
                return;
            }
            let buf = self.buf;
            Self::compress(&mut self.state, buf.as_slice());
            self.idx = 0;
        }

        let mut blocks = data.chunks_exact(64);
        for block in blocks.by_ref() {
            Self::compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.idx = rest.len();
    }

    fn finish(&mut self) -> Vec<u8> {
        let len = self.len;
        let mut pad = [0u8; 72];
        pad[0] = 0x80;
        let n = if self.idx < 56 { 56 - self.idx } else { 120 - self.idx };
        pad[n..n + 8].copy_from_slice(&len.to_be_bytes());
        self.update(&pad[..n + 8]);
        debug_assert_eq!(self.idx, 0);

        let out = self
            .state
            .iter()
            .flat_map(|s| s.to_be_bytes())
            .collect::<Vec<_>>();
        self.reset();
        out
    }

    fn reset(&mut self) {
        self.state = INIT;
        self.buf = [0u8; 64];
        self.idx = 0;
        self.len = 0;
    }
}

#[cfg(feature = "sec-zeroize")]
impl zeroize::Zeroize for SHA1 {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.buf.zeroize();
        self.idx = 0;
        self.len = 0;
    }
}
