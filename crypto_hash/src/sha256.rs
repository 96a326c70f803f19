use crate::Digest;

const INIT: [u32; 8] = [
    0x6A09E667, 0xBB67AE85, 0x3C6EF372, 0xA54FF53A, 0x510E527F, 0x9B05688C, 0x1F83D9AB,
    0x5BE0CD19,
];

const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4,
    0xab1c5ed5, 0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe,
    0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f,
    0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7,
    0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc,
    0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b,
    0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116,
    0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
    0xc67178f2,
];

/// SHA-256, FIPS 180-4.
#[derive(Clone)]
pub struct SHA256 {
    state: [u32; 8],
    buf: [u8; 64],
    idx: usize,
    len: u64,
}

impl SHA256 {
    pub fn new() -> Self {
        Self {
            state: INIT,
            buf: [0u8; 64],
            idx: 0,
            len: 0,
        }
    }

    /// One-shot digest of `msg`.
    pub fn digest(msg: &[u8]) -> [u8; 32] {
        let mut h = Self::new();
        h.update(msg);
        let d = Digest::finish(&mut h);
        let mut out = [0u8; 32];
        out.copy_from_slice(d.as_slice());
        out
    }

    fn compress(state: &mut [u32; 8], block: &[u8]) {
        let mut w = [0u32; 64];
        for (wi, c) in w.iter_mut().zip(block.chunks_exact(4)) {
            *wi = u32::from_be_bytes([c[0], c[1], c[2], c[3]]);
        }
        for i in 16..64 {
            let s0 = w[i - 15].rotate_right(7) ^ w[i - 15].rotate_right(18) ^ (w[i - 15] >> 3);
            let s1 = w[i - 2].rotate_right(17) ^ w[i - 2].rotate_right(19) ^ (w[i - 2] >> 10);
            w[i] = w[i - 16]
                .wrapping_add(s0)
                .wrapping_add(w[i - 7])
                .wrapping_add(s1);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        for i in 0..64 {
            let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ (!e & g);
            let t1 = h
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(K[i])
                .wrapping_add(w[i]);
            let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let t2 = s0.wrapping_add(maj);

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *s = s.wrapping_add(v);
        }
    }
}

impl Default for SHA256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Digest for SHA256 {
    fn block_bits(&self) -> usize {
        512
    }

    fn digest_bits(&self) -> usize {
        256
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
impl zeroize::Zeroize for SHA256 {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.buf.zeroize();
        self.idx = 0;
        self.len = 0;
    }
}
