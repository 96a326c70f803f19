//! The eight Serpent S-boxes and their inverses, in the bitsliced form
//! developed by Dag Arne Osvik ("Speeding up Serpent").
//!
//! Each function maps four 32-bit words to four words; `SBOX[i]` and
//! `ISBOX[i]` are mutual inverses.

pub(super) type SboxFn = fn(u32, u32, u32, u32) -> [u32; 4];

pub(super) const SBOX: [SboxFn; 8] = [sb0, sb1, sb2, sb3, sb4, sb5, sb6, sb7];
pub(super) const ISBOX: [SboxFn; 8] = [ib0, ib1, ib2, ib3, ib4, ib5, ib6, ib7];

fn sb0(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r1 ^ r2;
    r3 ^= r0;
    r1 = (r1 & r3) ^ r0;
    r0 = (r0 | r3) ^ r4;
    r4 ^= r3;
    r3 ^= r2;
    r2 = (r2 | r1) ^ r4;
    r4 = !r4 | r1;
    r1 ^= r3 ^ r4;
    r3 |= r0;
    [r1 ^ r3, r4 ^ r3, r2, r0]
}

fn ib0(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r1;
    r2 = !r2;
    r1 = (r1 | r0) ^ r2;
    r4 = !r4;
    r2 |= r4;
    r1 ^= r3;
    r0 ^= r4;
    r2 ^= r0;
    r0 &= r3;
    r4 ^= r0;
    r0 = (r0 | r1) ^ r2;
    r3 = r3 ^ r4 ^ r0 ^ r1;
    r2 = (r2 ^ r1) & r3;
    [r0, r4 ^ r2, r1, r3]
}

fn sb1(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    r0 = !r0;
    let mut r4 = r0;
    r2 = !r2;
    r0 &= r1;
    r2 ^= r0;
    r0 |= r3;
    r3 ^= r2;
    r1 ^= r0;
    r0 ^= r4;
    r4 |= r1;
    r1 ^= r3;
    r2 = (r2 | r0) & r4;
    r0 ^= r1;
    [r2, (r0 & r2) ^ r4, r3, (r1 & r2) ^ r0]
}

fn ib1(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r1;
    r1 ^= r3;
    r3 = (r3 & r1) ^ r0;
    r4 ^= r2;
    r2 ^= r3;
    r0 = ((r0 | r1) ^ r4) | r2;
    r1 ^= r3;
    r0 ^= r1;
    r1 = (r1 | r3) ^ r0;
    r4 = !r4 ^ r1;
    [r4, r0, r3 ^ (((r1 | r0) ^ r0) | r4), r2]
}

fn sb2(mut r0: u32, r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r0;
    r0 = (r0 & r2) ^ r3;
    r2 = r2 ^ r1 ^ r0;
    r3 = (r3 | r4) ^ r1;
    r4 ^= r2;
    let r1 = r3;
    r3 = (r3 | r4) ^ r0;
    r0 &= r1;
    r4 ^= r0;
    [r2, r3, r1 ^ r3 ^ r4, !r4]
}

fn ib2(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    r2 ^= r3;
    r3 ^= r0;
    let mut r4 = r3;
    r3 = (r3 & r2) ^ r1;
    r1 = (r1 | r2) ^ r4;
    r4 &= r3;
    r2 ^= r3;
    r4 = (r4 & r0) ^ r2;
    r3 = !r3;
    r2 = ((r2 & r1) | r0) ^ r3;
    r0 = (r0 ^ r3) & r1;
    [r1, r4, r2, r3 ^ r4 ^ r0]
}

fn sb3(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r0;
    r0 |= r3;
    r3 ^= r1;
    r1 &= r4;
    r4 = (r4 ^ r2) | r1;
    r2 ^= r3;
    r3 = (r3 & r0) ^ r4;
    r0 ^= r1;
    r4 = (r4 & r0) ^ r2;
    r1 = ((r1 ^ r3) | r0) ^ r2;
    r0 ^= r3;
    [(r1 | r3) ^ r0, r1, r3, r4]
}

fn ib3(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r2;
    r2 ^= r1;
    r0 ^= r2;
    r4 = (r4 & r2) ^ r0;
    r0 &= r1;
    r1 ^= r3;
    r3 |= r4;
    r2 ^= r3;
    r0 ^= r3;
    r1 ^= r4;
    r3 = (r3 & r2) ^ r1;
    r1 = ((r1 ^ r0) | r2) ^ r4;
    [r2, r1, r3, r0 ^ r3 ^ r1]
}

fn sb4(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    r1 ^= r3;
    let mut r4 = r1;
    r3 = !r3;
    r2 ^= r3;
    r3 ^= r0;
    r1 = (r1 & r3) ^ r2;
    r4 ^= r3;
    r0 ^= r4;
    r2 = (r2 & r4) ^ r0;
    r0 &= r1;
    r3 ^= r0;
    r4 = (r4 | r1) ^ r0;
    [r1, r4 ^ (r2 & r3), !((r0 | r3) ^ r2), r3]
}

fn ib4(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r2;
    r2 = (r2 & r3) ^ r1;
    r1 = (r1 | r3) & r0;
    r4 = r4 ^ r2 ^ r1;
    r1 &= r2;
    r0 = !r0;
    r3 ^= r4;
    r1 ^= r3;
    r3 = (r3 & r0) ^ r2;
    r0 ^= r1;
    r3 ^= r0;
    [r0, r3 ^ r0, (((r2 & r0) ^ r4) | r3) ^ r1, r4]
}

fn sb5(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    r0 ^= r1;
    r1 ^= r3;
    let mut r4 = r1;
    r3 = !r3;
    r1 &= r0;
    r2 ^= r3;
    r1 ^= r2;
    r2 |= r4;
    r4 ^= r3;
    r3 = (r3 & r1) ^ r0;
    r4 = r4 ^ r1 ^ r2;
    [r1, r3, (r0 & r3) ^ r4, !(r2 ^ r0) ^ (r4 | r3)]
}

fn ib5(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r3;
    r1 = !r1;
    r2 ^= r1;
    r3 = (r3 | r0) ^ r2;
    r4 ^= r3;
    r2 = ((r2 | r1) & r0) ^ r4;
    r4 = ((r4 | r0) ^ r1) ^ r2;
    r1 = (r1 & r2) ^ r3;
    r3 &= r4;
    r4 ^= r1;
    [r1, !r4, r3 ^ r4 ^ r0, r2]
}

fn sb6(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r3;
    r2 = !r2;
    r3 = (r3 & r0) ^ r2;
    r0 ^= r4;
    r2 = (r2 | r4) ^ r0;
    r1 ^= r3;
    r0 |= r1;
    r2 ^= r1;
    r4 ^= r0;
    r0 = (r0 | r3) ^ r2;
    r4 = r4 ^ r3 ^ r0;
    [r0, r1, r4, (r2 & r4) ^ !r3]
}

fn ib6(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r2;
    r0 ^= r2;
    r2 &= r0;
    r4 ^= r3;
    r3 ^= r1;
    r2 = !r2 ^ r3;
    r4 |= r0;
    r0 ^= r2;
    r3 ^= r4;
    r4 ^= r1;
    r1 = (r1 & r3) ^ r0;
    r0 = (r0 ^ r3) | r2;
    [r1, r2, r4 ^ r0, r3 ^ r1]
}

fn sb7(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r1;
    r1 = (r1 | r2) ^ r3;
    r4 ^= r2;
    r2 ^= r1;
    r3 = (r3 | r4) & r0;
    r4 ^= r2;
    r3 ^= r1;
    r1 = (r1 | r4) ^ r0;
    r0 = (r0 | r4) ^ r2;
    r1 ^= r4;
    r2 ^= r1;
    [r4 ^ (!r2 | r0), r3, (r1 & r0) ^ r4, r0]
}

fn ib7(mut r0: u32, mut r1: u32, mut r2: u32, mut r3: u32) -> [u32; 4] {
    let mut r4 = r2;
    r2 = !(r2 ^ r0);
    r0 &= r3;
    r4 |= r3;
    r3 ^= r1;
    r1 |= r0;
    r0 ^= r2;
    r2 &= r4;
    r3 &= r4;
    r1 ^= r2;
    r2 ^= r0;
    r0 = (r0 | r2) ^ r3;
    r4 ^= r1;
    [r3 ^ r4 ^ r2, r0, r1, (r4 | r0) ^ r2]
}

#[cfg(test)]
mod tests {
    use super::{ISBOX, SBOX};

    #[test]
    fn sbox_inverse_property() {
        // walk a spread of input words through every box and back
        let words = [
            0u32,
            1,
            0xffff_ffff,
            0x0123_4567,
            0x89ab_cdef,
            0xdead_beef,
            0x5555_aaaa,
            0x8000_0001,
        ];

        for i in 0..8 {
            for chunk in words.windows(4) {
                let x = SBOX[i](chunk[0], chunk[1], chunk[2], chunk[3]);
                let y = ISBOX[i](x[0], x[1], x[2], x[3]);
                assert_eq!(
                    y,
                    [chunk[0], chunk[1], chunk[2], chunk[3]],
                    "box => {i}"
                );
            }
        }
    }
}
