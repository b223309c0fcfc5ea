/*
 * Running Adler-32 state (RFC 1950 §8.2): two sums updated per byte as
 * s1 += byte; s2 += s1, reduced modulo 65521.
 *
 * Reduction is deferred: with both sums fully reduced, up to NMAX bytes can
 * be accumulated before either sum can overflow 32 bits, so the state
 * self-reduces on that cadence and the decoder additionally reduces at the
 * top of each decode cycle.
 */

const ADLER32_MODULUS: u32 = 65521;

/* Largest n such that 255*n*(n+1)/2 + (n+1)*(ADLER32_MODULUS-1) < 2^32. */
const ADLER32_NMAX: u32 = 5552;

pub(crate) struct Adler32 {
    s1: u32,
    s2: u32,
    unreduced: u32,
}

impl Adler32 {
    pub(crate) fn new() -> Self {
        Self {
            s1: 1,
            s2: 0,
            unreduced: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn update(&mut self, byte: u8) {
        self.s1 += u32::from(byte);
        self.s2 += self.s1;
        self.unreduced += 1;
        if self.unreduced >= ADLER32_NMAX {
            self.reduce();
        }
    }

    #[inline(always)]
    pub(crate) fn reduce(&mut self) {
        self.s1 %= ADLER32_MODULUS;
        self.s2 %= ADLER32_MODULUS;
        self.unreduced = 0;
    }

    pub(crate) fn checksum(&self) -> u32 {
        ((self.s2 % ADLER32_MODULUS) << 16) | (self.s1 % ADLER32_MODULUS)
    }
}

#[cfg(test)]
mod tests {
    use super::Adler32;
    use rand::rngs::SmallRng;
    use rand::{RngCore, SeedableRng};

    fn adler_of(data: &[u8]) -> u32 {
        let mut adler = Adler32::new();
        for &byte in data {
            adler.update(byte);
        }
        adler.checksum()
    }

    #[test]
    fn empty_input_is_one() {
        assert_eq!(adler_of(b""), 1);
    }

    #[test]
    fn known_value() {
        assert_eq!(adler_of(b"Wikipedia"), 0x11E60398);
    }

    #[test]
    fn matches_reference_across_reduction_boundary() {
        /* 100_000 bytes crosses the NMAX self-reduction cadence many times. */
        let mut rng = SmallRng::seed_from_u64(0x41444C);
        let mut data = vec![0u8; 100_000];
        rng.fill_bytes(&mut data);

        assert_eq!(adler_of(&data), simd_adler32::adler32(&&data[..]));

        let runs = [0xFFu8; 40_000];
        assert_eq!(adler_of(&runs), simd_adler32::adler32(&&runs[..]));
    }
}
