// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Random sources used to derive per-row hash coefficients.

const MULTIPLIER: u64 = 0x5DEECE66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Random number source for drawing row coefficients.
///
/// Implementors supply [`next_bits`](Self::next_bits); the 32-bit and bounded
/// draws are derived from it the way `java.util.Random` derives them.
pub trait RandomSource {
    /// Returns the next `bits` random bits (1..=32) as the low bits of an
    /// `i32`.
    fn next_bits(&mut self, bits: u32) -> i32;

    /// Returns the next uniformly distributed `i32`.
    fn next_int(&mut self) -> i32 {
        self.next_bits(32)
    }

    /// Returns the next value uniformly distributed in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive.
    fn next_int_bounded(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive. Found: {bound}");

        let mut r = self.next_bits(31);
        let m = bound - 1;
        if bound & m == 0 {
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }

        // Reject draws from the incomplete final interval so every residue
        // is equally likely.
        let mut u = r;
        loop {
            r = u % bound;
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next_bits(31);
        }
    }
}

/// Linear congruential generator producing the same sequence as
/// `java.util.Random`.
///
/// Sketches persisted by other Count-Min implementations derive their row
/// coefficients from this generator, so it is reproduced bit for bit.
///
/// # Examples
///
/// ```
/// use countmin::random::JavaRandom;
/// use countmin::random::RandomSource;
///
/// let mut rng = JavaRandom::new(42);
/// assert_eq!(rng.next_int(), -1170105035);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    /// Creates a new generator using the provided seed.
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }
}

impl RandomSource for JavaRandom {
    fn next_bits(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ADDEND)
            & MASK;
        (self.state >> (48 - bits)) as u32 as i32
    }
}
