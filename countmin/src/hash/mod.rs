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

//! Bucket selection for the two key domains a sketch accepts.
//!
//! Integer keys go through a multiplicative hash over the Mersenne prime
//! field `2^31 - 1`, parameterized per row by the sketch's seeds. Text keys
//! go through a 32-bit polynomial string hash, and per-row buckets are derived
//! from it by double hashing.

mod mersenne;
mod polynomial;

pub use self::mersenne::PRIME_MODULUS;
pub use self::mersenne::row_hash;
pub use self::polynomial::polynomial_hash;
pub use self::polynomial::text_bucket;
pub use self::polynomial::text_buckets;

/// The hash a key contributes, from which every row bucket is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHash {
    /// An integer key, hashed per row with [`row_hash`].
    Integer(i64),
    /// A text key's two base hashes, combined per row with [`text_bucket`].
    Text { hash1: i32, hash2: i32 },
}

impl KeyHash {
    /// Computes the text hashes of `item`.
    ///
    /// The second hash is deliberately identical to the first. Sketches built
    /// so far depend on this degenerate double hash, and deriving a distinct
    /// `hash2` would move every text key to different buckets.
    pub fn text(item: &str) -> Self {
        let hash1 = polynomial_hash(item);
        KeyHash::Text {
            hash1,
            hash2: hash1,
        }
    }

    /// Returns the bucket in `[0, width)` this key maps to in `row`.
    ///
    /// `row_seed` is only consulted for integer keys.
    pub fn bucket(&self, row: usize, row_seed: i64, width: u32) -> usize {
        match *self {
            KeyHash::Integer(item) => row_hash(row_seed, item, width),
            KeyHash::Text { hash1, hash2 } => text_bucket(hash1, hash2, row, width),
        }
    }
}
