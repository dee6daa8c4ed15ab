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

/// The Mersenne prime `2^31 - 1`.
pub const PRIME_MODULUS: i64 = (1 << 31) - 1;

/// Maps an integer key to a bucket in `[0, width)` using the row coefficient
/// `seed`.
///
/// Computes `seed * item` modulo `2^31 - 1` with the shift-and-add reduction
/// (the additive term of the `a*x + b` family is fixed at zero), then reduces
/// the result modulo `width`. Products wrap on overflow.
///
/// # Panics
///
/// Panics if `width` is zero.
///
/// # Examples
///
/// ```
/// use countmin::hash::row_hash;
///
/// let bucket = row_hash(1570895606, 10, 10);
/// assert_eq!(bucket, 7);
/// ```
pub fn row_hash(seed: i64, item: i64, width: u32) -> usize {
    assert!(width > 0, "width must be positive");
    let mut hash = seed.wrapping_mul(item);
    hash = hash.wrapping_add(hash >> 32);
    hash &= PRIME_MODULUS;
    // The mask leaves a non-negative 31-bit value, so the remainder is the
    // same whether taken in 32 or 64 bits.
    (hash % i64::from(width)) as usize
}
