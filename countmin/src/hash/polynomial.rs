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

/// Computes the 32-bit polynomial hash `s[0]*31^(n-1) + ... + s[n-1]` over
/// the UTF-16 code units of `item`, with wrapping arithmetic.
///
/// This is the string hash of the JVM (`String::hashCode`), so characters
/// outside the Basic Multilingual Plane contribute both surrogates.
///
/// # Examples
///
/// ```
/// use countmin::hash::polynomial_hash;
///
/// assert_eq!(polynomial_hash("hello"), 99162322);
/// assert_eq!(polynomial_hash(""), 0);
/// ```
pub fn polynomial_hash(item: &str) -> i32 {
    item.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

/// Returns the bucket of `row` for the double hash `hash1 + row * hash2`,
/// reduced into `[0, width)`.
///
/// The combination is 32-bit and wrapping. The remainder takes the sign of
/// the dividend before its absolute value is taken, and is computed in 64
/// bits so any `u32` width is accepted.
///
/// # Panics
///
/// Panics if `width` is zero.
pub fn text_bucket(hash1: i32, hash2: i32, row: usize, width: u32) -> usize {
    assert!(width > 0, "width must be positive");
    let combined = hash1.wrapping_add((row as i32).wrapping_mul(hash2));
    (i64::from(combined) % i64::from(width)).unsigned_abs() as usize
}

/// Returns the buckets of `item` for rows `0..row_count`.
///
/// # Panics
///
/// Panics if `width` is zero.
///
/// # Examples
///
/// ```
/// use countmin::hash::text_buckets;
///
/// assert_eq!(text_buckets("apple", 5, 1000), vec![210, 420, 630, 840, 50]);
/// ```
pub fn text_buckets(item: &str, row_count: usize, width: u32) -> Vec<usize> {
    let hash1 = polynomial_hash(item);
    // The second hash equals the first; see `KeyHash::text`.
    let hash2 = hash1;
    (0..row_count)
        .map(|row| text_bucket(hash1, hash2, row, width))
        .collect()
}
