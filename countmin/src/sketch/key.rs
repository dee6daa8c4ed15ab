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

use crate::hash::KeyHash;

/// A value that can be counted by a [`CountMinSketch`](super::CountMinSketch).
///
/// Integers are hashed with the per-row multiplicative family and text with
/// the polynomial string hash. Smaller integer types widen to `i64`, so `7_u8`
/// and `7_i64` are the same key.
pub trait CountMinKey {
    /// Returns the hash this key contributes to bucket selection.
    fn key_hash(&self) -> KeyHash;
}

macro_rules! impl_integer_key {
    ($($ty:ty),*) => {
        $(
            impl CountMinKey for $ty {
                fn key_hash(&self) -> KeyHash {
                    KeyHash::Integer(i64::from(*self))
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, u8, u16, u32);

/// `u64` keys reuse the bits of the value as an `i64`, so values above
/// `i64::MAX` share buckets with their negative two's complement twins.
impl CountMinKey for u64 {
    fn key_hash(&self) -> KeyHash {
        KeyHash::Integer(*self as i64)
    }
}

impl CountMinKey for str {
    fn key_hash(&self) -> KeyHash {
        KeyHash::text(self)
    }
}

impl CountMinKey for String {
    fn key_hash(&self) -> KeyHash {
        KeyHash::text(self)
    }
}

impl<T: CountMinKey + ?Sized> CountMinKey for &T {
    fn key_hash(&self) -> KeyHash {
        (**self).key_hash()
    }
}
