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

//! A Count-Min sketch for estimating how often items occur in a stream.
//!
//! The sketch keeps a fixed `depth x width` table of counters instead of the
//! items themselves. Estimates never undercount, and overcount by at most
//! `epsilon * total_count` (`epsilon = 2 / width`) with probability
//! `1 - 2^(-depth)`.
//!
//! Integer and text keys are supported through [`CountMinKey`]. Sketches
//! serialize to a flat big-endian dump whose hashing and seed derivation are
//! compatible with existing JVM-built Count-Min sketches.
//!
//! ```rust
//! use countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(10, 10, 30);
//! sketch.add(10_i64, 1).unwrap();
//! sketch.add(10_i64, 1).unwrap();
//! sketch.add(20_i64, 1).unwrap();
//!
//! assert!(sketch.estimate_count(10_i64) >= 2);
//! assert!(sketch.estimate_count(20_i64) >= 1);
//! ```

pub mod error;
pub mod hash;
pub mod random;

mod codec;
mod sketch;

pub use self::sketch::CountMinKey;
pub use self::sketch::CountMinSketch;
