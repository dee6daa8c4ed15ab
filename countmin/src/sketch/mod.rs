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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The sketch is a `depth x width` table of counters. Every update increments
//! one counter per row and a query returns the smallest counter the item maps
//! to, so estimates never fall below the true count and overshoot by at most
//! `epsilon * total_count` with probability `confidence`.
//!
//! # Usage
//!
//! ```rust
//! use countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(5, 256, 42);
//!
//! sketch.add("apple", 1).unwrap();
//! sketch.add("banana", 3).unwrap();
//! sketch.add(1234_i64, 2).unwrap();
//!
//! assert!(sketch.estimate_count("banana") >= 3);
//! assert!(sketch.estimate_count(1234_i64) >= 2);
//!
//! let bytes = sketch.serialize();
//! let restored = CountMinSketch::deserialize(&bytes).unwrap();
//! assert_eq!(restored, sketch);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! use countmin::CountMinSketch;
//!
//! let width = CountMinSketch::suggest_width(0.01);
//! let depth = CountMinSketch::suggest_depth(0.99);
//!
//! let _sketch = CountMinSketch::new(depth, width, 7);
//! ```

mod key;
mod serialization;
mod sketch;

pub use self::key::CountMinKey;
pub use self::sketch::CountMinSketch;
