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

use std::fmt;

use super::key::CountMinKey;
use super::serialization;
use crate::error::Error;
use crate::hash::KeyHash;
use crate::random::JavaRandom;
use crate::random::RandomSource;

/// Largest depth or width a sketch accepts; both are stored as signed 32-bit
/// integers in the serialized form.
const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Count-Min sketch for estimating item frequencies.
///
/// Counters are signed 64-bit values laid out row by row in one contiguous
/// buffer. Only [`add`](Self::add) mutates them, and it rejects negative
/// counts, so every counter is non-decreasing until the running total
/// overflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMinSketch {
    depth: u32,
    width: u32,
    seeds: Vec<i64>,
    table: Vec<i64>,
    total_count: i64,
    overflowed: bool,
}

impl CountMinSketch {
    /// Creates a sketch with `depth` rows of `width` counters.
    ///
    /// The per-row hash coefficients are drawn from a generator seeded with
    /// `seed`, so two sketches built from the same arguments hash every key to
    /// the same buckets.
    ///
    /// # Panics
    ///
    /// Panics if `depth` or `width` is zero or exceeds `i32::MAX`. Use
    /// [`try_new`](Self::try_new) to handle invalid dimensions as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use countmin::CountMinSketch;
    /// let sketch = CountMinSketch::new(10, 10, 30);
    /// assert_eq!(sketch.depth(), 10);
    /// assert_eq!(sketch.width(), 10);
    /// assert!(sketch.is_empty());
    /// ```
    pub fn new(depth: u32, width: u32, seed: i64) -> Self {
        match Self::try_new(depth, width, seed) {
            Ok(sketch) => sketch,
            Err(err) => panic!("{}", err.message()),
        }
    }

    /// Creates a sketch, returning [`ErrorKind::ConfigInvalid`] if `depth` or
    /// `width` is zero or exceeds `i32::MAX`.
    ///
    /// [`ErrorKind::ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    pub fn try_new(depth: u32, width: u32, seed: i64) -> Result<Self, Error> {
        let sketch = Self::try_with_random_source(depth, width, &mut JavaRandom::new(seed))?;
        tracing::debug!(depth, width, seed, "created count-min sketch");
        Ok(sketch)
    }

    /// Creates a sketch whose row coefficients are drawn from `rng`.
    ///
    /// Each coefficient is `rng.next_int_bounded(i32::MAX)`, one per row.
    /// [`try_new`](Self::try_new) uses a [`JavaRandom`] seeded with its
    /// `seed` argument.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `depth` or `width` is zero or
    /// exceeds `i32::MAX`.
    ///
    /// [`ErrorKind::ConfigInvalid`]: crate::error::ErrorKind::ConfigInvalid
    pub fn try_with_random_source<R: RandomSource>(
        depth: u32,
        width: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        check_dimension("depth", depth).map_err(Error::config_invalid)?;
        check_dimension("width", width).map_err(Error::config_invalid)?;

        let seeds = (0..depth)
            .map(|_| i64::from(rng.next_int_bounded(i32::MAX)))
            .collect();
        let table = vec![0; depth as usize * width as usize];
        Ok(Self::from_parts(depth, width, seeds, table, 0))
    }

    /// Creates a sketch sized for a relative error `epsilon` that holds with
    /// probability `confidence`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`suggest_width`](Self::suggest_width)
    /// and [`suggest_depth`](Self::suggest_depth).
    pub fn with_accuracy(epsilon: f64, confidence: f64, seed: i64) -> Self {
        let width = Self::suggest_width(epsilon);
        let depth = Self::suggest_depth(confidence);
        Self::new(depth, width, seed)
    }

    /// Suggests the number of counters per row for a relative error `epsilon`.
    ///
    /// Returns the smallest width for which `2 / width <= epsilon`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is not in `(0, 2]` or the width would exceed
    /// `i32::MAX`.
    pub fn suggest_width(epsilon: f64) -> u32 {
        assert!(
            epsilon > 0.0 && epsilon <= 2.0,
            "epsilon must be in (0, 2]. Found: {epsilon}"
        );
        let width = (2.0 / epsilon).ceil();
        assert!(
            width <= f64::from(MAX_DIMENSION),
            "epsilon {epsilon} needs more than {MAX_DIMENSION} counters per row"
        );
        width as u32
    }

    /// Suggests the number of rows for which the error bound holds with the
    /// given `confidence`.
    ///
    /// Returns the smallest depth for which `1 - 2^(-depth) >= confidence`,
    /// and at least 1.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in `[0, 1)`.
    pub fn suggest_depth(confidence: f64) -> u32 {
        assert!(
            (0.0..1.0).contains(&confidence),
            "confidence must be in [0, 1). Found: {confidence}"
        );
        let depth = (1.0 / (1.0 - confidence)).log2().ceil();
        (depth as u32).max(1)
    }

    fn from_parts(
        depth: u32,
        width: u32,
        seeds: Vec<i64>,
        table: Vec<i64>,
        total_count: i64,
    ) -> Self {
        debug_assert_eq!(seeds.len(), depth as usize);
        debug_assert_eq!(table.len(), depth as usize * width as usize);
        CountMinSketch {
            depth,
            width,
            seeds,
            table,
            total_count,
            overflowed: false,
        }
    }

    /// Adds `count` occurrences of `item`.
    ///
    /// Increments one counter in every row. If the running total wraps past
    /// `i64::MAX` the increments are kept, a warning is logged, and
    /// [`has_overflowed`](Self::has_overflowed) starts returning `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] and leaves the sketch untouched
    /// if `count` is negative.
    ///
    /// [`ErrorKind::InvalidArgument`]: crate::error::ErrorKind::InvalidArgument
    ///
    /// # Examples
    ///
    /// ```
    /// # use countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(4, 64, 1);
    /// sketch.add("apple", 3).unwrap();
    /// sketch.add(42_i64, 1).unwrap();
    /// assert!(sketch.add("apple", -1).is_err());
    /// assert_eq!(sketch.total_count(), 4);
    /// ```
    pub fn add<K: CountMinKey>(&mut self, item: K, count: i64) -> Result<(), Error> {
        if count < 0 {
            return Err(Error::invalid_argument("count may not be negative")
                .with_context("count", count));
        }

        let key = item.key_hash();
        let width = self.width as usize;
        for (row, &seed) in self.seeds.iter().enumerate() {
            let bucket = key.bucket(row, seed, self.width);
            let counter = &mut self.table[row * width + bucket];
            *counter = counter.wrapping_add(count);
        }

        self.record_total(count);
        Ok(())
    }

    /// Adds a single occurrence of `item`.
    pub fn update<K: CountMinKey>(&mut self, item: K) -> Result<(), Error> {
        self.add(item, 1)
    }

    /// Returns the estimated count of `item`.
    ///
    /// The estimate is never below the number of times `item` was added, and
    /// exceeds it only through hash collisions.
    pub fn estimate_count<K: CountMinKey>(&self, item: K) -> i64 {
        let key = item.key_hash();
        self.counters_for(key).fold(i64::MAX, i64::min)
    }

    /// Returns a lower bound of the count of `item`, equal to the estimate.
    pub fn lower_bound<K: CountMinKey>(&self, item: K) -> i64 {
        self.estimate_count(item)
    }

    /// Returns an upper bound of the count of `item` that holds with
    /// probability [`confidence`](Self::confidence).
    pub fn upper_bound<K: CountMinKey>(&self, item: K) -> i64 {
        let error = (self.epsilon() * self.total_count as f64).ceil() as i64;
        self.estimate_count(item).saturating_add(error)
    }

    /// Returns the bucket `item` maps to in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= depth`.
    pub fn bucket<K: CountMinKey>(&self, item: K, row: usize) -> usize {
        item.key_hash().bucket(row, self.seeds[row], self.width)
    }

    /// Returns the number of rows.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the number of counters per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the hash coefficient of each row.
    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    /// Returns the sum of all counts added.
    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    /// Returns the relative error bound, `2 / width`.
    pub fn epsilon(&self) -> f64 {
        2.0 / self.width as f64
    }

    /// Returns the probability that an estimate stays within
    /// `epsilon * total_count` of the true count, `1 - 2^(-depth)`.
    pub fn confidence(&self) -> f64 {
        1.0 - 1.0 / 2f64.powf(self.depth as f64)
    }

    /// Returns true if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Returns true once the running total has wrapped past `i64::MAX`.
    ///
    /// A deserialized sketch reports an overflow when its stored total is
    /// negative.
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Returns the counters of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= depth`.
    pub fn row(&self, row: usize) -> &[i64] {
        let width = self.width as usize;
        &self.table[row * width..(row + 1) * width]
    }

    /// Returns an iterator over the counter rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i64]> {
        self.table.chunks_exact(self.width as usize)
    }

    /// Returns the exact number of bytes [`serialize`](Self::serialize)
    /// produces.
    pub fn serialized_size(&self) -> usize {
        serialization::serialized_size(self.depth, self.width)
    }

    /// Serializes the sketch into its big-endian binary form.
    ///
    /// # Examples
    ///
    /// ```
    /// # use countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(2, 3, 30);
    /// sketch.add(10_i64, 1).unwrap();
    ///
    /// let bytes = sketch.serialize();
    /// assert_eq!(bytes.len(), sketch.serialized_size());
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        serialization::serialize(self)
    }

    /// Deserializes a sketch written by [`serialize`](Self::serialize).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDeserializeData`] if the input is
    /// truncated, declares a non-positive depth or width, or has bytes left
    /// over after the table.
    ///
    /// [`ErrorKind::MalformedDeserializeData`]: crate::error::ErrorKind::MalformedDeserializeData
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let decoded = serialization::deserialize(bytes)?;
        let mut sketch = Self::from_parts(
            decoded.depth,
            decoded.width,
            decoded.seeds,
            decoded.table,
            decoded.total_count,
        );
        sketch.overflowed = decoded.total_count < 0;
        tracing::debug!(
            depth = sketch.depth,
            width = sketch.width,
            total_count = sketch.total_count,
            "deserialized count-min sketch"
        );
        Ok(sketch)
    }

    fn counters_for(&self, key: KeyHash) -> impl Iterator<Item = i64> + '_ {
        let width = self.width as usize;
        self.seeds.iter().enumerate().map(move |(row, &seed)| {
            let bucket = key.bucket(row, seed, self.width);
            self.table[row * width + bucket]
        })
    }

    fn record_total(&mut self, count: i64) {
        let previous = self.total_count;
        self.total_count = previous.wrapping_add(count);
        if self.total_count < previous {
            self.overflowed = true;
            tracing::warn!(
                previous,
                total_count = self.total_count,
                count,
                "count-min total count overflowed"
            );
        }
    }
}

impl fmt::Display for CountMinSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            write!(f, "Row {i}:")?;
            for counter in row {
                write!(f, " {counter}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_dimension(name: &str, value: u32) -> Result<(), String> {
    if value == 0 || value > MAX_DIMENSION {
        Err(format!(
            "{name} must be in [1, {MAX_DIMENSION}]. Found: {value}"
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_follow_generator() {
        let sketch = CountMinSketch::new(3, 10, 30);
        assert_eq!(sketch.seeds(), &[1570895606, 466535868, 479468765]);
    }

    #[test]
    fn test_custom_random_source_supplies_coefficients() {
        struct Fixed;

        impl RandomSource for Fixed {
            fn next_bits(&mut self, bits: u32) -> i32 {
                if bits == 31 { 12345 } else { -1 }
            }
        }

        let sketch = CountMinSketch::try_with_random_source(3, 16, &mut Fixed).unwrap();
        assert_eq!(sketch.seeds(), &[12345, 12345, 12345]);

        let mut rng = JavaRandom::new(30);
        let drawn = CountMinSketch::try_with_random_source(3, 10, &mut rng).unwrap();
        assert_eq!(drawn, CountMinSketch::new(3, 10, 30));
    }

    #[test]
    fn test_overflow_keeps_increments() {
        let mut sketch = CountMinSketch::new(2, 4, 5);
        sketch.add(1_i64, i64::MAX).unwrap();
        assert!(!sketch.has_overflowed());

        sketch.add(2_i64, 1).unwrap();
        assert!(sketch.has_overflowed());
        assert_eq!(sketch.total_count(), i64::MIN);
        for row in sketch.rows() {
            let sum = row.iter().fold(0i64, |acc, &c| acc.wrapping_add(c));
            assert_eq!(sum, i64::MIN);
        }
    }

    #[test]
    fn test_display_lists_rows() {
        let mut sketch = CountMinSketch::new(2, 3, 30);
        sketch.add(10_i64, 1).unwrap();
        let rendered = sketch.to_string();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with("Row 0:"));
    }
}
