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

mod common;

use std::fs;

use common::serialization_test_data;
use countmin::CountMinSketch;
use countmin::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;

fn assert_golden_snapshot(
    filename: &str,
    expected_depth: u32,
    expected_width: u32,
    expected_seeds: &[i64],
    expected_total_count: i64,
) -> CountMinSketch {
    let path = serialization_test_data("golden_files", filename);
    let bytes = fs::read(&path).unwrap();

    let sketch = CountMinSketch::deserialize(&bytes).unwrap();

    assert_eq!(sketch.depth(), expected_depth);
    assert_eq!(sketch.width(), expected_width);
    assert_eq!(sketch.seeds(), expected_seeds);
    assert_eq!(sketch.total_count(), expected_total_count);
    assert_eq!(sketch.is_empty(), expected_total_count == 0);

    let roundtrip = sketch.serialize();
    assert_eq!(roundtrip, bytes, "round-trip bytes differ for {filename}");
    sketch
}

#[test]
fn test_deserialize_empty_snapshot() {
    let sketch = assert_golden_snapshot("countmin_empty.bin", 2, 4, &[1569164236, 1371249164], 0);
    assert!(sketch.rows().flatten().all(|&c| c == 0));
}

#[test]
fn test_deserialize_non_empty_snapshot() {
    let sketch = assert_golden_snapshot(
        "countmin_non_empty.bin",
        3,
        8,
        &[1570895606, 466535868, 479468765],
        8,
    );

    assert_eq!(sketch.row(0), &[0, 0, 3, 1, 0, 0, 1, 3]);
    assert_eq!(sketch.row(1), &[0, 2, 2, 1, 3, 0, 0, 0]);
    assert_eq!(sketch.row(2), &[0, 1, 0, 2, 0, 0, 4, 1]);

    assert_that!(sketch.estimate_count(10_i64), eq(2));
    assert_that!(sketch.estimate_count(20_i64), eq(2));
    assert_that!(sketch.estimate_count(30_i64), eq(1));
    assert_that!(sketch.estimate_count(40_i64), eq(0));
    assert_that!(sketch.estimate_count("apple"), eq(3));
    assert_that!(sketch.estimate_count("banana"), eq(1));
}

#[test]
fn test_rebuilding_snapshot_produces_identical_bytes() {
    let mut sketch = CountMinSketch::new(3, 8, 30);
    sketch.add(20_i64, 1).unwrap();
    sketch.add(10_i64, 1).unwrap();
    sketch.add(30_i64, 1).unwrap();
    sketch.add(10_i64, 1).unwrap();
    sketch.add("apple", 3).unwrap();
    sketch.add("banana", 1).unwrap();

    let path = serialization_test_data("golden_files", "countmin_non_empty.bin");
    assert_eq!(sketch.serialize(), fs::read(&path).unwrap());
}

#[test]
fn test_deserialize_signed_and_astral_keys_snapshot() {
    let sketch = assert_golden_snapshot(
        "countmin_signed_and_astral_keys.bin",
        4,
        16,
        &[577165164, 2099436801, 754537216, 322603170],
        8,
    );

    assert_eq!(sketch.row(0), &[2, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0]);
    assert_eq!(sketch.row(1), &[2, 0, 0, 0, 0, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(sketch.row(2), &[2, 1, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 2, 0]);
    assert_eq!(sketch.row(3), &[2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0]);

    // Every coefficient times i64::MIN reduces to bucket 0, shared with key 0.
    for row in 0..4 {
        assert_eq!(sketch.bucket(i64::MIN, row), 0);
    }
    assert_that!(sketch.estimate_count(i64::MIN), eq(2));
    assert_that!(sketch.estimate_count(0_i64), eq(2));
    assert_that!(sketch.estimate_count(-7_i64), eq(2));
    assert_that!(sketch.estimate_count(7_i64), eq(0));
    assert_that!(sketch.estimate_count(i64::MAX), eq(0));

    // U+1F600 hashes as its surrogate pair 0xD83D 0xDE00.
    assert_eq!(countmin::hash::polynomial_hash("\u{1F600}"), 1772899);
    assert_eq!(countmin::hash::polynomial_hash("na\u{EF}ve"), 104710475);
    assert_that!(sketch.estimate_count("\u{1F600}"), eq(3));
    assert_that!(sketch.estimate_count("na\u{EF}ve"), eq(1));
    assert_that!(sketch.estimate_count("naive"), eq(0));
}

#[test]
fn test_rebuilding_signed_and_astral_snapshot_produces_identical_bytes() {
    let mut sketch = CountMinSketch::new(4, 16, -3);
    sketch.add(-7_i64, 1).unwrap();
    sketch.add(i64::MIN, 2).unwrap();
    sketch.update(-7_i64).unwrap();
    sketch.add("\u{1F600}", 3).unwrap();
    sketch.add(String::from("na\u{EF}ve"), 1).unwrap();
    assert!(!sketch.has_overflowed());

    let path = serialization_test_data("golden_files", "countmin_signed_and_astral_keys.bin");
    assert_eq!(sketch.serialize(), fs::read(&path).unwrap());
}

#[test]
fn test_round_trip_preserves_state() {
    let mut sketch = CountMinSketch::new(6, 50, -12);
    for i in 0..200_i64 {
        sketch.add(i % 17, i).unwrap();
    }
    for word in ["alpha", "beta", "gamma", "beta"] {
        sketch.update(word).unwrap();
    }

    let bytes = sketch.serialize();
    assert_eq!(bytes.len(), sketch.serialized_size());

    let restored = CountMinSketch::deserialize(&bytes).unwrap();
    assert_eq!(restored, sketch);
    assert_eq!(restored.epsilon(), sketch.epsilon());
    assert_eq!(restored.confidence(), sketch.confidence());
    for key in 0..20_i64 {
        assert_eq!(restored.estimate_count(key), sketch.estimate_count(key));
    }
    for word in ["alpha", "beta", "gamma", "delta"] {
        assert_eq!(restored.estimate_count(word), sketch.estimate_count(word));
    }
}

#[test]
fn test_round_trip_of_empty_sketch() {
    let sketch = CountMinSketch::new(10, 10, 30);
    let restored = CountMinSketch::deserialize(&sketch.serialize()).unwrap();

    assert_eq!(restored.total_count(), 0);
    assert!(restored.rows().flatten().all(|&c| c == 0));
    assert_eq!(restored.seeds(), sketch.seeds());
}

#[test]
fn test_deserialize_truncated_input() {
    let mut sketch = CountMinSketch::new(3, 8, 30);
    sketch.add("apple", 3).unwrap();
    let bytes = sketch.serialize();

    for len in [0, 7, 12, 15, 16, 100, bytes.len() - 1] {
        let err = CountMinSketch::deserialize(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
        assert_that!(err.message(), contains_substring("insufficient data"));
    }
}

#[test]
fn test_deserialize_trailing_bytes() {
    let mut bytes = CountMinSketch::new(2, 4, 7).serialize();
    bytes.push(0);

    let err = CountMinSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("trailing bytes"));
}

#[test]
fn test_deserialize_non_positive_dimensions() {
    let mut bytes = CountMinSketch::new(2, 4, 7).serialize();
    bytes[8..12].copy_from_slice(&0i32.to_be_bytes());
    let err = CountMinSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("depth must be positive"));

    let mut bytes = CountMinSketch::new(2, 4, 7).serialize();
    bytes[12..16].copy_from_slice(&(-4i32).to_be_bytes());
    let err = CountMinSketch::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("width must be positive"));
}

#[test]
fn test_deserialize_mismatched_dimensions() {
    // Declares 3 rows but carries only 2.
    let mut bytes = CountMinSketch::new(2, 4, 7).serialize();
    bytes[8..12].copy_from_slice(&3i32.to_be_bytes());
    let err = CountMinSketch::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.to_string().as_str(), contains_substring("expected_bytes: 120"));
}

#[test]
fn test_negative_total_marks_overflow() {
    let mut sketch = CountMinSketch::new(1, 2, 1);
    sketch.add(0_i64, i64::MAX).unwrap();
    sketch.add(0_i64, 2).unwrap();
    assert!(sketch.has_overflowed());

    let restored = CountMinSketch::deserialize(&sketch.serialize()).unwrap();
    assert!(restored.has_overflowed());
    assert_eq!(restored.total_count(), sketch.total_count());
}
