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

//! Binary layout of a Count-Min sketch.
//!
//! All fields are big-endian:
//!
//! ```text
//! i64  total_count
//! i32  depth
//! i32  width
//! depth times:
//!     i64  seed of the row
//!     i64  counters of the row, width times
//! ```

use super::CountMinSketch;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::error::Error;

const LONG_SIZE_BYTES: usize = 8;
const INT_SIZE_BYTES: usize = 4;
const HEADER_SIZE_BYTES: usize = LONG_SIZE_BYTES + 2 * INT_SIZE_BYTES;

pub(super) struct DecodedSketch {
    pub(super) total_count: i64,
    pub(super) depth: u32,
    pub(super) width: u32,
    pub(super) seeds: Vec<i64>,
    pub(super) table: Vec<i64>,
}

pub(super) fn serialized_size(depth: u32, width: u32) -> usize {
    HEADER_SIZE_BYTES + depth as usize * row_size_bytes(width as usize)
}

pub(super) fn serialize(sketch: &CountMinSketch) -> Vec<u8> {
    let mut bytes = SketchBytes::with_capacity(sketch.serialized_size());
    bytes.write_i64_be(sketch.total_count());
    bytes.write_i32_be(sketch.depth() as i32);
    bytes.write_i32_be(sketch.width() as i32);
    for (&seed, row) in sketch.seeds().iter().zip(sketch.rows()) {
        bytes.write_i64_be(seed);
        for &counter in row {
            bytes.write_i64_be(counter);
        }
    }
    bytes.into_bytes()
}

pub(super) fn deserialize(bytes: &[u8]) -> Result<DecodedSketch, Error> {
    fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
        move |err| Error::insufficient_data(tag).set_source(err)
    }

    let mut cursor = SketchSlice::new(bytes);
    let total_count = cursor.read_i64_be().map_err(make_error("total_count"))?;
    let depth = cursor.read_i32_be().map_err(make_error("depth"))?;
    let width = cursor.read_i32_be().map_err(make_error("width"))?;

    if depth < 1 {
        return Err(Error::deserial(format!(
            "depth must be positive. Found: {depth}"
        )));
    }
    if width < 1 {
        return Err(Error::deserial(format!(
            "width must be positive. Found: {width}"
        )));
    }
    let (depth, width) = (depth as usize, width as usize);

    // Validate the body length before allocating anything sized by the header.
    let expected = row_size_bytes(width)
        .checked_mul(depth)
        .ok_or_else(|| Error::deserial("sketch dimensions overflow the address space"))?;
    let actual = cursor.remaining();
    if actual < expected {
        return Err(Error::insufficient_data("table")
            .with_context("expected_bytes", expected)
            .with_context("actual_bytes", actual));
    }
    if actual > expected {
        return Err(Error::deserial("trailing bytes after table")
            .with_context("expected_bytes", expected)
            .with_context("actual_bytes", actual));
    }

    let mut seeds = Vec::with_capacity(depth);
    let mut table = vec![0; depth * width];
    for row in table.chunks_exact_mut(width) {
        seeds.push(cursor.read_i64_be().map_err(make_error("seeds"))?);
        cursor.read_i64_be_into(row).map_err(make_error("table"))?;
    }

    Ok(DecodedSketch {
        total_count,
        depth: depth as u32,
        width: width as u32,
        seeds,
        table,
    })
}

fn row_size_bytes(width: usize) -> usize {
    LONG_SIZE_BYTES * (width + 1)
}
