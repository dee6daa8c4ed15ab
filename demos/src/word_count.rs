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

//! Counts the words of a file (one per line) with a sketch and compares the
//! estimates to exact counts.
//!
//! Usage: `word_count <path> [depth] [width]`

use std::collections::HashMap;
use std::env;
use std::fs;

use countmin::CountMinSketch;

const DEFAULT_DEPTH: u32 = 8;
const DEFAULT_WIDTH: u32 = 2_000_000;
const SEED: i64 = 30;
const TOP_WORDS: usize = 10;

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: word_count <path> [depth] [width]");
        std::process::exit(2);
    };
    let depth = args.next().map_or(DEFAULT_DEPTH, |v| v.parse().unwrap());
    let width = args.next().map_or(DEFAULT_WIDTH, |v| v.parse().unwrap());

    let text = fs::read_to_string(&path).unwrap();
    let mut sketch = CountMinSketch::new(depth, width, SEED);
    let mut exact: HashMap<&str, i64> = HashMap::new();
    for word in text.lines().map(str::trim).filter(|w| !w.is_empty()) {
        sketch.update(word).unwrap();
        *exact.entry(word).or_default() += 1;
    }

    println!("=== Word Count ({path}) ===\n");
    println!("Words: {}", sketch.total_count());
    println!("Distinct words: {}", exact.len());
    println!("Sketch: {depth} x {width}, {} bytes serialized", sketch.serialized_size());
    println!();

    let mut top: Vec<(&str, i64)> = exact.into_iter().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let mut max_error = 0;
    for (word, count) in &top {
        max_error = max_error.max(sketch.estimate_count(*word) - count);
    }
    for (word, count) in top.iter().take(TOP_WORDS) {
        println!(
            "   {word:<20} exact {count:>8}   estimate {:>8}",
            sketch.estimate_count(*word)
        );
    }
    println!();
    println!("Largest overestimate: {max_error}");
}
