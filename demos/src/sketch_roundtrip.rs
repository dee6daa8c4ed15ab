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

//! Builds a small sketch, writes it to disk, and reads it back.

use std::env;
use std::fs;

use countmin::CountMinSketch;

fn main() {
    println!("=== Count-Min Sketch Round Trip ===\n");

    let mut sketch = CountMinSketch::new(10, 10, 30);
    for key in [20_i64, 10, 30, 10] {
        sketch.add(key, 1).unwrap();
    }
    println!("Epsilon: {:.3}", sketch.epsilon());
    println!("Confidence: {:.6}", sketch.confidence());
    println!("Total count: {}", sketch.total_count());
    println!();

    let bytes = sketch.serialize();
    let path = env::temp_dir().join("countmin_roundtrip.bin");
    fs::write(&path, &bytes).unwrap();
    println!("Wrote {} bytes to {}", bytes.len(), path.display());

    let restored = CountMinSketch::deserialize(&fs::read(&path).unwrap()).unwrap();
    println!("Restored equals original: {}", restored == sketch);
    println!();

    print!("{restored}");
    println!();
    for key in [10_i64, 20, 30, 40] {
        println!("   estimate({key}) = {}", restored.estimate_count(key));
    }

    fs::remove_file(&path).unwrap();
}
