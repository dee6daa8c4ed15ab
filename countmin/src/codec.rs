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

//! Big-endian byte buffers used by sketch serialization.

use std::io;
use std::io::Cursor;

use byteorder::BigEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;

pub(crate) struct SketchBytes {
    bytes: Vec<u8>,
}

impl SketchBytes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    // Writing into a Vec never fails.
    pub fn write_i32_be(&mut self, n: i32) {
        let _ = self.bytes.write_i32::<BigEndian>(n);
    }

    pub fn write_i64_be(&mut self, n: i64) {
        let _ = self.bytes.write_i64::<BigEndian>(n);
    }
}

pub(crate) struct SketchSlice<'a> {
    slice: Cursor<&'a [u8]>,
}

impl<'a> SketchSlice<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        SketchSlice {
            slice: Cursor::new(slice),
        }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        let len = self.slice.get_ref().len();
        len.saturating_sub(self.slice.position() as usize)
    }

    pub fn read_i32_be(&mut self) -> io::Result<i32> {
        self.slice.read_i32::<BigEndian>()
    }

    pub fn read_i64_be(&mut self) -> io::Result<i64> {
        self.slice.read_i64::<BigEndian>()
    }

    pub fn read_i64_be_into(&mut self, dst: &mut [i64]) -> io::Result<()> {
        self.slice.read_i64_into::<BigEndian>(dst)
    }
}
