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

//! Errors surfaced by the sketch.
//!
//! Nothing is retried internally. Each failing operation maps to one kind:
//!
//! - [`CountMinSketch::try_new`] with a zero or oversized depth or width
//!   returns [`ErrorKind::ConfigInvalid`].
//! - [`CountMinSketch::add`] with a negative count returns
//!   [`ErrorKind::InvalidArgument`].
//! - [`CountMinSketch::deserialize`] on truncated, mis-sized, or padded input
//!   returns [`ErrorKind::MalformedDeserializeData`].
//!
//! Overflow of the running total is not an error; see
//! [`CountMinSketch::has_overflowed`].
//!
//! [`CountMinSketch::try_new`]: crate::CountMinSketch::try_new
//! [`CountMinSketch::add`]: crate::CountMinSketch::add
//! [`CountMinSketch::deserialize`]: crate::CountMinSketch::deserialize
//! [`CountMinSketch::has_overflowed`]: crate::CountMinSketch::has_overflowed

use std::fmt;

/// The class of failure an [`Error`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested depth or width cannot back a sketch.
    ConfigInvalid,
    /// An update was given a value the additive model cannot take.
    InvalidArgument,
    /// The bytes handed to `deserialize` are not a complete sketch dump.
    MalformedDeserializeData,
}

impl ErrorKind {
    /// Returns the kind's name.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::MalformedDeserializeData => "MalformedDeserializeData",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// A failed sketch operation: its kind, a message, the values involved, and
/// optionally the lower-level error that caused it.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Creates an error of `kind` described by `message`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),
            source: None,
        }
    }

    /// Records a value involved in the failure, such as an offending count
    /// or an expected byte length.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Attaches the error that caused this one.
    ///
    /// # Panics
    ///
    /// Panics if a source is already attached.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use countmin::error::{Error, ErrorKind};
    ///
    /// let mut error = Error::new(ErrorKind::MalformedDeserializeData, "sketch dump ended early");
    /// assert!(error.source().is_none());
    /// error = error.set_source(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "a source error is already attached");
        self.source = Some(src.into());
        self
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the value recorded under `key` by [`with_context`](Self::with_context).
    ///
    /// ```
    /// use countmin::CountMinSketch;
    ///
    /// let mut sketch = CountMinSketch::new(2, 8, 1);
    /// let err = sketch.add("word", -3).unwrap_err();
    /// assert_eq!(err.context_value("count"), Some("-3"));
    /// ```
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Error {
    pub(crate) fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn deserial(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDeserializeData, message)
    }

    /// The dump ended before `tag` could be read in full.
    pub(crate) fn insufficient_data(tag: &'static str) -> Self {
        Self::deserial(format!("insufficient data while reading {tag}"))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("Error")
                .field("kind", &self.kind)
                .field("message", &self.message)
                .field("context", &self.context)
                .field("source", &self.source)
                .finish();
        }

        // One line for the failure, then one indented line per recorded value.
        write!(f, "{}: {}", self.kind, self.message)?;
        for (k, v) in &self.context {
            write!(f, "\n    {k} = {v}")?;
        }
        if let Some(source) = &self.source {
            write!(f, "\ncaused by: {source:#}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        for (i, (k, v)) in self.context.iter().enumerate() {
            let open = if i == 0 { ", context: { " } else { ", " };
            write!(f, "{open}{k}: {v}")?;
        }
        if !self.context.is_empty() {
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}
