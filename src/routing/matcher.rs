//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a registration path (`/category/:category/:product`) into segments
//! - Match a concrete request path segment by segment
//! - Produce captured values as [`Params`]
//!
//! # Design Decisions
//! - Fixed arity: segment counts must be equal, no wildcards or optional tails
//! - Literal segments are compared byte for byte (case-sensitive)
//! - Malformed patterns are accepted as-is; validation is opt-in
//! - No regex to guarantee O(n) matching

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::routing::Params;

/// Leading character marking a capture segment.
pub const CAPTURE_MARKER: char = ':';

/// One `/`-delimited piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly.
    Literal(String),
    /// Binds the request segment under this name.
    Capture(String),
}

/// Problems reported by [`RoutePattern::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("capture segment at position {position} in `{pattern}` has an empty name")]
    EmptyCaptureName { pattern: String, position: usize },

    #[error("capture name `{name}` appears more than once in `{pattern}`")]
    DuplicateCapture { pattern: String, name: String },
}

/// A compiled, immutable path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern. Never fails: a bare `:` compiles to a capture with
    /// an empty name.
    pub fn new(pattern: impl Into<String>) -> Self {
        let raw = pattern.into();
        let segments = raw
            .split('/')
            .map(|s| match s.strip_prefix(CAPTURE_MARKER) {
                Some(name) => Segment::Capture(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a request path, returning the captured values on success.
    ///
    /// An all-literal pattern yields an empty `Params` when it matches;
    /// only `None` signals a miss.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let request: Vec<&str> = path.split('/').collect();
        if request.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, value) in self.segments.iter().zip(request) {
            match segment {
                Segment::Capture(name) => {
                    params.insert(name.as_str(), value);
                }
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(params)
    }

    /// Check for empty or repeated capture names.
    pub fn validate(&self) -> Result<(), PatternError> {
        let mut seen = HashSet::new();
        for (position, segment) in self.segments.iter().enumerate() {
            if let Segment::Capture(name) = segment {
                if name.is_empty() {
                    return Err(PatternError::EmptyCaptureName {
                        pattern: self.raw.clone(),
                        position,
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(PatternError::DuplicateCapture {
                        pattern: self.raw.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for RoutePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}
