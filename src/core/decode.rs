//! Purpose: Run the full route-string decode pipeline and assemble the result.
//! Exports: `decode_route`, `decode_report`, `DecodeOutcome`, `DecodeMetadata`,
//! `DecodeReport`, `DecodeFailure`, `ROUTE_SENTINEL`.
//! Role: Single-pass orchestration: alphabet -> inflate -> deserialize.
//! Invariants: Stages short-circuit on first failure; no stage is retried.
//! Invariants: A failure report carries a bounded excerpt of the input, never
//! the full input.
use crate::core::alphabet;
use crate::core::deserialize;
use crate::core::error::{Error, ErrorKind};
use crate::core::inflate;
use crate::core::value::Value;

/// Marker character conventionally prefixed to shared route strings. Its
/// absence is not an error; the whole string is then treated as payload.
pub const ROUTE_SENTINEL: char = '!';

const MAX_EXCERPT_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeMetadata {
    pub original_length: usize,
    pub compressed_length: usize,
    pub decompressed_length: usize,
    /// Compressed over decompressed length, rounded to 2 decimal digits.
    pub compression_ratio: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodeOutcome {
    pub metadata: DecodeMetadata,
    /// Root values of the serialized stream. Route strings normally carry
    /// exactly one table, but the producing library may emit siblings.
    pub roots: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodeFailure {
    pub message: String,
    pub excerpt: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecodeReport {
    Success(DecodeOutcome),
    Failure(DecodeFailure),
}

/// Decodes a route string, reporting the first stage failure as an error.
pub fn decode_route(input: &str) -> Result<DecodeOutcome, Error> {
    let payload = input.strip_prefix(ROUTE_SENTINEL).unwrap_or(input);

    let compressed = alphabet::decode(payload);
    tracing::debug!(compressed_length = compressed.len(), "alphabet stage done");

    let decompressed = inflate::decompress(&compressed)?;
    tracing::debug!(
        decompressed_length = decompressed.len(),
        "decompression stage done"
    );

    let roots = deserialize::deserialize_roots(&decompressed)?;
    if roots.is_empty() {
        return Err(Error::new(ErrorKind::Malformed)
            .with_message("serialized stream holds no values")
            .with_offset(0));
    }
    tracing::debug!(roots = roots.len(), "deserialize stage done");

    let metadata = DecodeMetadata {
        original_length: input.len(),
        compressed_length: compressed.len(),
        decompressed_length: decompressed.len(),
        compression_ratio: round2(compressed.len() as f64 / decompressed.len() as f64),
    };
    Ok(DecodeOutcome { metadata, roots })
}

/// Decodes a route string, converting any stage failure into a structured
/// failure report. This is the surface the CLI emits from: callers always
/// get a renderable result, even for bad input.
pub fn decode_report(input: &str) -> DecodeReport {
    match decode_route(input) {
        Ok(outcome) => DecodeReport::Success(outcome),
        Err(err) => DecodeReport::Failure(DecodeFailure {
            message: err.to_string(),
            excerpt: excerpt(input),
        }),
    }
}

fn excerpt(input: &str) -> String {
    if input.chars().count() <= MAX_EXCERPT_CHARS {
        return input.to_string();
    }
    let mut excerpt: String = input.chars().take(MAX_EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
