//! Purpose: Inflate the compressed byte stage of a route string.
//! Exports: `decompress`.
//! Role: Safe, whole-buffer wrapper around the `flate2` decoders.
//! Invariants: No version-byte sniffing; failure of both stream forms is
//! the only validity signal.
//! Invariants: Inputs are human-shareable strings (single-digit KB), so
//! decompression is done wholly in memory with no streaming.
use std::io::{self, Read};

use flate2::read::{DeflateDecoder, ZlibDecoder};

use crate::core::error::{Error, ErrorKind};

/// Decompresses the alphabet-decoded bytes. The producing addon emits
/// either a zlib-wrapped or a raw deflate stream depending on version;
/// the zlib form is tried first and raw deflate on failure.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, Error> {
    match inflate_zlib(compressed) {
        Ok(decompressed) => Ok(decompressed),
        Err(zlib_err) => inflate_raw(compressed).map_err(|raw_err| {
            Error::new(ErrorKind::Decompression).with_message(format!(
                "invalid compressed stream (zlib: {zlib_err}; raw deflate: {raw_err})"
            ))
        }),
    }
}

fn inflate_zlib(compressed: &[u8]) -> io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    ZlibDecoder::new(compressed).read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

fn inflate_raw(compressed: &[u8]) -> io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    DeflateDecoder::new(compressed).read_to_end(&mut decompressed)?;
    Ok(decompressed)
}
