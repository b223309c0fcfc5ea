pub mod bitstream;

pub mod decode_blocks;
pub mod decompress_deflate;
pub mod decompress_zlib;
pub mod huffman;
pub mod streams;

mod adler32;
mod deflate_constants;
mod window;
mod zlib_constants;

#[macro_use]
extern crate static_assertions;

use crate::streams::slice_input::SliceInput;
use std::fmt;

pub use crate::decompress_deflate::DeflateDecoder;
pub use crate::decompress_zlib::ZlibDecoder;

/*
 * The compressed byte producer feeding a decoder.  A producer is a lazy
 * finite sequence: `next_byte` either yields the next input byte or reports
 * exhaustion, and exhaustion is sticky.
 */
pub trait DeflateInput {
    fn next_byte(&mut self) -> Option<u8>;
}

/*
 * Result of a failed pull on a `DeflateDecoder` or `ZlibDecoder`.  The first
 * error a decoder hits is latched; every later pull returns it again.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflateError {
    /* The producer ran out while the decoder still needed bits. */
    EndOfStream,

    /* A block header carried the reserved block type 3. */
    InvalidBlockType,

    /* A stored block's LEN and NLEN fields are not one's complements. */
    InvalidStoredBlockLength,

    /* A code-length vector does not describe a usable prefix code. */
    InvalidHuffmanData,

    /* A dynamic block defines no code for the end-of-block symbol. */
    MissingEndOfBlock,

    /* A code-length repeat had no previous entry or overran the header. */
    InvalidRepeatCode,

    /* A decoded symbol fell outside its alphabet. */
    InvalidData,

    /* zlib-layer failures. */
    UnsupportedZlibMethod,
    InvalidZlibWindow,
    InvalidZlibHeaderCheck,
    UnsupportedPreset,
    AdlerMismatch { expected: u32, computed: u32 },
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InflateError::EndOfStream => write!(f, "unexpected end of stream"),
            InflateError::InvalidBlockType => write!(f, "reserved block type"),
            InflateError::InvalidStoredBlockLength => {
                write!(f, "stored block length check failed")
            }
            InflateError::InvalidHuffmanData => write!(f, "invalid huffman code lengths"),
            InflateError::MissingEndOfBlock => write!(f, "no end-of-block code"),
            InflateError::InvalidRepeatCode => write!(f, "invalid code-length repeat"),
            InflateError::InvalidData => write!(f, "malformed compressed data"),
            InflateError::UnsupportedZlibMethod => write!(f, "unsupported zlib method"),
            InflateError::InvalidZlibWindow => write!(f, "invalid zlib window size"),
            InflateError::InvalidZlibHeaderCheck => write!(f, "zlib header check failed"),
            InflateError::UnsupportedPreset => write!(f, "preset dictionaries are not supported"),
            InflateError::AdlerMismatch { expected, computed } => {
                write!(
                    f,
                    "adler-32 mismatch: stream carries {expected:#010x}, computed {computed:#010x}"
                )
            }
        }
    }
}

impl std::error::Error for InflateError {}

#[macro_export]
macro_rules! safety_check {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/* Decode a bare DEFLATE stream held in memory. */
pub fn decompress_deflate_to_vec(data: &[u8]) -> Result<Vec<u8>, InflateError> {
    DeflateDecoder::new(SliceInput::new(data)).collect()
}

/* Decode a zlib stream held in memory, verifying its Adler-32 trailer. */
pub fn decompress_zlib_to_vec(data: &[u8]) -> Result<Vec<u8>, InflateError> {
    ZlibDecoder::new(SliceInput::new(data))?.collect()
}
