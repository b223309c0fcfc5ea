/*
 * Header fields of the zlib container (RFC 1950).
 */

/* CMF: low nibble is the compression method, high nibble is CINFO
 * (window size log2 minus 8). */
pub const ZLIB_CM_MASK: u8 = 0x0F;
pub const ZLIB_CM_DEFLATE: u8 = 8;
pub const ZLIB_CINFO_SHIFT: u8 = 4;
pub const ZLIB_MAX_WINDOW_LOG: u8 = 15;

/* FLG: bit 5 signals a preset dictionary; bits 0..=4 make
 * (CMF * 256 + FLG) a multiple of 31. */
pub const ZLIB_FLG_FDICT: u8 = 0x20;
pub const ZLIB_HEADER_CHECK_DIVISOR: u32 = 31;
