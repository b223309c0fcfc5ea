/*
 * Fixed parameters and code tables of the DEFLATE format (RFC 1951).
 */

pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u32 = 0;
pub const DEFLATE_BLOCKTYPE_STATIC_HUFFMAN: u32 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u32 = 2;

pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;
pub const DEFLATE_NUM_OFFSET_SYMS: usize = 32;

pub const DEFLATE_MAX_CODEWORD_LEN: u32 = 15;

pub const DEFLATE_END_OF_BLOCK: u16 = 256;
pub const DEFLATE_MAX_LITLEN_SYM: u16 = 285;
pub const DEFLATE_MAX_MATCH_LEN: usize = 258;

pub const DEFLATE_WINDOW_SIZE: usize = 32768;

/*
 * Each TABLEBITS number is the base-2 logarithm of the number of entries in
 * the direct portion of the corresponding decode table.  Codewords no longer
 * than TABLEBITS resolve with a single lookup; longer ones continue into the
 * overflow tree.
 */
pub const LITLEN_TABLEBITS: u32 = 9;
pub const OFFSET_TABLEBITS: u32 = 7;
pub const PRECODE_TABLEBITS: u32 = 7;

const_assert!(DEFLATE_WINDOW_SIZE.is_power_of_two());
const_assert!(LITLEN_TABLEBITS >= OFFSET_TABLEBITS);
const_assert!(DEFLATE_NUM_LITLEN_SYMS >= DEFLATE_NUM_OFFSET_SYMS);

/* The order in which precode lengths are stored.  */
pub const DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/* Number of extra bits carried by each length symbol, indexed by sym - 257. */
pub const EXTRA_LENGTH_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/* Base match length for each length symbol, indexed by sym - 257. */
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/* Base match distance for each distance symbol.  Symbols 30 and 31 are not
 * part of the format and must never be referenced. */
pub const OFFSET_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/*
 * Static blocks transmit every distance symbol as a plain 5-bit field, most
 * significant bit first.  Reading those bits LSB-first therefore yields the
 * symbol with its bits reversed; this map undoes the reversal.
 */
pub const STATIC_DISTANCE_REVERSE_MAP: [u8; DEFLATE_NUM_OFFSET_SYMS] = [
    0, 16, 8, 24, 4, 20, 12, 28, 2, 18, 10, 26, 6, 22, 14, 30, 1, 17, 9, 25, 5, 21, 13, 29, 3, 19,
    11, 27, 7, 23, 15, 31,
];
