use crate::bitstream::{can_ensure, BitStream};
use crate::deflate_constants::{
    DEFLATE_NUM_LITLEN_SYMS, DEFLATE_NUM_OFFSET_SYMS, DEFLATE_NUM_PRECODE_SYMS,
    DEFLATE_PRECODE_LENS_PERMUTATION, LITLEN_TABLEBITS, OFFSET_TABLEBITS, PRECODE_TABLEBITS,
};
use crate::huffman::HuffmanTable;
use crate::{safety_check, DeflateInput, InflateError};

/*
 * Header of a stored block: realign to a byte boundary, then LEN and its
 * one's complement NLEN.  The LEN bytes themselves are passed through by
 * the caller.
 */
pub fn read_stored_header<I: DeflateInput>(
    bits: &mut BitStream<I>,
) -> Result<u16, InflateError> {
    bits.align_input();

    let len = bits.read_u16()?;
    let nlen = bits.read_u16()?;
    safety_check!(len == !nlen, InflateError::InvalidStoredBlockLength);

    Ok(len)
}

/*
 * Dynamic block header (RFC 1951 §3.2.7): a code-length code is transmitted
 * first and then used to decode the literal/length and distance code
 * lengths, with run-length shorthands for repeats.
 */
pub fn read_dynamic_tables<I: DeflateInput>(
    bits: &mut BitStream<I>,
) -> Result<(HuffmanTable, HuffmanTable), InflateError> {
    const_assert!(can_ensure(5));

    let num_litlen = bits.pop_bits(5)? as usize + 257;
    let num_offset = bits.pop_bits(5)? as usize + 1;
    let num_explicit_precode_lens = bits.pop_bits(4)? as usize + 4;
    log::trace!(
        "dynamic header: hlit={num_litlen} hdist={num_offset} hclen={num_explicit_precode_lens}"
    );

    /* Read the precode codeword lengths, stored in a fixed permutation. */
    let mut precode_lens = [0u8; DEFLATE_NUM_PRECODE_SYMS];
    for i in 0..num_explicit_precode_lens {
        precode_lens[DEFLATE_PRECODE_LENS_PERMUTATION[i] as usize] = bits.pop_bits(3)? as u8;
    }

    let precode = HuffmanTable::new(&precode_lens, PRECODE_TABLEBITS)?;

    /* Expand the literal/length and offset codeword lengths. */
    let total = num_litlen + num_offset;
    let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
    let mut i = 0;
    while i < total {
        let presym = precode.next_symbol(bits)?;
        match presym {
            0..=15 => {
                /* Explicit codeword length. */
                lens[i] = presym as u8;
                i += 1;
            }
            16 => {
                /* Repeat the previous length 3..=6 times. */
                safety_check!(i != 0, InflateError::InvalidRepeatCode);
                let rep_count = bits.pop_bits(2)? as usize + 3;
                safety_check!(i + rep_count <= total, InflateError::InvalidRepeatCode);
                let rep_val = lens[i - 1];
                lens[i..i + rep_count].fill(rep_val);
                i += rep_count;
            }
            17 => {
                /* Repeat zero 3..=10 times; 'lens' starts zeroed. */
                let rep_count = bits.pop_bits(3)? as usize + 3;
                safety_check!(i + rep_count <= total, InflateError::InvalidRepeatCode);
                i += rep_count;
            }
            18 => {
                /* Repeat zero 11..=138 times. */
                let rep_count = bits.pop_bits(7)? as usize + 11;
                safety_check!(i + rep_count <= total, InflateError::InvalidRepeatCode);
                i += rep_count;
            }
            _ => return Err(InflateError::InvalidData),
        }
    }

    /* A block with no end-of-block code could never terminate. */
    safety_check!(lens[256] != 0, InflateError::MissingEndOfBlock);

    let mut litlen_lens = [0u8; DEFLATE_NUM_LITLEN_SYMS];
    litlen_lens[..num_litlen].copy_from_slice(&lens[..num_litlen]);
    let mut offset_lens = [0u8; DEFLATE_NUM_OFFSET_SYMS];
    offset_lens[..num_offset].copy_from_slice(&lens[num_litlen..total]);

    let litlen = HuffmanTable::new(&litlen_lens, LITLEN_TABLEBITS)?;
    let offset = HuffmanTable::new(&offset_lens, OFFSET_TABLEBITS)?;
    Ok((litlen, offset))
}
