use crate::bitstream::BitStream;
use crate::decode_blocks::{read_dynamic_tables, read_stored_header};
use crate::deflate_constants::*;
use crate::huffman::{static_literal_length_table, HuffmanTable};
use crate::window::OutputWindow;
use crate::{safety_check, DeflateInput, InflateError};
use nightly_quirks::branch_pred::{likely, unlikely};

/*
 * Invoked once, when the final block has been fully decoded and drained,
 * with the computed Adler-32 of the whole output.  A framing layer gets the
 * bit stream so it can consume trailer bytes.
 */
pub type ChecksumCallback<I> = fn(&mut BitStream<I>, u32) -> Result<(), InflateError>;

/*
 * One step of the block state machine runs per pull once the window is
 * drained.  'Failed' latches the first error so that every later pull
 * reports it again.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    ReadingFinalBit,
    ReadingBlockType,
    ReadingStored,
    ReadingStatic,
    ReadingDynamic,
    DecodingBlock,
    Done,
    Failed(InflateError),
}

/* Huffman tables of the block being decoded.  Static blocks reference the
 * process-wide fixed literal/length tree and read distance codes as plain
 * reversed 5-bit fields, so they carry no tables of their own. */
enum ActiveTables {
    None,
    Static,
    Dynamic {
        litlen: HuffmanTable,
        offset: HuffmanTable,
    },
}

/*
 * Streaming DEFLATE decoder.  Each 'next_byte' call either hands out a byte
 * already queued in the window or advances the decoder just far enough to
 * produce one; input is consumed strictly in stream order.
 */
pub struct DeflateDecoder<I: DeflateInput> {
    bits: BitStream<I>,
    window: OutputWindow,
    state: DecodeState,
    is_final_block: bool,
    tables: ActiveTables,
    checksum_cb: Option<ChecksumCallback<I>>,
}

impl<I: DeflateInput> DeflateDecoder<I> {
    pub fn new(input: I) -> Self {
        Self {
            bits: BitStream::new(input),
            window: OutputWindow::new(),
            state: DecodeState::ReadingFinalBit,
            is_final_block: false,
            tables: ActiveTables::None,
            checksum_cb: None,
        }
    }

    pub fn with_checksum(input: I, checksum_cb: ChecksumCallback<I>) -> Self {
        let mut decoder = Self::new(input);
        decoder.checksum_cb = Some(checksum_cb);
        decoder
    }

    /*
     * Pull the next decoded byte, or None once the final block and any
     * checksum verification have completed.
     */
    pub fn next_byte(&mut self) -> Result<Option<u8>, InflateError> {
        if let DecodeState::Failed(error) = self.state {
            return Err(error);
        }

        loop {
            if self.window.pending() > 0 {
                return Ok(Some(self.window.take()));
            }

            /* Stored-block bytes bypass the bit stream entirely; the staging
             * register is empty after the aligned LEN/NLEN reads. */
            if self.window.raw_pending() > 0 {
                debug_assert!(self.bits.available_bits() == 0);
                let byte = match self.bits.input_mut().next_byte() {
                    Some(byte) => byte,
                    None => return Err(self.fail(InflateError::EndOfStream)),
                };
                self.window.copy_stored(byte);
                return Ok(Some(self.window.take()));
            }

            if self.state == DecodeState::Done {
                self.window.reduce_checksum();
                let checksum = self.window.checksum();
                if let Some(callback) = self.checksum_cb.take() {
                    callback(&mut self.bits, checksum).map_err(|error| self.fail(error))?;
                }
                return Ok(None);
            }

            self.window.reduce_checksum();
            if let Err(error) = self.decode_step() {
                return Err(self.fail(error));
            }
        }
    }

    fn fail(&mut self, error: InflateError) -> InflateError {
        self.state = DecodeState::Failed(error);
        error
    }

    /* Advance the block state machine by one step. */
    fn decode_step(&mut self) -> Result<(), InflateError> {
        match self.state {
            DecodeState::ReadingFinalBit => {
                self.is_final_block = self.bits.pop_bits(1)? != 0;
                self.state = DecodeState::ReadingBlockType;
            }
            DecodeState::ReadingBlockType => {
                let block_type = self.bits.pop_bits(2)?;
                log::trace!("block: type={block_type} final={}", self.is_final_block);
                self.state = match block_type {
                    DEFLATE_BLOCKTYPE_UNCOMPRESSED => DecodeState::ReadingStored,
                    DEFLATE_BLOCKTYPE_STATIC_HUFFMAN => DecodeState::ReadingStatic,
                    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => DecodeState::ReadingDynamic,
                    _ => return Err(InflateError::InvalidBlockType),
                };
            }
            DecodeState::ReadingStored => {
                let len = read_stored_header(&mut self.bits)?;
                self.window.set_raw_pending(len as usize);
                self.state = self.next_block_state();
            }
            DecodeState::ReadingStatic => {
                self.tables = ActiveTables::Static;
                self.state = DecodeState::DecodingBlock;
            }
            DecodeState::ReadingDynamic => {
                let (litlen, offset) = read_dynamic_tables(&mut self.bits)?;
                self.tables = ActiveTables::Dynamic { litlen, offset };
                self.state = DecodeState::DecodingBlock;
            }
            DecodeState::DecodingBlock => {
                if self.decode_block_symbols()? {
                    self.state = self.next_block_state();
                }
            }
            DecodeState::Done | DecodeState::Failed(_) => unreachable!(),
        }
        Ok(())
    }

    fn next_block_state(&self) -> DecodeState {
        if self.is_final_block {
            DecodeState::Done
        } else {
            DecodeState::ReadingFinalBit
        }
    }

    /*
     * Decode symbols into the window until the end-of-block symbol or until
     * free space no longer guarantees room for a whole match, whichever
     * comes first.  Returns true when the block ended.
     */
    fn decode_block_symbols(&mut self) -> Result<bool, InflateError> {
        let Self {
            bits,
            window,
            tables,
            ..
        } = self;

        let (litlen, offset): (&HuffmanTable, Option<&HuffmanTable>) = match &*tables {
            ActiveTables::Static => (static_literal_length_table(), None),
            ActiveTables::Dynamic { litlen, offset } => (litlen, Some(offset)),
            ActiveTables::None => return Err(InflateError::InvalidData),
        };

        while window.free_space() > DEFLATE_MAX_MATCH_LEN {
            let symbol = litlen.next_symbol(bits)?;

            if likely(symbol < DEFLATE_END_OF_BLOCK) {
                window.put_literal(symbol as u8);
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK {
                return Ok(true);
            }
            if unlikely(symbol > DEFLATE_MAX_LITLEN_SYM) {
                return Err(InflateError::InvalidData);
            }

            /* Length symbol: base length plus extra bits. */
            let length_slot = (symbol - 257) as usize;
            let length = if length_slot < 8 {
                length_slot + 3
            } else if length_slot == 28 {
                DEFLATE_MAX_MATCH_LEN
            } else {
                let extra = u32::from(EXTRA_LENGTH_BITS[length_slot]);
                LENGTH_BASE[length_slot] as usize + bits.pop_bits(extra)? as usize
            };

            /* Distance symbol: Huffman-coded in dynamic blocks, a raw
             * reversed 5-bit field in static blocks. */
            let dist_sym = match offset {
                Some(table) => table.next_symbol(bits)? as usize,
                None => STATIC_DISTANCE_REVERSE_MAP[bits.pop_bits(5)? as usize] as usize,
            };
            safety_check!(dist_sym < OFFSET_BASE.len(), InflateError::InvalidData);
            let distance = if dist_sym <= 3 {
                dist_sym + 1
            } else {
                let extra = (dist_sym as u32 - 2) >> 1;
                OFFSET_BASE[dist_sym] as usize + bits.pop_bits(extra)? as usize
            };

            window.put_copy(length, distance);
        }

        Ok(false)
    }

    /* Consume the underlying producer, discarding buffered bits. */
    pub fn into_inner(self) -> I {
        self.bits.into_inner()
    }
}

impl<I: DeflateInput> Iterator for DeflateDecoder<I> {
    type Item = Result<u8, InflateError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_byte().transpose()
    }
}
