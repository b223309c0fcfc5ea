use crate::bitstream::BitStream;
use crate::decompress_deflate::DeflateDecoder;
use crate::zlib_constants::*;
use crate::{safety_check, DeflateInput, InflateError};

/*
 * Streaming decoder for the zlib container (RFC 1950): a two-byte header,
 * a DEFLATE stream, and a big-endian Adler-32 of the decompressed output.
 *
 * The trailer check runs when the inner decoder reports end of stream, so a
 * checksum failure surfaces on the final pull and only on streams that
 * otherwise decoded completely.
 */
pub struct ZlibDecoder<I: DeflateInput> {
    engine: DeflateDecoder<I>,
}

impl<I: DeflateInput> ZlibDecoder<I> {
    pub fn new(mut input: I) -> Result<Self, InflateError> {
        let cmf = input.next_byte().ok_or(InflateError::EndOfStream)?;
        let flg = input.next_byte().ok_or(InflateError::EndOfStream)?;
        log::debug!("zlib header: cmf={cmf:#04x} flg={flg:#04x}");

        safety_check!(
            cmf & ZLIB_CM_MASK == ZLIB_CM_DEFLATE,
            InflateError::UnsupportedZlibMethod
        );
        safety_check!(
            (cmf >> ZLIB_CINFO_SHIFT) + 8 <= ZLIB_MAX_WINDOW_LOG,
            InflateError::InvalidZlibWindow
        );
        safety_check!(
            (u32::from(cmf) * 256 + u32::from(flg)) % ZLIB_HEADER_CHECK_DIVISOR == 0,
            InflateError::InvalidZlibHeaderCheck
        );
        /* A preset dictionary would need a dictionary-feed surface that
         * does not exist here. */
        safety_check!(flg & ZLIB_FLG_FDICT == 0, InflateError::UnsupportedPreset);

        Ok(Self {
            engine: DeflateDecoder::with_checksum(input, verify_trailer),
        })
    }

    pub fn next_byte(&mut self) -> Result<Option<u8>, InflateError> {
        self.engine.next_byte()
    }

    pub fn into_inner(self) -> I {
        self.engine.into_inner()
    }
}

/*
 * The DEFLATE stream ends mid-byte; the four trailer bytes start at the
 * next byte boundary.
 */
fn verify_trailer<I: DeflateInput>(
    bits: &mut BitStream<I>,
    computed: u32,
) -> Result<(), InflateError> {
    bits.align_input();

    let mut expected = 0u32;
    for _ in 0..4 {
        expected = (expected << 8) | bits.pop_bits(8)?;
    }
    log::trace!("zlib trailer: expected={expected:#010x} computed={computed:#010x}");

    safety_check!(
        expected == computed,
        InflateError::AdlerMismatch { expected, computed }
    );
    Ok(())
}

impl<I: DeflateInput> Iterator for ZlibDecoder<I> {
    type Item = Result<u8, InflateError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_byte().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::ZlibDecoder;
    use crate::streams::slice_input::SliceInput;
    use crate::{decompress_zlib_to_vec, InflateError};

    const HELLO: [u8; 13] = [
        0x78, 0x9C, 0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x07, 0x00, 0x05, 0x8C, 0x01, 0xF5,
    ];

    #[test_log::test]
    fn decodes_wrapped_stream() {
        assert_eq!(decompress_zlib_to_vec(&HELLO).unwrap(), b"Hello");
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let mut data = HELLO;
        *data.last_mut().unwrap() ^= 0x01;
        assert_eq!(
            decompress_zlib_to_vec(&data),
            Err(InflateError::AdlerMismatch {
                expected: 0x058C01F4,
                computed: 0x058C01F5,
            })
        );
    }

    #[test]
    fn checksum_failure_surfaces_on_final_pull() {
        let mut data = HELLO;
        *data.last_mut().unwrap() ^= 0x01;

        let mut decoder = ZlibDecoder::new(SliceInput::new(&data)).unwrap();
        let mut decoded = Vec::new();
        let error = loop {
            match decoder.next_byte() {
                Ok(Some(byte)) => decoded.push(byte),
                Ok(None) => panic!("corrupt trailer went unnoticed"),
                Err(error) => break error,
            }
        };
        /* Every payload byte came out before the trailer was checked. */
        assert_eq!(decoded, b"Hello");
        assert!(matches!(error, InflateError::AdlerMismatch { .. }));
        /* And the failure is latched. */
        assert_eq!(decoder.next_byte(), Err(error));
    }

    #[test]
    fn rejects_bad_header_check() {
        let mut data = HELLO;
        data[1] ^= 0x01;
        assert_eq!(
            decompress_zlib_to_vec(&data),
            Err(InflateError::InvalidZlibHeaderCheck)
        );
    }

    #[test]
    fn rejects_unknown_method() {
        /* CM = 7; FLG chosen so the header check still passes. */
        let err = decompress_zlib_to_vec(&[0x77, 0x01]).unwrap_err();
        assert_eq!(err, InflateError::UnsupportedZlibMethod);
    }

    #[test]
    fn rejects_oversized_window() {
        /* CINFO = 8 with a valid check byte. */
        let err = decompress_zlib_to_vec(&[0x88, 0x1C]).unwrap_err();
        assert_eq!(err, InflateError::InvalidZlibWindow);
    }

    #[test]
    fn rejects_preset_dictionary() {
        /* FDICT set, check byte valid. */
        let err = decompress_zlib_to_vec(&[0x78, 0x20]).unwrap_err();
        assert_eq!(err, InflateError::UnsupportedPreset);
    }

    #[test]
    fn truncated_trailer() {
        assert_eq!(
            decompress_zlib_to_vec(&HELLO[..HELLO.len() - 2]),
            Err(InflateError::EndOfStream)
        );
    }
}
