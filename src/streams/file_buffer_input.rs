use crate::DeflateInput;
use filebuffer::FileBuffer;
use std::io;
use std::path::Path;

/* Byte producer over a memory-mapped file. */
pub struct FileBufferInput {
    file: FileBuffer,
    position: usize,
}

impl FileBufferInput {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: FileBuffer::open(path)?,
            position: 0,
        })
    }
}

impl DeflateInput for FileBufferInput {
    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.file.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::FileBufferInput;
    use crate::ZlibDecoder;

    #[test]
    fn decodes_a_zlib_file() {
        let path = std::env::temp_dir().join("streaming_inflate_filebuffer_test.zz");
        std::fs::write(
            &path,
            [0x78, 0x9C, 0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x07, 0x00, 0x05, 0x8C, 0x01, 0xF5],
        )
        .unwrap();

        let input = FileBufferInput::open(&path).unwrap();
        let decoded: Vec<u8> = ZlibDecoder::new(input)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded, b"Hello");

        std::fs::remove_file(&path).ok();
    }
}
