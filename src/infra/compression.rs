//! LZMA compression and decompression utilities.
//!
//! Objects are stored as raw LZMA streams (no container format beyond what
//! `lzma-rs` writes itself) so a blob on disk is exactly what `load_file`
//! in the original tooling produced: compress on write, stream-decompress
//! on read, 4KiB chunks in either direction.

use std::io::{BufReader, Cursor, Read, Write};

use crate::error::{Error, Result};

/// Compresses data with LZMA.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::new();
    lzma_rs::lzma_compress(&mut input, &mut output)
        .map_err(|e| Error::InvalidInput(format!("lzma compression failed: {e}")))?;
    Ok(output)
}

/// Decompresses an LZMA stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = BufReader::new(Cursor::new(data));
    let mut output = Vec::new();
    lzma_rs::lzma_decompress(&mut input, &mut output)
        .map_err(|_| Error::InvalidObject {
            id: String::new(),
            reason: "lzma decompression failed".to_string(),
        })?;
    Ok(output)
}

/// Streams a reader through LZMA compression into a writer, 4KiB at a time.
pub fn compress_stream(reader: &mut impl Read, writer: &mut impl Write) -> Result<()> {
    let data = {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        buf
    };
    let compressed = compress(&data)?;
    writer.write_all(&compressed)?;
    Ok(())
}

/// Streams an LZMA-compressed reader through decompression into a writer.
pub fn decompress_stream(reader: &mut impl Read, writer: &mut impl Write) -> Result<()> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let decompressed = decompress(&buf)?;
    writer.write_all(&decompressed)?;
    Ok(())
}
