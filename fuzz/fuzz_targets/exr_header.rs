#![no_main]

//! Fuzz target for EXR structure parsing.
//!
//! Tests preamble, header and offset table parsing with arbitrary input data.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use std::io::Cursor;
use transcode_exr::{ExrDecoder, ExrFile};

#[derive(Arbitrary, Debug)]
struct ExrInput {
    data: Vec<u8>,
    test_mode: ExrTestMode,
    max_read_chunk: u16,
}

#[derive(Arbitrary, Debug)]
enum ExrTestMode {
    /// Full structural decode
    Decode,
    /// Preamble and headers only
    Probe,
    /// Decode with the magic number forced valid
    ValidMagic,
}

fn touch(file: &ExrFile) {
    let _ = file.topology.is_multi_part();
    for part in &file.parts {
        let _ = part.addressing.chunk_count();
        let _ = part.header.data_window();
        let _ = part.header.tiles();
        let _ = part.header.chunk_count();
        assert_eq!(part.offsets.len() as u64, part.addressing.chunk_count());
    }
}

fuzz_target!(|input: ExrInput| {
    // Limit input size
    if input.data.len() > 10 * 1024 * 1024 {
        return;
    }

    let decoder = ExrDecoder::new().max_read_chunk(input.max_read_chunk.max(1) as usize);

    match input.test_mode {
        ExrTestMode::Decode => {
            if let Ok(file) = decoder.decode_bytes(&input.data) {
                touch(&file);
            }
        }
        ExrTestMode::Probe => {
            if let Ok((version, headers)) = decoder.probe(Cursor::new(&input.data)) {
                let _ = version.topology();
                for header in &headers {
                    let _ = header.iter().count();
                }
            }
        }
        ExrTestMode::ValidMagic => {
            let mut data = transcode_exr::EXR_MAGIC.to_le_bytes().to_vec();
            data.extend_from_slice(&input.data);
            if let Ok(file) = decoder.decode_bytes(&data) {
                touch(&file);
            }
        }
    }
});
