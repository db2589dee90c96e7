//! Serializes a tile's rows into a framed byte buffer and hands it to the
//! codec adapter, and reverses that process on read.
//!
//! Encoding concatenates each row's preprocessed bytes followed by a single
//! `#` delimiter — chosen because it is assumed not to appear in raw
//! sequence data or in any reducer's numeric encoding. Implementations
//! should assert this on encode; debug builds of this crate do, via
//! [`assert_no_delimiter_collision`].

use crate::codec;
use crate::error::Result;
use crate::preprocess::Mode;
use crate::sequence::Sequence;
use crate::tile::Tile;

const ROW_DELIMITER: u8 = b'#';

/// Compress one tile: apply `mode`'s forward transform to every row,
/// concatenate the rows with a trailing `#` each, then hand the framed
/// buffer to the codec at `level`.
pub fn encode_tile(tile: &Tile, mode: Mode, level: i32) -> Result<Vec<u8>> {
    let mut framed = Vec::new();

    for sequence in &tile.sequences {
        let transformed = mode.forward(&sequence.data);
        debug_assert_no_delimiter_collision(&transformed);
        framed.extend_from_slice(&transformed);
        framed.push(ROW_DELIMITER);
    }

    codec::encode(&framed, level)
}

/// Decompress one tile's payload back into `width` rows, assigning each row
/// the sequence id at `ids[start_x + row_index]`.
///
/// The destination buffer is sized `2 * width * height` bytes, a generous
/// bound on the transforms' observed expansion; callers needing a tighter
/// bound should prefer the codec's published decompressed-size query where
/// available (spec §4.2).
pub fn decode_tile(payload: &[u8], start_x: i32, width: i32, height: i32, ids: &[String], mode: Mode) -> Result<Vec<Sequence>> {
    let max_dst_size = 2 * (width as usize) * (height as usize);
    let framed = codec::decode(payload, max_dst_size.max(1))?;

    let mut rows: Vec<&[u8]> = framed.split(|&b| b == ROW_DELIMITER).collect();
    // `split` always yields a trailing empty segment after the last delimiter.
    if rows.last().map_or(false, |row| row.is_empty()) {
        rows.pop();
    }

    let mut sequences = Vec::with_capacity(width as usize);
    for (row_index, framed_row) in rows.into_iter().enumerate() {
        let id = ids.get(start_x as usize + row_index)
            .cloned()
            .unwrap_or_default();

        sequences.push(Sequence::new(id, mode.inverse(framed_row)));
    }

    Ok(sequences)
}

fn debug_assert_no_delimiter_collision(transformed: &[u8]) {
    debug_assert!(
        !transformed.contains(&ROW_DELIMITER),
        "row delimiter '#' appeared in preprocessed row data; the framing convention is violated"
    );
}
