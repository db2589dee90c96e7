//! The compression driver: reads MSA text, tiles it, and streams the
//! container out — header lines, then tile payloads (accumulating the id
//! directory and footer as it goes), then the directory, footer, and
//! trailer.

use std::io::BufReader;

use super::{ContainerIndex, Trailer};
use crate::engine;
use crate::error::Result;
use crate::io::{Data, Read, Write, Seek};
use crate::parse::MsaReader;
use crate::partition::partition_row_band;
use crate::preprocess::Mode;
use crate::sequence::Sequence;
use crate::tile::FooterEntry;

/// Tuning for one compression run: `A`/`B` tile dimensions, the codec
/// level, and the preprocessing mode applied to every tile.
#[derive(Debug, Clone, Copy)]
pub struct CompressOptions {
    pub tile_rows: usize,
    pub tile_columns: usize,
    pub level: i32,
    pub mode: Mode,
}

impl Default for CompressOptions {
    /// The CLI's documented defaults: `A = 200000`, `B = 9000`, `z = 13`, `p = reduceA`.
    fn default() -> Self {
        Self { tile_rows: 200_000, tile_columns: 9_000, level: 13, mode: Mode::ReduceA }
    }
}

/// Read MSA text from `input` and write the compressed container to `output`.
pub fn compress(input: impl Read, mut output: impl Write + Seek, options: &CompressOptions) -> Result<()> {
    let tile_rows = options.tile_rows.max(1);
    let tile_columns = options.tile_columns.max(1);

    let mut reader = MsaReader::new(BufReader::new(input));
    let headers = reader.read_headers()?;

    for header in &headers {
        output.write_all(header.as_bytes())?;
        output.write_all(b"\n")?;
    }

    let data_start_pos = output.stream_position()?;
    log::debug!("wrote {} header line(s), data starts at byte {}", headers.len(), data_start_pos);

    let mut ids = Vec::new();
    let mut footer = Vec::new();
    let mut band = Vec::with_capacity(tile_rows);
    let mut current_x = 0i32;

    while let Some(sequence) = reader.next_row()? {
        band.push(sequence);

        if band.len() >= tile_rows {
            flush_band(&band, current_x, options, &mut output, &mut ids, &mut footer)?;
            current_x += band.len() as i32;
            band.clear();
        }
    }

    if !band.is_empty() {
        flush_band(&band, current_x, options, &mut output, &mut ids, &mut footer)?;
    }

    let sequence_ids_start_pos = output.stream_position()?;
    for id in &ids {
        let length = id.len() as u16;
        length.write(&mut output)?;
        output.write_all(id.as_bytes())?;
    }

    let footer_start_pos = output.stream_position()?;
    for entry in &footer {
        entry.write(&mut output)?;
    }

    Trailer { data_start_pos, sequence_ids_start_pos, footer_start_pos }.write(&mut output)?;

    log::info!(
        "compressed {} row(s) into {} tile(s) ({} byte header, {} ids)",
        current_x + band.len() as i32, footer.len(), data_start_pos, ids.len()
    );

    Ok(())
}

fn flush_band(
    rows: &[Sequence],
    start_x: i32,
    options: &CompressOptions,
    output: &mut impl Write,
    ids: &mut Vec<String>,
    footer: &mut Vec<FooterEntry>,
) -> Result<()> {
    let tile_columns = options.tile_columns.max(1);
    let tiles = partition_row_band(rows, start_x, tile_columns);

    for tile in &tiles {
        let payload = engine::encode_tile(tile, options.mode, options.level)?;
        output.write_all(&payload)?;

        if tile.is_leftmost() {
            ids.extend(tile.sequences.iter().map(|sequence| sequence.id.clone()));
        }

        footer.push(FooterEntry {
            start_x: tile.start_x,
            start_y: tile.start_y,
            width: tile.width,
            height: tile.height,
            compressed_size: payload.len() as u64,
        });
    }

    Ok(())
}

/// Read back a just-written container's index, for diagnostics and tests.
pub fn reopen_index(read: &mut (impl Read + Seek)) -> Result<ContainerIndex> {
    ContainerIndex::read(read)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn compress_text(text: &str, options: &CompressOptions) -> Vec<u8> {
        let mut output = Cursor::new(Vec::new());
        compress(Cursor::new(text.as_bytes().to_vec()), &mut output, options).unwrap();
        output.into_inner()
    }

    #[test]
    fn compresses_a_tiny_matrix_into_one_tile() {
        let text = "#hdr\nA ..X\nB X..\n/\n";
        let options = CompressOptions { tile_rows: 10, tile_columns: 10, level: 3, mode: Mode::None };

        let mut bytes = compress_text(text, &options);
        let mut cursor = Cursor::new(&mut bytes);
        let index = reopen_index(&mut cursor).unwrap();

        assert_eq!(index.ids, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(index.footer.len(), 1);
        assert_eq!(index.footer[0].width, 2);
        assert_eq!(index.footer[0].height, 3);
        assert_eq!(index.trailer.data_start_pos, "#hdr\n".len() as u64);
    }

    #[test]
    fn tiles_a_matrix_spanning_multiple_bands_and_columns() {
        let text = "ID1 AAAA\nID2 AAAA\nID3 AAAA\n";
        let options = CompressOptions { tile_rows: 2, tile_columns: 2, level: 1, mode: Mode::None };

        let mut bytes = compress_text(text, &options);
        let mut cursor = Cursor::new(&mut bytes);
        let index = reopen_index(&mut cursor).unwrap();

        assert_eq!(index.footer.len(), 4); // 2 row-bands x 2 column-bands
        assert_eq!(index.ids, vec!["ID1".to_string(), "ID2".to_string(), "ID3".to_string()]);
        assert_eq!(index.total_columns(), 4);
    }

    #[test]
    fn recompressing_identical_input_is_deterministic() {
        let text = "#h\nA AA..BB\nB CC..DD\n";
        let options = CompressOptions::default();

        let first = compress_text(text, &options);
        let second = compress_text(text, &options);
        assert_eq!(first, second);
    }
}
