//! Decompression drivers: full materialization and the two selective
//! variants (by row id, by column index), all sharing the same two-pass
//! strategy — lay out a padded text skeleton, then patch tile cells into it
//! in place — because tiles arrive in row-band-then-column-band order,
//! unsuitable for sequential text output.

use std::collections::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::container::ContainerIndex;
use crate::engine;
use crate::error::Result;
use crate::preprocess::Mode;

/// Which rows/columns a decompression run should materialize.
#[derive(Debug, Clone)]
enum Selection {
    All,
    Rows(HashSet<String>),
    Columns(Vec<i32>),
}

/// Minimum id column width: the id, one space, then padding to 25 bytes
/// unless the id is already that long or longer.
const ID_PAD_WIDTH: usize = 25;

/// Decompress the whole container.
pub fn decompress_full(input_path: &Path, output_path: &Path, mode: Mode) -> Result<()> {
    run(input_path, output_path, mode, Selection::All)
}

/// Decompress only the rows whose id is in `ids`.
pub fn decompress_rows(input_path: &Path, output_path: &Path, mode: Mode, ids: &[String]) -> Result<()> {
    run(input_path, output_path, mode, Selection::Rows(ids.iter().cloned().collect()))
}

/// Decompress only the given column indices, in the order given — that
/// order determines each column's position in the output rows.
pub fn decompress_columns(input_path: &Path, output_path: &Path, mode: Mode, columns: &[i32]) -> Result<()> {
    run(input_path, output_path, mode, Selection::Columns(columns.to_vec()))
}

/// Expand an inclusive `[start, stop]` range into the column list `Drc` wants.
pub fn column_range(start: i32, stop: i32) -> Vec<i32> {
    (start ..= stop).collect()
}

fn run(input_path: &Path, output_path: &Path, mode: Mode, selection: Selection) -> Result<()> {
    let index = {
        let mut input = File::open(input_path)?;
        ContainerIndex::read(&mut input)?
    };

    let total_columns = index.total_columns();
    let row_width = match &selection {
        Selection::Columns(columns) => columns.len() as i32,
        Selection::All | Selection::Rows(_) => total_columns,
    };

    let relevant_tiles = relevant_tile_indices(&index, &selection);
    log::info!(
        "decompressing {}/{} tile(s) for this selection",
        relevant_tiles.len(), index.footer.len()
    );

    let row_offsets = write_skeleton(input_path, output_path, &index, &selection, row_width)?;
    patch_tiles(input_path, output_path, &index, mode, &selection, &relevant_tiles, row_offsets)
}

fn relevant_tile_indices(index: &ContainerIndex, selection: &Selection) -> HashSet<usize> {
    match selection {
        Selection::All => (0 .. index.footer.len()).collect(),

        Selection::Rows(chosen) => {
            let chosen_rows: Vec<i32> = index.ids.iter().enumerate()
                .filter(|(_, id)| chosen.contains(*id))
                .map(|(row, _)| row as i32)
                .collect();

            index.footer.iter().enumerate()
                .filter(|(_, entry)| chosen_rows.iter().any(|&row| entry.covers_row(row)))
                .map(|(tile_index, _)| tile_index)
                .collect()
        }

        Selection::Columns(columns) => {
            index.footer.iter().enumerate()
                .filter(|(_, entry)| columns.iter().any(|&column| entry.covers_column(column)))
                .map(|(tile_index, _)| tile_index)
                .collect()
        }
    }
}

/// Phase 1: write headers verbatim, then one fixed-width, space-padded
/// line per included row, recording each row id's data-start offset.
fn write_skeleton(
    input_path: &Path,
    output_path: &Path,
    index: &ContainerIndex,
    selection: &Selection,
    row_width: i32,
) -> Result<HashMap<String, u64>> {
    let mut input = File::open(input_path)?;
    let mut output = File::create(output_path)?;

    let mut header_bytes = vec![0u8; index.trailer.data_start_pos as usize];
    input.read_exact(&mut header_bytes)?;
    output.write_all(&header_bytes)?;

    let mut row_offsets = HashMap::new();

    for id in &index.ids {
        let include = match selection {
            Selection::All | Selection::Columns(_) => true,
            Selection::Rows(chosen) => chosen.contains(id),
        };

        if !include {
            continue;
        }

        output.write_all(id.as_bytes())?;
        output.write_all(b" ")?;
        if id.len() < ID_PAD_WIDTH {
            output.write_all(&vec![b' '; ID_PAD_WIDTH - id.len()])?;
        }

        let offset = output.stream_position()?;
        row_offsets.insert(id.clone(), offset);

        output.write_all(&vec![b' '; row_width.max(0) as usize])?;
        output.write_all(b"\n")?;
    }

    Ok(row_offsets)
}

/// Phase 2: reopen both files, walk the footer in order, and for each
/// relevant tile, inverse-preprocess and patch its cells into the
/// skeleton; irrelevant tiles are skipped over without decoding.
fn patch_tiles(
    input_path: &Path,
    output_path: &Path,
    index: &ContainerIndex,
    mode: Mode,
    selection: &Selection,
    relevant_tiles: &HashSet<usize>,
    mut row_offsets: HashMap<String, u64>,
) -> Result<()> {
    let mut input = File::open(input_path)?;
    input.seek(SeekFrom::Start(index.trailer.data_start_pos))?;

    let mut output = OpenOptions::new().read(true).write(true).open(output_path)?;

    let column_positions: HashMap<i32, usize> = match selection {
        Selection::Columns(columns) => columns.iter().enumerate().map(|(position, &column)| (column, position)).collect(),
        Selection::All | Selection::Rows(_) => HashMap::new(),
    };

    for (tile_index, entry) in index.footer.iter().enumerate() {
        if !relevant_tiles.contains(&tile_index) {
            input.seek(SeekFrom::Current(entry.compressed_size as i64))?;
            continue;
        }

        let mut payload = vec![0u8; entry.compressed_size as usize];
        input.read_exact(&mut payload)?;

        let rows = engine::decode_tile(&payload, entry.start_x, entry.width, entry.height, &index.ids, mode)?;

        for row in rows {
            match selection {
                Selection::All => {
                    if let Some(offset) = row_offsets.get(&row.id).copied() {
                        output.seek(SeekFrom::Start(offset))?;
                        output.write_all(&row.data)?;
                        row_offsets.insert(row.id, offset + row.data.len() as u64);
                    }
                }

                Selection::Rows(chosen) => {
                    if chosen.contains(&row.id) {
                        if let Some(offset) = row_offsets.get(&row.id).copied() {
                            output.seek(SeekFrom::Start(offset))?;
                            output.write_all(&row.data)?;
                            row_offsets.insert(row.id, offset + row.data.len() as u64);
                        }
                    }
                }

                Selection::Columns(columns) => {
                    if let Some(&row_start) = row_offsets.get(&row.id) {
                        for &column in columns {
                            if !entry.covers_column(column) {
                                continue;
                            }

                            let local = (column - entry.start_y) as usize;
                            if let Some(&byte) = row.data.get(local) {
                                let position = column_positions[&column] as u64;
                                output.seek(SeekFrom::Start(row_start + position))?;
                                output.write_all(&[byte])?;
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::container::writer::{compress, CompressOptions};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn write_container(dir: &Path, text: &str, options: &CompressOptions) -> std::path::PathBuf {
        let path = dir.join("container.msatile");
        let mut output = Cursor::new(Vec::new());
        compress(Cursor::new(text.as_bytes().to_vec()), &mut output, options).unwrap();
        std::fs::write(&path, output.into_inner()).unwrap();
        path
    }

    #[test]
    fn full_round_trip_with_no_preprocessing() {
        let dir = tempdir().unwrap();
        let text = "ID1 AAAA\nID2 BBBB\nID3 CCCC\n";
        let options = CompressOptions { tile_rows: 2, tile_columns: 2, level: 1, mode: Mode::None };
        let container = write_container(dir.path(), text, &options);

        let output_path = dir.path().join("out.txt");
        decompress_full(&container, &output_path, Mode::None).unwrap();

        let restored = std::fs::read_to_string(&output_path).unwrap();
        assert!(restored.contains("ID1"));
        assert!(restored.lines().any(|line| line.trim_end().ends_with("AAAA")));
        assert!(restored.lines().any(|line| line.trim_end().ends_with("BBBB")));
        assert!(restored.lines().any(|line| line.trim_end().ends_with("CCCC")));
    }

    #[test]
    fn row_selective_matches_full_for_chosen_ids() {
        let dir = tempdir().unwrap();
        let text = "ID1 AAAA..\nID2 BBBB..\nID3 CCCC..\n";
        let options = CompressOptions { tile_rows: 2, tile_columns: 3, level: 1, mode: Mode::None };
        let container = write_container(dir.path(), text, &options);

        let output_path = dir.path().join("rows.txt");
        decompress_rows(&container, &output_path, Mode::None, &["ID2".to_string()]).unwrap();

        let restored = std::fs::read_to_string(&output_path).unwrap();
        assert!(restored.contains("ID2"));
        assert!(!restored.contains("ID1"));
        assert!(!restored.contains("ID3"));
        assert!(restored.lines().any(|line| line.trim_end().ends_with("BBBB..")));
    }

    #[test]
    fn column_selective_extracts_chosen_cells() {
        let dir = tempdir().unwrap();
        let text = "ID1 ABCD\nID2 EFGH\n";
        let options = CompressOptions { tile_rows: 10, tile_columns: 10, level: 1, mode: Mode::None };
        let container = write_container(dir.path(), text, &options);

        let output_path = dir.path().join("cols.txt");
        decompress_columns(&container, &output_path, Mode::None, &[0, 3]).unwrap();

        let restored = std::fs::read_to_string(&output_path).unwrap();
        let mut lines = restored.lines();
        assert!(lines.next().unwrap().trim_end().ends_with("AD"));
        assert!(lines.next().unwrap().trim_end().ends_with("EH"));
    }

    #[test]
    fn column_range_is_contiguous_inclusive() {
        assert_eq!(column_range(2, 5), vec![2, 3, 4, 5]);
    }
}
