//! Splits a buffered row-band into the grid of A x B tiles.

use crate::sequence::Sequence;
use crate::tile::Tile;

/// Partitions `rows`, whose first row is global row `start_x`, into tiles of
/// at most `tile_rows` x `tile_columns`. All rows must have equal length.
///
/// The outer loop runs over column-bands within the single row-band `rows`
/// represents — splitting into row-bands themselves is the caller's job,
/// since the caller is the one buffering rows up to `tile_rows` at a time.
/// Column-tiles within the band shrink only on the last one; the covered
/// range `[0, cols)` is tiled exactly once, without gaps or overlap.
pub fn partition_row_band(rows: &[Sequence], start_x: i32, tile_columns: usize) -> Vec<Tile> {
    if rows.is_empty() {
        return Vec::new();
    }

    let total_columns = rows[0].data.len();
    let width = rows.len() as i32;

    let mut tiles = Vec::with_capacity((total_columns + tile_columns - 1) / tile_columns.max(1));
    let mut start_y = 0;

    while start_y < total_columns {
        let height = tile_columns.min(total_columns - start_y);

        let sequences = rows.iter()
            .map(|row| row.slice_columns(start_y, height))
            .collect();

        tiles.push(Tile {
            start_x,
            start_y: start_y as i32,
            width,
            height: height as i32,
            sequences,
        });

        start_y += height;
    }

    tiles
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(id: &str, data: &str) -> Sequence {
        Sequence::new(id, data.as_bytes().to_vec())
    }

    #[test]
    fn tiles_cover_without_overlap(){
        let rows = vec![
            row("A", "AAAA"),
            row("B", "AAAA"),
            row("C", "AAAA"),
        ];

        let tiles = partition_row_band(&rows, 0, 2);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].start_y, 0);
        assert_eq!(tiles[0].height, 2);
        assert_eq!(tiles[1].start_y, 2);
        assert_eq!(tiles[1].height, 2);

        for tile in &tiles {
            assert_eq!(tile.width, 3);
            assert_eq!(tile.sequences.len(), 3);
        }
    }

    #[test]
    fn last_column_tile_shrinks(){
        let rows = vec![row("A", "AAAAA")];
        let tiles = partition_row_band(&rows, 7, 2);

        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[2].start_y, 4);
        assert_eq!(tiles[2].height, 1);
        assert!(tiles.iter().all(|t| t.start_x == 7));
    }

    #[test]
    fn empty_band_yields_no_tiles(){
        assert!(partition_row_band(&[], 0, 10).is_empty());
    }
}
