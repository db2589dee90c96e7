//! The rectangular unit of independent compression and random access.

use crate::io::*;
use crate::sequence::Sequence;

/// A rectangular sub-matrix of the alignment, the unit the tile engine
/// compresses independently. `startX`/`startY` are row/column offsets into
/// the global matrix; `width`/`height` are row/column counts bounded by the
/// partitioner's A and B parameters.
///
/// Tiles exist only in memory: the partitioner creates them, the writer
/// serializes and discards them, and they are never retained afterwards.
#[derive(Debug, Clone)]
pub struct Tile {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
    pub sequences: Vec<Sequence>,
}

impl Tile {
    /// `startY == 0` marks the leftmost tile of a row-band — the only tile
    /// whose rows contribute their ids to the container's id directory.
    pub fn is_leftmost(&self) -> bool {
        self.start_y == 0
    }
}

/// One entry of the tile footer: the tile's coordinates plus the byte size
/// of its compressed payload. Footer entries are written in the order
/// tiles were produced — row-bands outermost, column-tiles innermost — and
/// read back in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterEntry {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
    pub compressed_size: u64,
}

/// Byte size of one serialized footer entry: four `i32` fields and one `u64`.
pub const FOOTER_ENTRY_SIZE: u64 = 4 * 4 + 8;

impl FooterEntry {
    pub fn write(&self, write: &mut impl Write) -> PassiveResult {
        self.start_x.write(write)?;
        self.start_y.write(write)?;
        self.width.write(write)?;
        self.height.write(write)?;
        self.compressed_size.write(write)?;
        Ok(())
    }

    /// Read one entry, given its already-read `start_x` field (the reader
    /// must peek `start_x` first to check it against the footer's
    /// end-of-section sentinel before reading the rest of the entry).
    pub fn read_rest(start_x: i32, read: &mut impl Read) -> crate::error::Result<Self> {
        Ok(Self {
            start_x,
            start_y: i32::read(read)?,
            width: i32::read(read)?,
            height: i32::read(read)?,
            compressed_size: u64::read(read)?,
        })
    }

    /// Whether this tile's row-band (`[start_x, start_x + width)`) contains
    /// global row `row`.
    pub fn covers_row(&self, row: i32) -> bool {
        self.start_x <= row && row < self.start_x + self.width
    }

    /// Whether this tile's column-band (`[start_y, start_y + height)`)
    /// contains global column `column`.
    pub fn covers_column(&self, column: i32) -> bool {
        self.start_y <= column && column < self.start_y + self.height
    }
}
