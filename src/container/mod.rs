//! The compressed container: trailer, tile footer, and id directory, plus
//! the reader/writer drivers built on top of them.
//!
//! ```text
//! [header-lines] [tile payloads] [id directory] [tile footer] [trailer]
//! ```
//!
//! See [`writer::compress`] for the write side and [`select`] for the three
//! decompression drivers (full, row-selective, column-selective).

pub mod select;
pub mod writer;

use crate::error::{Error, Result};
use crate::io::{Data, Read, Seek, SeekFrom};
use crate::tile::FooterEntry;

/// Byte size of the trailer: three little-endian `u64` offsets.
pub const TRAILER_SIZE: u64 = 3 * 8;

/// The last 24 bytes of the file: three absolute byte offsets locating the
/// start of the tile payload region, the id directory, and the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    pub data_start_pos: u64,
    pub sequence_ids_start_pos: u64,
    pub footer_start_pos: u64,
}

impl Trailer {
    pub fn read(read: &mut (impl Read + Seek)) -> Result<Self> {
        read.seek(SeekFrom::End(-(TRAILER_SIZE as i64)))?;

        Ok(Self {
            data_start_pos: u64::read(read)?,
            sequence_ids_start_pos: u64::read(read)?,
            footer_start_pos: u64::read(read)?,
        })
    }

    pub fn write(&self, write: &mut impl crate::io::Write) -> crate::error::PassiveResult {
        self.data_start_pos.write(write)?;
        self.sequence_ids_start_pos.write(write)?;
        self.footer_start_pos.write(write)?;
        Ok(())
    }
}

/// The footer and id directory, read once and held in memory for the
/// duration of a decompression — both are private accumulators with no
/// shared ownership, matching the original's in-process state.
#[derive(Debug, Clone)]
pub struct ContainerIndex {
    pub trailer: Trailer,
    pub footer: Vec<FooterEntry>,
    pub ids: Vec<String>,
}

impl ContainerIndex {
    /// Read the trailer, footer, and id directory from a seekable source.
    /// Three seeks, no back-tracking within a phase: trailer, then footer
    /// (end-detected via the `dataStartPos` sentinel), then the directory.
    pub fn read(read: &mut (impl Read + Seek)) -> Result<Self> {
        let trailer = Trailer::read(read)?;
        let footer = read_footer(read, &trailer)?;
        let ids = read_ids(read, &trailer)?;

        if ids.len() != footer.iter().filter(|entry| entry.start_y == 0).map(|e| e.width as usize).sum::<usize>() {
            return Err(Error::format("id directory length disagrees with the footer's row count"));
        }

        Ok(Self { trailer, footer, ids })
    }

    /// Sum of the `height` of every row-band-0 tile — the total column count.
    pub fn total_columns(&self) -> i32 {
        self.footer.iter().filter(|entry| entry.start_x == 0).map(|entry| entry.height).sum()
    }
}

fn read_footer(read: &mut (impl Read + Seek), trailer: &Trailer) -> Result<Vec<FooterEntry>> {
    read.seek(SeekFrom::Start(trailer.footer_start_pos))?;

    let mut entries = Vec::new();
    loop {
        let start_x = i32::read(read)?;

        // The footer carries no length field; the first field that equals
        // dataStartPos has overrun into the trailer itself (spec §9 O2).
        if start_x as i64 == trailer.data_start_pos as i64 {
            break;
        }

        entries.push(FooterEntry::read_rest(start_x, read)?);
    }

    Ok(entries)
}

fn read_ids(read: &mut (impl Read + Seek), trailer: &Trailer) -> Result<Vec<String>> {
    read.seek(SeekFrom::Start(trailer.sequence_ids_start_pos))?;

    let mut ids = Vec::new();
    while read.stream_position()? < trailer.footer_start_pos {
        let length = u16::read(read)? as usize;
        let mut bytes = vec![0u8; length];
        read.read_exact(&mut bytes)?;
        ids.push(String::from_utf8(bytes).map_err(|error| Error::format(error.to_string()))?);
    }

    Ok(ids)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn trailer_round_trips() {
        let mut buffer = Vec::new();
        let trailer = Trailer { data_start_pos: 5, sequence_ids_start_pos: 100, footer_start_pos: 200 };
        trailer.write(&mut buffer).unwrap();

        // pad so End(-24) lands on the trailer we just wrote
        let mut cursor = Cursor::new(buffer);
        let read_back = Trailer::read(&mut cursor).unwrap();
        assert_eq!(read_back, trailer);
    }
}
