

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,

    missing_copy_implementations,
    missing_debug_implementations,
)]

#![deny(
    unused_variables,
    unused_assignments,
    dead_code,
    unused_must_use,
    trivial_numeric_casts,
    redundant_semicolon
)]

#![forbid(unsafe_code)]

//! Tile-based compression of multiple sequence alignment (MSA) files, with
//! selective decompression of a subset of rows (by id) or columns (by
//! index).
//!
//! The pipeline, leaves first: [`preprocess`] applies one of six
//! reversible, gap-aware transforms to a tile's rows; [`codec`] wraps the
//! `zstd` block compressor; [`engine`] frames a tile's rows and hands them
//! to the codec (and reverses that on read); [`partition`] splits a
//! buffered row-band into `A x B` tiles; [`container`] ties it all
//! together into the on-disk format and its three decompression drivers.

pub mod codec;
pub mod container;
pub mod engine;
pub mod error;
pub mod io;
pub mod parse;
pub mod partition;
pub mod preprocess;
pub mod sequence;
pub mod tile;

#[cfg(feature = "cli")]
pub mod cli;

/// Re-exports covering the common compress/decompress entry points.
pub mod prelude {
    pub use crate::container::select::{column_range, decompress_columns, decompress_full, decompress_rows};
    pub use crate::container::writer::{compress, CompressOptions};
    pub use crate::error::{Error, Result};
    pub use crate::preprocess::Mode;
    pub use crate::sequence::Sequence;
}
