//! Command-line surface: argument parsing and dispatch to the library's
//! compress/decompress entry points. Mirrors the original tool's five
//! modes (`Sc`, `Sd`, `Ds`, `Dc`, `Drc`) as `clap` derive subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::codec::clamp_level;
use crate::container::select::{column_range, decompress_columns, decompress_full, decompress_rows};
use crate::container::writer::{compress, CompressOptions};
use crate::error::{Error, Result};
use crate::preprocess::Mode;

/// Default tile row count (`A`).
const DEFAULT_TILE_ROWS: usize = 200_000;
/// Default tile column count (`B`).
const DEFAULT_TILE_COLUMNS: usize = 9_000;
/// Default codec level (`z`).
const DEFAULT_LEVEL: i32 = 13;
/// Default preprocessing tag (`p`).
const DEFAULT_PREPROCESSING: u8 = 1;

#[derive(Debug, Parser)]
#[command(name = "msatile", about = "Tile-based compression of multiple sequence alignment files", version)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode_,
}

#[allow(non_camel_case_types)] // match the original tool's exact mode names
#[derive(Debug, Subcommand)]
pub enum Mode_ {
    /// Compress the file.
    Sc {
        input: PathBuf,
        output: PathBuf,

        /// Tile row count (number of sequences per tile).
        #[arg(short = 'a', default_value_t = DEFAULT_TILE_ROWS, value_parser = parse_tile_dimension)]
        a: usize,

        /// Tile column count (number of alignment columns per tile).
        #[arg(short = 'b', default_value_t = DEFAULT_TILE_COLUMNS, value_parser = parse_tile_dimension)]
        b: usize,

        /// Zstd compression level, clamped to [1, 19].
        #[arg(short = 'z', default_value_t = DEFAULT_LEVEL, value_parser = parse_level)]
        z: i32,

        /// Preprocessing mode, 0..=5.
        #[arg(short = 'p', default_value_t = DEFAULT_PREPROCESSING)]
        p: u8,
    },

    /// Decompress the whole file.
    Sd {
        input: PathBuf,
        output: PathBuf,

        #[arg(short = 'p', default_value_t = DEFAULT_PREPROCESSING)]
        p: u8,
    },

    /// Decompress only the named sequences.
    Ds {
        input: PathBuf,
        output: PathBuf,

        #[arg(short = 'p', default_value_t = DEFAULT_PREPROCESSING)]
        p: u8,

        /// Sequence ids to extract.
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Decompress only the given column indices.
    Dc {
        input: PathBuf,
        output: PathBuf,

        #[arg(short = 'p', default_value_t = DEFAULT_PREPROCESSING)]
        p: u8,

        /// Column indices to extract.
        #[arg(required = true)]
        columns: Vec<i32>,
    },

    /// Decompress an inclusive range of columns.
    Drc {
        input: PathBuf,
        output: PathBuf,

        #[arg(short = 'p', default_value_t = DEFAULT_PREPROCESSING)]
        p: u8,

        start_column: i32,
        stop_column: i32,
    },
}

fn parse_tile_dimension(raw: &str) -> std::result::Result<usize, String> {
    raw.parse::<i64>().map(|value| value.max(1) as usize).map_err(|error| error.to_string())
}

fn parse_level(raw: &str) -> std::result::Result<i32, String> {
    raw.parse::<i32>().map(clamp_level).map_err(|error| error.to_string())
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.mode {
            Mode_::Sc { input, output, a, b, z, p } => {
                let mode = Mode::from_tag(p)?;
                let options = CompressOptions { tile_rows: a, tile_columns: b, level: z, mode };

                let input = std::fs::File::open(&input)?;
                let mut output = std::fs::File::create(&output)?;
                compress(input, &mut output, &options)
            }

            Mode_::Sd { input, output, p } => {
                decompress_full(&input, &output, Mode::from_tag(p)?)
            }

            Mode_::Ds { input, output, p, ids } => {
                decompress_rows(&input, &output, Mode::from_tag(p)?, &ids)
            }

            Mode_::Dc { input, output, p, columns } => {
                decompress_columns(&input, &output, Mode::from_tag(p)?, &columns)
            }

            Mode_::Drc { input, output, p, start_column, stop_column } => {
                if start_column > stop_column {
                    return Err(Error::usage(format!(
                        "start column {} is after stop column {}", start_column, stop_column
                    )));
                }

                let columns = column_range(start_column, stop_column);
                decompress_columns(&input, &output, Mode::from_tag(p)?, &columns)
            }
        }
    }
}

/// Parse `std::env::args_os()`-style arguments and run the selected mode.
pub fn main_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|error| Error::usage(error.to_string()))?;
    cli.run()
}
