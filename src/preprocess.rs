//! Reversible, gap-specific per-row transforms applied to a tile before
//! entropy coding. Six modes, selected by the caller at compress time and
//! again (independently) at decompress time — the tag is not recorded in
//! the container, see [`Mode`] and the container module's documentation.

use crate::error::{Error, Result};
use crate::sequence::GAP;

/// One of the six preprocessing modes, identified by an integer tag `0..=5`.
///
/// The tag must be supplied again at decompression time; it is never
/// written into the container. A robust format revision would persist it
/// in the header, but this crate reproduces the original tool's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rows are framed and coded as-is.
    None,
    /// Maximal gap-runs are replaced by the preceding symbol plus a decimal run length.
    ReduceA,
    /// Gap-runs are recorded as `(position, length)` pairs alongside the literals.
    ReduceB,
    /// Gap-runs and literal-runs are recorded as an alternating length list.
    ReduceC,
    /// `ReduceA`, case-folding every symbol to lowercase first.
    ReduceALower,
    /// `ReduceA`, case-folding every symbol to uppercase first.
    ReduceAUpper,
}

impl Mode {
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Mode::None),
            1 => Ok(Mode::ReduceA),
            2 => Ok(Mode::ReduceB),
            3 => Ok(Mode::ReduceC),
            4 => Ok(Mode::ReduceALower),
            5 => Ok(Mode::ReduceAUpper),
            other => Err(Error::format(format!("invalid preprocessing tag {}", other))),
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Mode::None => 0,
            Mode::ReduceA => 1,
            Mode::ReduceB => 2,
            Mode::ReduceC => 3,
            Mode::ReduceALower => 4,
            Mode::ReduceAUpper => 5,
        }
    }

    /// Apply this mode's forward transform to one row.
    pub fn forward(self, row: &[u8]) -> Vec<u8> {
        match self {
            Mode::None => row.to_vec(),
            Mode::ReduceA => reduce_a(row),
            Mode::ReduceB => reduce_b(row),
            Mode::ReduceC => reduce_c(row),
            Mode::ReduceALower => reduce_a(&fold_case(row, u8::to_ascii_lowercase)),
            Mode::ReduceAUpper => reduce_a(&fold_case(row, u8::to_ascii_uppercase)),
        }
    }

    /// Invert this mode's transform, reconstructing one row from its framed bytes.
    ///
    /// Case-folding modes lose the original case irreversibly; their inverse
    /// is identical to `ReduceA`'s.
    pub fn inverse(self, framed: &[u8]) -> Vec<u8> {
        match self {
            Mode::None => framed.to_vec(),
            Mode::ReduceA | Mode::ReduceALower | Mode::ReduceAUpper => reduce_a_inverse(framed),
            Mode::ReduceB => reduce_b_inverse(framed),
            Mode::ReduceC => reduce_c_inverse(framed),
        }
    }
}

fn fold_case(row: &[u8], fold: impl Fn(&u8) -> u8) -> Vec<u8> {
    row.iter().map(|b| if *b == GAP { *b } else { fold(b) }).collect()
}

/// Encode each maximal gap-run as the preceding non-gap symbol followed by
/// the decimal ASCII of the run length (omitted when the run is empty). A
/// leading gap run — one with no preceding symbol — is dropped entirely;
/// the inverse cannot and does not reconstruct it.
fn reduce_a(row: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(row.len());
    let mut i = 0;

    while i < row.len() {
        if row[i] == GAP {
            i += 1;
            continue;
        }

        out.push(row[i]);
        i += 1;

        let run_start = i;
        while i < row.len() && row[i] == GAP { i += 1; }
        let run_length = i - run_start;

        if run_length > 0 {
            out.extend_from_slice(run_length.to_string().as_bytes());
        }
    }

    out
}

/// Inverse of [`reduce_a`]: each non-digit byte is a literal symbol; any
/// immediately following ASCII digits form a decimal run length, expanded
/// back into that many gap bytes.
fn reduce_a_inverse(framed: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(framed.len());
    let mut i = 0;

    while i < framed.len() {
        let symbol = framed[i];
        out.push(symbol);
        i += 1;

        let digits_start = i;
        while i < framed.len() && framed[i].is_ascii_digit() { i += 1; }

        if i > digits_start {
            let run_length: usize = std::str::from_utf8(&framed[digits_start .. i])
                .expect("ascii digits are valid utf-8")
                .parse()
                .expect("ascii digits parse as usize");

            out.resize(out.len() + run_length, GAP);
        }
    }

    out
}

/// Emit `positions + "@" + literals`. `positions` is every gap-run recorded
/// as a `p,k,` pair (both fields comma-terminated, including the last),
/// where `p` is the run's start index in the original row and `k` its
/// length; a leading run is recorded with `p = 0`. `literals` is the
/// non-gap bytes, concatenated with no separators.
fn reduce_b(row: &[u8]) -> Vec<u8> {
    let mut positions = Vec::new();
    let mut literals = Vec::new();
    let mut i = 0;

    while i < row.len() {
        if row[i] == GAP {
            let run_start = i;
            while i < row.len() && row[i] == GAP { i += 1; }
            let run_length = i - run_start;

            positions.extend_from_slice(run_start.to_string().as_bytes());
            positions.push(b',');
            positions.extend_from_slice(run_length.to_string().as_bytes());
            positions.push(b',');
        } else {
            literals.push(row[i]);
            i += 1;
        }
    }

    positions.push(b'@');
    positions.extend(literals);
    positions
}

/// Inverse of [`reduce_b`]. Parses the comma-terminated `(p, k)` pairs, then
/// walks an output cursor from `0`: whenever the cursor reaches the next
/// recorded position, it emits that many gap bytes and advances past them;
/// otherwise it copies the next literal byte and advances by one.
fn reduce_b_inverse(framed: &[u8]) -> Vec<u8> {
    let at = framed.iter().position(|&b| b == b'@').unwrap_or(framed.len());
    let positions_str = &framed[.. at];
    let literals = &framed[(at + 1).min(framed.len()) ..];

    let numbers = parse_comma_numbers(positions_str);
    let pairs: Vec<(usize, usize)> = numbers.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();

    let mut out = Vec::new();
    let mut seq_index = 0usize;
    let mut literal_cursor = 0usize;
    let mut pair_index = 0usize;

    loop {
        if pair_index < pairs.len() && seq_index == pairs[pair_index].0 {
            let run_length = pairs[pair_index].1;
            out.resize(out.len() + run_length, GAP);
            seq_index += run_length;
            pair_index += 1;
        } else if literal_cursor < literals.len() {
            out.push(literals[literal_cursor]);
            literal_cursor += 1;
            seq_index += 1;
        } else {
            break;
        }
    }

    out
}

/// Emit `numbers + "@" + literals`, where `numbers` is a comma-*separated*
/// (no trailing comma) list of alternating literal-run and gap-run lengths,
/// starting with a literal-run length (`0` if the row starts with gaps).
fn reduce_c(row: &[u8]) -> Vec<u8> {
    let mut numbers: Vec<usize> = Vec::new();
    let mut literals = Vec::new();
    let mut i = 0;
    let mut expect_literal_run = true;

    while i < row.len() {
        if expect_literal_run {
            let start = i;
            while i < row.len() && row[i] != GAP { i += 1; }
            numbers.push(i - start);
            literals.extend_from_slice(&row[start .. i]);
        } else {
            let start = i;
            while i < row.len() && row[i] == GAP { i += 1; }
            numbers.push(i - start);
        }
        expect_literal_run = !expect_literal_run;
    }

    let mut out = Vec::new();
    for (index, n) in numbers.iter().enumerate() {
        if index > 0 { out.push(b','); }
        out.extend_from_slice(n.to_string().as_bytes());
    }
    out.push(b'@');
    out.extend(literals);
    out
}

/// Inverse of [`reduce_c`]: alternately copies `numbers[0]` literals, then
/// emits `numbers[1]` gaps, then `numbers[2]` literals, and so on.
fn reduce_c_inverse(framed: &[u8]) -> Vec<u8> {
    let at = framed.iter().position(|&b| b == b'@').unwrap_or(framed.len());
    let numbers_str = &framed[.. at];
    let literals = &framed[(at + 1).min(framed.len()) ..];

    let numbers = parse_comma_numbers(numbers_str);

    let mut out = Vec::new();
    let mut literal_cursor = 0usize;

    for (index, &n) in numbers.iter().enumerate() {
        if index % 2 == 0 {
            out.extend_from_slice(&literals[literal_cursor .. literal_cursor + n]);
            literal_cursor += n;
        } else {
            out.resize(out.len() + n, GAP);
        }
    }

    out
}

fn parse_comma_numbers(bytes: &[u8]) -> Vec<usize> {
    bytes.split(|&b| b == b',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            std::str::from_utf8(token).expect("ascii digits are valid utf-8")
                .parse().expect("comma-separated tokens are decimal integers")
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reduce_a_drops_leading_gap_run() {
        assert_eq!(reduce_a(b"..A..B."), b"A2B1");
        assert_eq!(reduce_a_inverse(b"A2B1"), b"A..B.");
    }

    #[test]
    fn reduce_a_all_gaps_emits_nothing() {
        assert_eq!(reduce_a(b"...."), b"");
    }

    #[test]
    fn reduce_a_no_gaps_is_unchanged() {
        assert_eq!(reduce_a(b"ABCD"), b"ABCD");
        assert_eq!(reduce_a_inverse(b"ABCD"), b"ABCD");
    }

    #[test]
    fn reduce_a_round_trips_except_leading_run() {
        let row = b"..AA...B.C....";
        let expanded = reduce_a_inverse(&reduce_a(row));
        assert_eq!(expanded, b"AA...B.C....");
    }

    #[test]
    fn reduce_b_matches_worked_example() {
        assert_eq!(reduce_b(b"..A..B."), b"0,2,3,2,6,1,@AB");
    }

    #[test]
    fn reduce_b_round_trips_exactly() {
        let row: &[u8] = b"..A..B.";
        assert_eq!(reduce_b_inverse(&reduce_b(row)), row);
    }

    #[test]
    fn reduce_b_all_gaps() {
        assert_eq!(reduce_b(b"..."), b"0,3,@");
        assert_eq!(reduce_b_inverse(b"0,3,@"), b"...");
    }

    #[test]
    fn reduce_b_no_gaps() {
        assert_eq!(reduce_b(b"ABCD"), b"@ABCD");
        assert_eq!(reduce_b_inverse(b"@ABCD"), b"ABCD");
    }

    #[test]
    fn reduce_c_matches_worked_example() {
        assert_eq!(reduce_c(b"..A..B."), b"0,2,1,2,1,1@AB");
    }

    #[test]
    fn reduce_c_round_trips_exactly() {
        let row: &[u8] = b"..A..B.";
        assert_eq!(reduce_c_inverse(&reduce_c(row)), row);
    }

    #[test]
    fn reduce_c_all_gaps() {
        assert_eq!(reduce_c(b"...."), b"0,4@");
        assert_eq!(reduce_c_inverse(b"0,4@"), b"....");
    }

    #[test]
    fn reduce_c_no_gaps() {
        assert_eq!(reduce_c(b"ABCD"), b"4@ABCD");
        assert_eq!(reduce_c_inverse(b"4@ABCD"), b"ABCD");
    }

    #[test]
    fn lowercase_variant_folds_case_and_drops_leading_run() {
        let mode = Mode::ReduceALower;
        assert_eq!(mode.forward(b"..AbC..dE."), b"abc2de1");
        assert_eq!(mode.inverse(b"abc2de1"), b"abc..de.");
    }

    #[test]
    fn uppercase_variant_folds_case() {
        let mode = Mode::ReduceAUpper;
        assert_eq!(mode.forward(b"aB..cD"), b"AB2CD");
    }

    #[test]
    fn mode_tag_round_trips() {
        for tag in 0u8 ..= 5 {
            assert_eq!(Mode::from_tag(tag).unwrap().tag(), tag);
        }
        assert!(Mode::from_tag(6).is_err());
    }
}
