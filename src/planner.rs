//! Shortest Code 128 encoding for unmarked data.
//!
//! Implements the GS1-128 guidelines for minimizing symbol length: runs of
//! four or more digits go to subset C, the rest is written in A or B with
//! either a one-character `SHIFT` or a full change code whenever a character
//! from the other subset shows up.
//!
//! For the purpose of choosing subset C, an FNC1 counts as a digit pair.
use crate::charset::{classify, Class, Subset, CODEC, FNC1, SHIFT};

/// A piece of the data as split by [`extract_codec`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Block<'a> {
    /// Digit pairs and FNC1s, encoded in subset C.
    Numeric(&'a [u8]),
    /// Anything else, encoded in A and B.
    Mixed(&'a [u8]),
}

impl<'a> Block<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Block::Numeric(data) | Block::Mixed(data) => data,
        }
    }
}

/// Splits `data` into alternating numeric and mixed blocks.
///
/// A numeric block holds at least two pairs, a pair being two digits or one
/// FNC1. At the very start the run is taken from the first byte, leaving an
/// odd last digit to the following block; anywhere else the run must end
/// before a non-digit, leaving an odd first digit to the preceding block.
/// Data made of exactly two digits is a numeric block too.
///
/// ```rust
/// use barust::planner::{extract_codec, Block};
///
/// let blocks = extract_codec(b"12345abc6789");
/// assert_eq!(blocks, [Block::Numeric(b"1234"), Block::Mixed(b"5abc"), Block::Numeric(b"6789")]);
/// ```
pub fn extract_codec(data: &[u8]) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut mixed_start = 0;
    let mut pos = 0;

    if let Some(end) = leading_run(data) {
        blocks.push(Block::Numeric(&data[..end]));
        mixed_start = end;
        pos = end;
    }
    while pos < data.len() {
        match run_at(data, pos) {
            Some(end) => {
                if mixed_start < pos {
                    blocks.push(Block::Mixed(&data[mixed_start..pos]));
                }
                blocks.push(Block::Numeric(&data[pos..end]));
                mixed_start = end;
                pos = end;
            }
            None => pos += 1,
        }
    }
    if mixed_start < data.len() {
        blocks.push(Block::Mixed(&data[mixed_start..]));
    }
    blocks
}

/// Length of the pair at the front of `data`.
fn pair_len(data: &[u8]) -> Option<usize> {
    match data {
        [FNC1, ..] => Some(1),
        [hi, lo, ..] if hi.is_ascii_digit() && lo.is_ascii_digit() => Some(2),
        _ => None,
    }
}

/// End offsets of the consecutive pairs at the front of `data`.
fn pair_ends(data: &[u8]) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut pos = 0;
    while let Some(len) = pair_len(&data[pos..]) {
        pos += len;
        ends.push(pos);
    }
    ends
}

fn leading_run(data: &[u8]) -> Option<usize> {
    if data.len() == 2 && data.iter().all(u8::is_ascii_digit) {
        return Some(2);
    }
    let ends = pair_ends(data);
    match ends[..] {
        [_, .., end] => Some(end),
        _ => None,
    }
}

/// End of the longest run starting at `start` that has two or more pairs and
/// is not followed by a digit.
fn run_at(data: &[u8], start: usize) -> Option<usize> {
    pair_ends(&data[start..])
        .into_iter()
        .skip(1)
        .rev()
        .map(|end| start + end)
        .find(|&end| !data.get(end).is_some_and(u8::is_ascii_digit))
}

/// The subset a unit forces, if it is not encodable in both A and B.
fn exclusive_subset(unit: u8) -> Option<Subset> {
    match classify(unit) {
        Some(Class::SymbologyElement) => Some(Subset::A),
        Some(Class::Lowercase) => Some(Subset::B),
        _ => None,
    }
}

/// The subset of the first unit in `data` that only A or only B can encode.
fn next_exclusive(data: &[u8]) -> Option<Subset> {
    data.iter().find_map(|&unit| exclusive_subset(unit))
}

/// Writes a mixed block to `out`, preceded by the change code of its
/// starting subset.
fn encode_mixed(text: &[u8], out: &mut Vec<u8>) {
    // A when a symbology element comes before any lowercase character.
    let mut current = next_exclusive(text).unwrap_or(Subset::B);
    out.push(current.change_code());

    for (i, &unit) in text.iter().enumerate() {
        if let Some(other) = exclusive_subset(unit).filter(|&other| other != current) {
            if next_exclusive(&text[i + 1..]) == Some(current) {
                tracing::trace!(at = i, %other, "shifting one character");
                out.push(SHIFT);
            } else {
                tracing::trace!(at = i, from = %current, to = %other, "changing subset");
                out.push(other.change_code());
                current = other;
            }
        }
        out.push(unit);
    }
}

/// Interleaves `data` with the change codes and shifts giving the shortest
/// symbol. The result always starts with the change code of the start subset.
///
/// ```rust
/// use barust::charset::{CODEB, CODEC};
/// use barust::planner::apply_shortest_encoding;
///
/// let mut expected = vec![CODEC];
/// expected.extend_from_slice(b"123456");
/// expected.push(CODEB);
/// expected.extend_from_slice(b"abcdef");
/// assert_eq!(apply_shortest_encoding(b"123456abcdef"), expected);
/// ```
pub fn apply_shortest_encoding(data: &[u8]) -> Vec<u8> {
    let blocks = extract_codec(data);
    tracing::trace!(blocks = blocks.len(), "partitioned data into numeric and mixed blocks");

    let mut marked = Vec::with_capacity(data.len() + blocks.len());
    for block in blocks {
        match block {
            Block::Numeric(digits) => {
                marked.push(CODEC);
                marked.extend_from_slice(digits);
            }
            Block::Mixed(text) => encode_mixed(text, &mut marked),
        }
    }
    marked
}

/// Runs [`apply_shortest_encoding`] and splits off the leading change code,
/// returning the start subset and the remaining marked-up data.
pub fn determine_best_subset(data: &[u8]) -> (Subset, Vec<u8>) {
    let mut marked = apply_shortest_encoding(data);
    match marked.first().copied().and_then(Subset::from_change_code) {
        Some(subset) => {
            marked.remove(0);
            (subset, marked)
        }
        None => (Subset::B, marked),
    }
}
