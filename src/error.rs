use crate::charset::Subset;

/// Errors raised while building or encoding a Code 128 symbol.
///
/// Construction errors (`EmptyData`, `UnknownSubset`, `MissingChangeCode`,
/// `UnsupportedInSubset`, `MarkerInData`) are returned immediately. Data that merely does not
/// belong to its declared subset is accepted and reported by
/// [`Segment::is_valid`](crate::code128::Segment::is_valid); only encoding such
/// a chain fails, with `Unencodable`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A symbol must encode at least one character.
    #[error("data must contain at least one character")]
    EmptyData,

    /// The subset identifier is not one of A, B or C.
    #[error("unknown subset {0:?}, expected one of A, B or C")]
    UnknownSubset(String),

    /// Extra data assigned directly must begin with a subset change code.
    #[error("extra data must start with a subset change code, found {0:#04x}")]
    MissingChangeCode(u8),

    /// The unit has no representation at all in the subset (e.g. FNC2 in C).
    #[error("{unit:#04x} cannot appear in subset {subset}")]
    UnsupportedInSubset { subset: Subset, unit: u8 },

    /// Automatic subset selection got data that already carries a change code
    /// or `SHIFT`.
    #[error("{0:#04x} is a change code or shift, which only marked-up data may contain")]
    MarkerInData(u8),

    /// A character of an invalid chain has no symbol value in its subset.
    #[error("character {character:?} has no symbol value in subset {subset}")]
    Unencodable { subset: Subset, character: Vec<u8> },
}

pub type Result<T> = std::result::Result<T, Error>;
