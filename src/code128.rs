//! Code 128 symbols built from chained segments.
//!
//! A symbol is a [`Segment`] holding the data of one subset, optionally followed
//! by further segments in other subsets. The chain is written in a single byte
//! string by putting a change code (`CODEA`, `CODEB` or `CODEC`) in front of each
//! continuation, e.g. `b"ABC123\xC6def\xC74567"` starts in subset A, continues
//! in B with `def` and ends in C with `4567`.
use core::fmt;
use core::ops::{Deref, DerefMut};
use std::cell::OnceCell;

use crate::charset::{self, Subset, SHIFT, STOP_ENCODING};
use crate::error::{Error, Result};
use crate::planner;

/// One run of data encoded in a single subset, plus the rest of the chain.
///
/// # Example
///
/// ```rust
/// use barust::charset::Subset;
/// use barust::code128::Segment;
///
/// let segment = Segment::new(Subset::C, "123456").unwrap();
/// assert_eq!(segment.checksum().unwrap(), 44);
/// assert_eq!(segment.characters(), [&b"12"[..], b"34", b"56"]);
/// ```
#[derive(Clone, Debug)]
pub struct Segment {
    subset: Subset,

    /// Data of this segment only. May contain function characters and `SHIFT`,
    /// never a change code.
    data: Vec<u8>,

    extra: Option<Box<Segment>>,

    /// Memoized encoding of the chain from this segment on. Cleared by every
    /// method taking `&mut self`.
    encoding: OnceCell<String>,
}

impl Segment {
    /// Creates a segment of `subset` from `data`.
    ///
    /// Everything from the first change code on becomes the chained `extra`.
    /// Data that does not belong to `subset` is accepted and only makes
    /// [`is_valid`](Self::is_valid) return `false`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyData`] if there is nothing to encode.
    /// - [`Error::UnsupportedInSubset`] for a function character or `SHIFT` that
    ///   subset C cannot hold.
    pub fn new(subset: Subset, data: impl AsRef<[u8]>) -> Result<Self> {
        let mut segment = Segment {
            subset,
            data: Vec::new(),
            extra: None,
            encoding: OnceCell::new(),
        };
        segment.set_data(data)?;
        Ok(segment)
    }

    /// Parses a continuation string, which must start with a change code.
    fn parse_extra(data: &[u8]) -> Result<Self> {
        let (&code, rest) = data.split_first().ok_or(Error::EmptyData)?;
        let subset = Subset::from_change_code(code).ok_or(Error::MissingChangeCode(code))?;
        Segment::new(subset, rest)
    }

    pub fn subset(&self) -> Subset {
        self.subset
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces this segment's data.
    ///
    /// A change code inside `data` splits it the same way as [`new`](Self::new)
    /// does and replaces the current `extra`. Without one the current `extra`
    /// is kept. On error the segment is left untouched.
    pub fn set_data(&mut self, data: impl AsRef<[u8]>) -> Result<()> {
        let data = data.as_ref();
        let split = data.iter().position(|&unit| Subset::from_change_code(unit).is_some());
        let (own, rest) = data.split_at(split.unwrap_or(data.len()));
        if own.is_empty() && rest.is_empty() {
            return Err(Error::EmptyData);
        }
        let unsupported = own
            .iter()
            .find(|&&unit| charset::is_function(unit) && !self.subset.encodes(unit));
        if let Some(&unit) = unsupported {
            return Err(Error::UnsupportedInSubset { subset: self.subset, unit });
        }
        let extra = if rest.is_empty() {
            None
        } else {
            Some(Box::new(Segment::parse_extra(rest)?))
        };

        self.data = own.to_vec();
        if extra.is_some() {
            self.extra = extra;
        }
        self.encoding.take();
        Ok(())
    }

    pub fn extra(&self) -> Option<&Segment> {
        self.extra.as_deref()
    }

    /// Mutable access to the next segment.
    ///
    /// Any change below this segment goes through here, so the cached
    /// encoding is dropped up front.
    pub fn extra_mut(&mut self) -> Option<&mut Segment> {
        self.encoding.take();
        self.extra.as_deref_mut()
    }

    /// Replaces the rest of the chain with the segments parsed from `extra`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingChangeCode`] if `extra` does not start with a change code.
    pub fn set_extra(&mut self, extra: impl AsRef<[u8]>) -> Result<()> {
        let extra = Segment::parse_extra(extra.as_ref())?;
        self.extra = Some(Box::new(extra));
        self.encoding.take();
        Ok(())
    }

    /// Detaches and returns the rest of the chain.
    pub fn remove_extra(&mut self) -> Option<Segment> {
        self.encoding.take();
        self.extra.take().map(|extra| *extra)
    }

    /// This segment followed by every segment chained after it.
    pub fn chain(&self) -> impl Iterator<Item = &Segment> {
        core::iter::successors(Some(self), |segment| segment.extra())
    }

    /// Splits this segment's data into symbol characters.
    ///
    /// Digits in subset C are paired; an unpaired digit at the end is returned
    /// on its own. Every other unit, including function characters and
    /// `SHIFT`, is a character by itself.
    pub fn characters(&self) -> Vec<&[u8]> {
        if self.subset != Subset::C {
            return self.data.chunks(1).collect();
        }
        let mut characters = Vec::new();
        let mut rest = &self.data[..];
        while let Some(&unit) = rest.first() {
            let len = if unit.is_ascii_digit() { rest.len().min(2) } else { 1 };
            let (character, tail) = rest.split_at(len);
            characters.push(character);
            rest = tail;
        }
        characters
    }

    /// Symbol values of this segment's own characters.
    ///
    /// Every unit must be a member of its subset first; the character following
    /// a `SHIFT` is checked and valued in the other of A and B.
    pub fn values(&self) -> Result<Vec<u8>> {
        let mut values = Vec::with_capacity(self.data.len());
        let mut shifted = false;
        for character in self.characters() {
            let subset = match self.subset.shifted() {
                Some(other) if shifted => other,
                _ => self.subset,
            };
            let value = character
                .iter()
                .all(|&unit| subset.encodes(unit))
                .then(|| subset.value_of(character))
                .flatten()
                .ok_or_else(|| Error::Unencodable {
                    subset,
                    character: character.to_vec(),
                })?;
            shifted = !shifted && matches!(character, [SHIFT]);
            values.push(value);
        }
        Ok(values)
    }

    /// Symbol values of the whole chain, change codes included, without the
    /// start character.
    fn full_values(&self) -> Result<Vec<u8>> {
        let mut values = Vec::new();
        let mut previous: Option<Subset> = None;
        for segment in self.chain() {
            if let Some(previous) = previous {
                let code = [segment.subset.change_code()];
                let value = previous.value_of(&code).ok_or_else(|| Error::Unencodable {
                    subset: previous,
                    character: code.to_vec(),
                })?;
                values.push(value);
            }
            values.extend(segment.values()?);
            previous = Some(segment.subset);
        }
        Ok(values)
    }

    /// Data of the whole chain without change codes and shifts.
    pub fn full_data(&self) -> Vec<u8> {
        self.chain()
            .flat_map(|segment| segment.data.iter().copied())
            .filter(|&unit| !charset::is_marker(unit))
            .collect()
    }

    /// Data of the whole chain with every change code and shift in place.
    ///
    /// Parsing the result with this segment's subset rebuilds the same chain.
    pub fn full_data_with_change_codes(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        for segment in self.chain().skip(1) {
            data.push(segment.subset.change_code());
            data.extend_from_slice(&segment.data);
        }
        data
    }

    /// Checks that every character of the chain has a symbol value in its
    /// subset and that no segment ends on a dangling `SHIFT`.
    pub fn is_valid(&self) -> bool {
        self.chain().all(|segment| segment.data.last() != Some(&SHIFT))
            && self.full_values().is_ok()
    }

    /// Modulo 103 checksum over the start character and the whole chain.
    pub fn checksum(&self) -> Result<u8> {
        Ok(checksum_of(self.subset, &self.full_values()?))
    }

    pub fn start_encoding(&self) -> &'static str {
        charset::pattern(self.subset.start_value())
    }

    /// Bars of this segment's own characters.
    pub fn data_encoding(&self) -> Result<String> {
        Ok(bars(&self.values()?))
    }

    /// Bars of everything chained after this segment, change codes included.
    /// Empty when there is no extra.
    pub fn extra_encoding(&self) -> Result<String> {
        let own = self.values()?.len();
        Ok(bars(&self.full_values()?[own..]))
    }

    pub fn checksum_encoding(&self) -> Result<&'static str> {
        Ok(charset::pattern(self.checksum()?))
    }

    pub fn stop_encoding(&self) -> &'static str {
        STOP_ENCODING
    }

    /// The complete bar/space pattern, one `'0'`/`'1'` per module: start,
    /// data of the whole chain, checksum, stop.
    ///
    /// # Errors
    ///
    /// [`Error::Unencodable`] if a character has no symbol value, see
    /// [`is_valid`](Self::is_valid).
    pub fn encoding(&self) -> Result<&str> {
        if let Some(encoding) = self.encoding.get() {
            return Ok(encoding.as_str());
        }
        let values = self.full_values()?;
        let checksum = checksum_of(self.subset, &values);

        let mut encoding = String::with_capacity((values.len() + 2) * 11 + STOP_ENCODING.len());
        encoding.push_str(self.start_encoding());
        encoding.push_str(&bars(&values));
        encoding.push_str(charset::pattern(checksum));
        encoding.push_str(STOP_ENCODING);
        Ok(self.encoding.get_or_init(|| encoding).as_str())
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Segment) -> bool {
        self.subset == other.subset && self.data == other.data && self.extra == other.extra
    }
}

impl Eq for Segment {}

/// Shows the full data, function characters as their byte value in Latin-1.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.full_data().into_iter().try_for_each(|unit| write!(f, "{}", char::from(unit)))
    }
}

fn checksum_of(start: Subset, values: &[u8]) -> u8 {
    let sum = values
        .iter()
        .zip(1usize..)
        .fold(usize::from(start.start_value()), |sum, (&value, position)| {
            (sum + usize::from(value) * position) % 103
        });
    sum as u8
}

fn bars(values: &[u8]) -> String {
    values.iter().map(|&value| charset::pattern(value)).collect()
}

/// A Code 128 symbol.
///
/// Without an explicit subset the data is split into the shortest mix of
/// subsets, shifts and change codes following the GS1-128 guidelines.
///
/// # Example
///
/// ```rust
/// use barust::code128::Code128;
/// use barust::charset::Subset;
///
/// let code = Code128::new("123456QWERTY\r\n\tAAbbcc12XX34567").unwrap();
/// assert_eq!(code.subset(), Subset::C);
/// assert!(code.is_valid());
///
/// let code = Code128::with_type("ABC123", "a").unwrap();
/// assert_eq!(code.checksum().unwrap(), 66);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code128 {
    symbol: Segment,
}

impl Code128 {
    /// Encodes `data`, picking subsets automatically.
    ///
    /// `data` is plain content: function characters may appear, but change
    /// codes and `SHIFT` are placed by the planner only. Use
    /// [`with_subset`](Self::with_subset) for data that already carries them.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyData`] if there is nothing to encode.
    /// - [`Error::MarkerInData`] if `data` contains a change code or `SHIFT`.
    pub fn new(data: impl AsRef<[u8]>) -> Result<Self> {
        let data = data.as_ref();
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        if let Some(&unit) = data.iter().find(|&&unit| charset::is_marker(unit)) {
            return Err(Error::MarkerInData(unit));
        }
        let (subset, marked) = planner::determine_best_subset(data);
        tracing::debug!(%subset, len = data.len(), "selected start subset");
        Ok(Code128 { symbol: Segment::new(subset, marked)? })
    }

    /// Encodes `data` starting in `subset`, change codes in `data` included.
    /// No planning takes place.
    pub fn with_subset(data: impl AsRef<[u8]>, subset: Subset) -> Result<Self> {
        Ok(Code128 { symbol: Segment::new(subset, data)? })
    }

    /// Like [`with_subset`](Self::with_subset) with a one-letter subset name,
    /// e.g. `"A"` or `"c"`.
    pub fn with_type(data: impl AsRef<[u8]>, subset: &str) -> Result<Self> {
        Self::with_subset(data, subset.parse()?)
    }

    pub fn into_segment(self) -> Segment {
        self.symbol
    }
}

impl Deref for Code128 {
    type Target = Segment;

    fn deref(&self) -> &Segment {
        &self.symbol
    }
}

impl DerefMut for Code128 {
    fn deref_mut(&mut self) -> &mut Segment {
        &mut self.symbol
    }
}

impl fmt::Display for Code128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.symbol, f)
    }
}
