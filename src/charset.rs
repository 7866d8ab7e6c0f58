//! Code 128 character sets and bar patterns.
//!
//! Data is handled as raw bytes. ASCII 0 to 127 are ordinary characters; the
//! function characters and in-stream control codes live on otherwise unused
//! byte values so they can travel inside the same buffer as the data.
use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

pub const FNC1: u8 = 0xC1;
pub const FNC2: u8 = 0xC2;
pub const FNC3: u8 = 0xC3;
pub const FNC4: u8 = 0xC4;
/// Change to subset A.
pub const CODEA: u8 = 0xC5;
/// Change to subset B.
pub const CODEB: u8 = 0xC6;
/// Change to subset C.
pub const CODEC: u8 = 0xC7;
/// Encode the next character in the other of A/B without changing subset.
pub const SHIFT: u8 = 0xC8;

pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;
pub const STOP: u8 = 106;

/// Bar pattern of the stop character, including the two-module termination bar.
pub const STOP_ENCODING: &str = "1100011101011";

/// One of the three Code 128 character subsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Subset {
    /// ASCII 0-95: uppercase, digits, punctuation and control characters.
    A,
    /// ASCII 32-127: uppercase, lowercase, digits and punctuation.
    B,
    /// Digit pairs 00-99.
    C,
}

impl Subset {
    /// Symbol value of this subset's start character.
    pub const fn start_value(self) -> u8 {
        use Subset::*;
        match self {
            A => START_A,
            B => START_B,
            C => START_C,
        }
    }

    /// The in-stream byte that changes into this subset.
    pub const fn change_code(self) -> u8 {
        use Subset::*;
        match self {
            A => CODEA,
            B => CODEB,
            C => CODEC,
        }
    }

    pub const fn from_change_code(unit: u8) -> Option<Subset> {
        match unit {
            CODEA => Some(Subset::A),
            CODEB => Some(Subset::B),
            CODEC => Some(Subset::C),
            _ => None,
        }
    }

    /// The subset a `SHIFT` temporarily moves to. Subset C has no shift.
    pub const fn shifted(self) -> Option<Subset> {
        match self {
            Subset::A => Some(Subset::B),
            Subset::B => Some(Subset::A),
            Subset::C => None,
        }
    }

    /// Returns whether `unit` has a place in this subset at all.
    ///
    /// Unlike [`value_of`](Self::value_of) this looks at single data units, so
    /// a lone digit counts as a member of subset C. `SHIFT` belongs to A and B.
    pub fn encodes(self, unit: u8) -> bool {
        if unit == SHIFT {
            return self.shifted().is_some();
        }
        match classify(unit) {
            Some(class) => class.subsets().contains(&self),
            None => false,
        }
    }

    /// Looks up the symbol value of one character of this subset.
    ///
    /// A character is a single byte in A and B, and either a digit pair or a
    /// single control byte in C. Change codes resolve to the value that
    /// switches away from this subset.
    pub fn value_of(self, character: &[u8]) -> Option<u8> {
        use Subset::*;
        match (self, character) {
            (C, &[hi, lo]) if hi.is_ascii_digit() && lo.is_ascii_digit() => {
                Some((hi - b'0') * 10 + (lo - b'0'))
            }
            (_, &[unit]) => self.control_value(unit).or_else(|| match (self, unit) {
                (A, 0..=31) => Some(unit + 64),
                (A, 32..=95) | (B, 32..=127) => Some(unit - 32),
                _ => None,
            }),
            _ => None,
        }
    }

    fn control_value(self, unit: u8) -> Option<u8> {
        use Subset::*;
        let value = match (self, unit) {
            (A | B, FNC3) => 96,
            (A | B, FNC2) => 97,
            (A | B, SHIFT) => 98,
            (A | B, CODEC) => 99,
            (A | C, CODEB) => 100,
            (A, FNC4) => 101,
            (B, FNC4) => 100,
            (B | C, CODEA) => 101,
            (_, FNC1) => 102,
            _ => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Subset::A => "A",
            Subset::B => "B",
            Subset::C => "C",
        };
        f.write_str(name)
    }
}

impl FromStr for Subset {
    type Err = Error;

    /// Parses a one-letter subset identifier, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" | "a" => Ok(Subset::A),
            "B" | "b" => Ok(Subset::B),
            "C" | "c" => Ok(Subset::C),
            _ => Err(Error::UnknownSubset(s.to_owned())),
        }
    }
}

/// Planner categories of a data unit, following the GS1-128 terminology.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Class {
    /// `0`-`9`, valid everywhere and pairable in subset C.
    Digit,
    /// ASCII 0-31, only encodable in subset A.
    SymbologyElement,
    /// ASCII 96-127, only encodable in subset B.
    Lowercase,
    /// Punctuation, uppercase letters and FNC2 to FNC4, valid in A and B.
    Neutral,
    /// `FNC1`, valid everywhere. In subset C it stands where a digit pair would.
    Fnc1,
}

impl Class {
    pub fn subsets(self) -> &'static [Subset] {
        use Subset::*;
        match self {
            Class::Digit => &[A, B, C],
            Class::SymbologyElement => &[A],
            Class::Lowercase => &[B],
            Class::Neutral => &[A, B],
            Class::Fnc1 => &[A, B, C],
        }
    }
}

/// Classifies one data unit. Change codes, `SHIFT` and bytes outside ASCII
/// that are not function characters return `None`.
pub fn classify(unit: u8) -> Option<Class> {
    match unit {
        b'0'..=b'9' => Some(Class::Digit),
        0..=31 => Some(Class::SymbologyElement),
        96..=127 => Some(Class::Lowercase),
        FNC1 => Some(Class::Fnc1),
        32..=95 | FNC2..=FNC4 => Some(Class::Neutral),
        _ => None,
    }
}

/// Returns whether the byte is one of the function characters or `SHIFT`.
pub fn is_function(unit: u8) -> bool {
    matches!(unit, FNC1..=FNC4 | SHIFT)
}

/// Returns whether the byte is a subset change code or `SHIFT`.
pub fn is_marker(unit: u8) -> bool {
    matches!(unit, CODEA | CODEB | CODEC | SHIFT)
}

/// Bar pattern for a symbol value, one character per module.
///
/// # Panics
///
/// Panics if `value` is greater than [`STOP`].
pub fn pattern(value: u8) -> &'static str {
    ENCODINGS[usize::from(value)]
}

static ENCODINGS: [&str; 107] = [
    "11011001100", "11001101100", "11001100110", "10010011000", "10010001100",
    "10001001100", "10011001000", "10011000100", "10001100100", "11001001000",
    "11001000100", "11000100100", "10110011100", "10011011100", "10011001110",
    "10111001100", "10011101100", "10011100110", "11001110010", "11001011100",
    "11001001110", "11011100100", "11001110100", "11101101110", "11101001100",
    "11100101100", "11100100110", "11101100100", "11100110100", "11100110010",
    "11011011000", "11011000110", "11000110110", "10100011000", "10001011000",
    "10001000110", "10110001000", "10001101000", "10001100010", "11010001000",
    "11000101000", "11000100010", "10110111000", "10110001110", "10001101110",
    "10111011000", "10111000110", "10001110110", "11101110110", "11010001110",
    "11000101110", "11011101000", "11011100010", "11011101110", "11101011000",
    "11101000110", "11100010110", "11101101000", "11101100010", "11100011010",
    "11101111010", "11001000010", "11110001010", "10100110000", "10100001100",
    "10010110000", "10010000110", "10000101100", "10000100110", "10110010000",
    "10110000100", "10011010000", "10011000010", "10000110100", "10000110010",
    "11000010010", "11001010000", "11110111010", "11000010100", "10001111010",
    "10100111100", "10010111100", "10010011110", "10111100100", "10011110100",
    "10011110010", "11110100100", "11110010100", "11110010010", "11011011110",
    "11011110110", "11110110110", "10101111000", "10100011110", "10001011110",
    "10111101000", "10111100010", "11110101000", "11110100010", "10111011110",
    "10111101110", "11101011110", "11110101110", "11010000100", "11010010000",
    "11010011100", "11000111010",
];

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A", Subset::A; "upper a")]
    #[test_case("b", Subset::B; "lower b")]
    #[test_case("C", Subset::C; "upper c")]
    fn test_subset_from_str(s: &str, expected: Subset) {
        assert_eq!(s.parse::<Subset>(), Ok(expected));
    }

    #[test]
    fn test_unknown_subset() {
        assert_eq!("F".parse::<Subset>(), Err(Error::UnknownSubset("F".into())));
        assert!("AB".parse::<Subset>().is_err());
    }

    #[test]
    fn test_change_codes() {
        for subset in [Subset::A, Subset::B, Subset::C] {
            assert_eq!(Subset::from_change_code(subset.change_code()), Some(subset));
        }
        assert_eq!(Subset::from_change_code(SHIFT), None);
    }

    #[test_case(Subset::A, b"A", Some(33); "uppercase in a")]
    #[test_case(Subset::A, b"\n", Some(74); "control in a")]
    #[test_case(Subset::A, b"a", None; "lowercase in a")]
    #[test_case(Subset::B, b"a", Some(65); "lowercase in b")]
    #[test_case(Subset::B, b"\x7f", Some(95); "del in b")]
    #[test_case(Subset::B, b"\r", None; "control in b")]
    #[test_case(Subset::C, b"45", Some(45); "pair in c")]
    #[test_case(Subset::C, b"4", None; "lone digit in c")]
    #[test_case(Subset::C, b"4a", None; "mixed pair in c")]
    #[test_case(Subset::A, &[FNC4], Some(101); "fnc4 in a")]
    #[test_case(Subset::B, &[FNC4], Some(100); "fnc4 in b")]
    #[test_case(Subset::C, &[FNC1], Some(102); "fnc1 in c")]
    #[test_case(Subset::C, &[FNC2], None; "fnc2 in c")]
    #[test_case(Subset::A, &[CODEB], Some(100); "code b from a")]
    #[test_case(Subset::B, &[CODEA], Some(101); "code a from b")]
    #[test_case(Subset::C, &[CODEA], Some(101); "code a from c")]
    #[test_case(Subset::A, &[CODEA], None; "code a from a")]
    fn test_value_of(subset: Subset, character: &[u8], expected: Option<u8>) {
        assert_eq!(subset.value_of(character), expected);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b'7'), Some(Class::Digit));
        assert_eq!(classify(0x01), Some(Class::SymbologyElement));
        assert_eq!(classify(b'q'), Some(Class::Lowercase));
        assert_eq!(classify(b'Q'), Some(Class::Neutral));
        assert_eq!(classify(FNC1), Some(Class::Fnc1));
        assert_eq!(classify(FNC4), Some(Class::Neutral));
        assert_eq!(classify(CODEB), None);
        assert_eq!(classify(0xA3), None);
    }

    #[test_case(Subset::C, b'3', true; "digit in c")]
    #[test_case(Subset::C, b'x', false; "letter in c")]
    #[test_case(Subset::A, b'\t', true; "tab in a")]
    #[test_case(Subset::B, b'\t', false; "tab in b")]
    #[test_case(Subset::B, FNC3, true; "fnc3 in b")]
    #[test_case(Subset::C, FNC1, true; "fnc1 in c")]
    #[test_case(Subset::A, FNC1, true; "fnc1 in a")]
    #[test_case(Subset::C, FNC2, false; "fnc2 in c")]
    #[test_case(Subset::A, SHIFT, true; "shift in a")]
    #[test_case(Subset::C, SHIFT, false; "shift in c")]
    #[test_case(Subset::B, CODEA, false; "change code")]
    fn test_encodes(subset: Subset, unit: u8, expected: bool) {
        assert_eq!(subset.encodes(unit), expected);
    }

    #[test]
    fn test_encodes_agrees_with_value_of() {
        for subset in [Subset::A, Subset::B, Subset::C] {
            for unit in (0..=127).chain(FNC1..=FNC4) {
                if subset != Subset::C || !unit.is_ascii_digit() {
                    assert_eq!(subset.encodes(unit), subset.value_of(&[unit]).is_some());
                }
            }
        }
    }

    #[test]
    fn test_patterns() {
        assert_eq!(pattern(START_A), "11010000100");
        assert_eq!(pattern(START_C), "11010011100");
        assert_eq!(pattern(STOP), "11000111010");
        assert!(ENCODINGS.iter().all(|p| p.len() == 11));
    }
}
