//! # barust
//!
//! A Rust library for encoding data into Code 128 barcodes.
//!
//! `barust` turns bytes into the bar/space pattern of a Code 128 symbol. A symbol
//! may mix the three character subsets (A, B and C) through in-stream change
//! codes and shifts, and the library can pick those switch points itself so the
//! symbol comes out as short as possible, following the GS1-128 guidelines.
//!
//! ## Features
//!
//! - Encode data in subset A, B or C, or let the planner choose the shortest mix.
//! - Chain segments of different subsets and edit them in place.
//! - Function characters FNC1 to FNC4 and the `SHIFT` character.
//! - Modulo 103 checksum and the full module pattern as a `'0'`/`'1'` string.
//! - Render the pattern as text for a terminal.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! barust = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Let the planner pick the subsets:
//!
//! ```rust
//! use barust::{Code128, Subset};
//!
//! let code = Code128::new("123456QWERTY\r\n\tAAbbcc12XX34567").unwrap();
//! assert_eq!(code.subset(), Subset::C);
//! println!("{}", code.encoding().unwrap());
//! ```
//!
//! Encode in a fixed subset:
//!
//! ```rust
//! use barust::Code128;
//!
//! let code = Code128::with_type("ABC123", "A").unwrap();
//! assert_eq!(code.checksum().unwrap(), 66);
//! ```
//!
//! ## Modules
//!
//! - [`charset`]: Character classification, symbol values and bar patterns.
//! - [`code128`]: Segment chains, encoding and the [`Code128`] symbol.
//! - [`planner`]: Shortest-encoding subset selection.
//! - [`helper`]: Utilities for rendering encodings.
#![forbid(unsafe_code)]

/// Concatenates byte strings and single control bytes in tests.
#[cfg(test)]
macro_rules! bytes {
    ($($part:expr),* $(,)?) => {{
        let mut bytes: Vec<u8> = Vec::new();
        $( bytes.extend_from_slice(&$part[..]); )*
        bytes
    }};
}

pub mod charset;
pub mod code128;
pub mod error;
pub mod helper;
pub mod planner;

pub use charset::Subset;
pub use code128::{Code128, Segment};
pub use error::{Error, Result};
