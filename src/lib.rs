//! Regular expression reverser.
//!
//! Given a pattern, produce a string that matches it, optionally with
//! caller-chosen values for some capture groups. Useful for generating test
//! data for code that consumes strings of a known shape.
//!
//! ```
//! use unmatcher::{reverse, GroupValues};
//!
//! # fn main() -> unmatcher::Result<()> {
//! let s = reverse(r"(?P<foo>\w+)__(?P=foo)", &GroupValues::new().named("foo", "bar"))?;
//! assert_eq!(s, "bar__bar");
//! # Ok(())
//! # }
//! ```
//!
//! Lookaround, atomic groups, possessive quantifiers and word boundaries parse
//! but fail with [`Error::Unsupported`] when generation reaches them. Anchors
//! emit nothing; an anchor whose position the generated text cannot satisfy
//! (`a^b`, `a$b`) also fails with [`Error::Unsupported`].

mod ast;
mod classes;
mod env;
mod error;
mod generator;
mod options;
mod parser;
mod unmatcher;

use rand::Rng;

pub use ast::{
    AnchorKind, AstNode, ClassKind, GroupRef, GroupTable, Pattern, RepeatMode, SetItem,
};
pub use env::{GroupEnv, GroupValues};
pub use error::{Error, PatternSyntaxError, Result};
pub use generator::Generator;
pub use options::{ComplementAlphabet, DEFAULT_UNBOUNDED_REPEAT_EXTRA, ReverseOptions};
pub use parser::parse;
pub use unmatcher::{PatternSource, Unmatcher};

/// Generate one string matching `pattern`, seeding groups from `values`.
pub fn reverse<P: PatternSource + ?Sized>(pattern: &P, values: &GroupValues) -> Result<String> {
    Unmatcher::new(pattern)?.reverse(values)
}

/// Like [`reverse`], with explicit options and random source.
pub fn reverse_with<P, R>(
    pattern: &P,
    values: &GroupValues,
    options: &ReverseOptions,
    rng: &mut R,
) -> Result<String>
where
    P: PatternSource + ?Sized,
    R: Rng + ?Sized,
{
    Unmatcher::with_options(pattern, options.clone())?.reverse_with_rng(values, rng)
}
