//! Character-class predicates and the finite alphabets generation picks from.

use once_cell::sync::Lazy;

use crate::ast::{ClassKind, SetItem};
use crate::options::ComplementAlphabet;

static DIGIT: Lazy<Vec<char>> = Lazy::new(|| ('0'..='9').collect());

static WORD: Lazy<Vec<char>> = Lazy::new(|| {
    ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(std::iter::once('_'))
        .collect()
});

const SPACE: &[char] = &[' ', '\t', '\n', '\r'];

static PRINTABLE: Lazy<Vec<char>> = Lazy::new(|| (' '..='~').collect());

static LATIN1: Lazy<Vec<char>> = Lazy::new(|| {
    PRINTABLE
        .iter()
        .copied()
        .chain(('\u{c0}'..='\u{ff}').filter(|c| !matches!(*c, '×' | '÷')))
        .collect()
});

/// Representative alphabet of a non-negated class.
pub fn class_alphabet(kind: ClassKind) -> &'static [char] {
    match kind {
        ClassKind::Digit => &DIGIT,
        ClassKind::Word => &WORD,
        ClassKind::Space => SPACE,
    }
}

pub fn working_alphabet(alphabet: ComplementAlphabet) -> &'static [char] {
    match alphabet {
        ComplementAlphabet::Printable => &PRINTABLE,
        ComplementAlphabet::Latin1 => &LATIN1,
    }
}

/// Check if a character belongs to a (non-negated) class.
pub fn class_matches(ch: char, kind: ClassKind) -> bool {
    match kind {
        ClassKind::Digit => ch.is_ascii_digit(),
        ClassKind::Word => ch.is_alphanumeric() || ch == '_',
        ClassKind::Space => ch.is_whitespace(),
    }
}

/// Members of the working alphabet that a negated class admits.
pub fn class_complement(kind: ClassKind, alphabet: ComplementAlphabet) -> Vec<char> {
    working_alphabet(alphabet)
        .iter()
        .copied()
        .filter(|&c| !class_matches(c, kind))
        .collect()
}

/// Check if a character is a member of a set's items, ignoring negation.
pub fn set_contains(ch: char, items: &[SetItem], case_insensitive: bool) -> bool {
    let item_matches = |c: char| {
        items.iter().any(|item| match *item {
            SetItem::Literal(lit) => c == lit,
            SetItem::Range(lo, hi) => lo <= c && c <= hi,
            SetItem::Class { kind, negated } => class_matches(c, kind) != negated,
        })
    };
    if case_insensitive {
        std::iter::once(ch)
            .chain(ch.to_lowercase())
            .chain(ch.to_uppercase())
            .any(item_matches)
    } else {
        item_matches(ch)
    }
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Number of scalar values in `lo..=hi`, skipping the surrogate gap.
pub fn range_len(lo: char, hi: char) -> u32 {
    let len = hi as u32 - lo as u32 + 1;
    if (lo as u32) < SURROGATE_START && (hi as u32) >= SURROGATE_START + SURROGATE_LEN {
        len - SURROGATE_LEN
    } else {
        len
    }
}

/// The `n`th scalar value of a range starting at `lo`.
pub fn range_nth(lo: char, n: u32) -> Option<char> {
    let mut code = (lo as u32).checked_add(n)?;
    if (lo as u32) < SURROGATE_START && code >= SURROGATE_START {
        code += SURROGATE_LEN;
    }
    char::from_u32(code)
}
