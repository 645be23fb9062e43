//! Generation options.
//!
//! `ReverseOptions` derives serde traits so it can be loaded from whatever
//! configuration format the caller already uses; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

/// Extra repetitions allowed past `min` for `*`, `+` and `{m,}`.
pub const DEFAULT_UNBOUNDED_REPEAT_EXTRA: u32 = 20;

/// Working alphabet that `.`, negated classes and negated sets draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplementAlphabet {
    /// Printable ASCII, `' '..='~'`.
    #[default]
    Printable,
    /// Printable ASCII plus the Latin-1 letters `À..=ÿ` (without `×` and `÷`).
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseOptions {
    /// An unbounded repeat `{m,}` generates between `m` and `m + extra` items.
    pub unbounded_repeat_extra: u32,
    pub complement: ComplementAlphabet,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        ReverseOptions {
            unbounded_repeat_extra: DEFAULT_UNBOUNDED_REPEAT_EXTRA,
            complement: ComplementAlphabet::default(),
        }
    }
}

impl ReverseOptions {
    pub fn with_unbounded_repeat_extra(mut self, extra: u32) -> Self {
        self.unbounded_repeat_extra = extra;
        self
    }

    pub fn with_complement(mut self, complement: ComplementAlphabet) -> Self {
        self.complement = complement;
        self
    }
}
