//! Compiled reverser and the pattern-source abstraction.

use log::debug;
use rand::Rng;

use crate::ast::Pattern;
use crate::env::{GroupEnv, GroupValues};
use crate::error::Result;
use crate::generator::Generator;
use crate::options::ReverseOptions;
use crate::parser;

/// Anything that can hand out the source text of a pattern: raw text or a
/// compiled regex handle.
pub trait PatternSource {
    fn source(&self) -> &str;
}

impl PatternSource for str {
    fn source(&self) -> &str {
        self
    }
}

impl PatternSource for String {
    fn source(&self) -> &str {
        self.as_str()
    }
}

impl PatternSource for regex::Regex {
    fn source(&self) -> &str {
        self.as_str()
    }
}

impl PatternSource for fancy_regex::Regex {
    fn source(&self) -> &str {
        self.as_str()
    }
}

/// A pattern parsed once and reversed any number of times.
///
/// ```
/// use unmatcher::{GroupValues, Unmatcher};
///
/// # fn main() -> unmatcher::Result<()> {
/// let html = Unmatcher::new(r"<(\w+)>.*</\1>")?;
/// let s = html.reverse(&GroupValues::new().push("h1"))?;
/// assert!(s.starts_with("<h1>") && s.ends_with("</h1>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Unmatcher {
    source: String,
    pattern: Pattern,
    options: ReverseOptions,
}

impl Unmatcher {
    pub fn new<P: PatternSource + ?Sized>(pattern: &P) -> Result<Self> {
        Self::with_options(pattern, ReverseOptions::default())
    }

    pub fn with_options<P: PatternSource + ?Sized>(
        pattern: &P,
        options: ReverseOptions,
    ) -> Result<Self> {
        let source = pattern.source().to_string();
        let parsed = parser::parse(&source)?;
        debug!(
            "compiled pattern {:?} with {} capture groups",
            source,
            parsed.groups.count()
        );
        Ok(Unmatcher {
            source,
            pattern: parsed,
            options,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn options(&self) -> &ReverseOptions {
        &self.options
    }

    pub fn group_count(&self) -> usize {
        self.pattern.groups.count()
    }

    /// Generate a matching string using the thread-local random source.
    pub fn reverse(&self, values: &GroupValues) -> Result<String> {
        self.reverse_with_rng(values, &mut rand::thread_rng())
    }

    /// Generate a matching string drawing all choices from `rng`.
    pub fn reverse_with_rng<R: Rng + ?Sized>(
        &self,
        values: &GroupValues,
        rng: &mut R,
    ) -> Result<String> {
        let env = GroupEnv::seeded(&self.pattern.groups, values)?;
        let out = Generator::new(env, &self.options, rng).generate(&self.pattern.root)?;
        debug!("reversed {:?} to {:?}", self.source, out);
        Ok(out)
    }
}

impl PatternSource for Unmatcher {
    fn source(&self) -> &str {
        &self.source
    }
}
