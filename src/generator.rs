//! Generator: walks the AST and emits one string that matches it.

use log::trace;
use rand::Rng;

use crate::ast::*;
use crate::classes;
use crate::env::GroupEnv;
use crate::error::{Error, Result};
use crate::options::ReverseOptions;

pub struct Generator<'a, R: Rng + ?Sized> {
    env: GroupEnv<'a>,
    options: &'a ReverseOptions,
    rng: &'a mut R,
    /// Output offsets where an end anchor was passed, and whether it was `$`
    /// under the `m` flag.
    ends: Vec<(usize, bool)>,
}

impl<'a, R: Rng + ?Sized> Generator<'a, R> {
    pub fn new(env: GroupEnv<'a>, options: &'a ReverseOptions, rng: &'a mut R) -> Self {
        Generator {
            env,
            options,
            rng,
            ends: Vec::new(),
        }
    }

    /// Generate one string for `root`, consuming the environment.
    pub fn generate(mut self, root: &AstNode) -> Result<String> {
        let mut out = String::new();
        self.emit(&mut out, root)?;
        self.check_ends(&out)?;
        Ok(out)
    }

    /// Text emitted after an end anchor must be empty, or begin a new line
    /// when the anchor is a multiline `$`.
    fn check_ends(&self, out: &str) -> Result<()> {
        for &(at, multiline) in &self.ends {
            let rest = &out[at..];
            if !rest.is_empty() && !(multiline && rest.starts_with('\n')) {
                return Err(Error::unsupported(format!(
                    "end anchor followed by {:?}",
                    rest
                )));
            }
        }
        Ok(())
    }

    fn emit(&mut self, out: &mut String, node: &AstNode) -> Result<()> {
        match node {
            AstNode::Literal(text) => {
                out.push_str(text);
            }
            AstNode::Dot => {
                let alphabet = classes::working_alphabet(self.options.complement);
                out.push(self.pick(alphabet, "'.'")?);
            }
            AstNode::CharClass { kind, negated } => {
                let ch = if *negated {
                    let complement = classes::class_complement(*kind, self.options.complement);
                    self.pick(&complement, "negated class")?
                } else {
                    self.pick(classes::class_alphabet(*kind), "class")?
                };
                out.push(ch);
            }
            AstNode::CharSet {
                items,
                negated,
                case_insensitive,
            } => {
                let ch = if *negated {
                    let complement: Vec<char> = classes::working_alphabet(self.options.complement)
                        .iter()
                        .copied()
                        .filter(|&c| !classes::set_contains(c, items, *case_insensitive))
                        .collect();
                    self.pick(&complement, "negated set")?
                } else {
                    self.pick_from_set(items)?
                };
                out.push(ch);
            }
            AstNode::Concat(nodes) => {
                for n in nodes {
                    self.emit(out, n)?;
                }
            }
            AstNode::Alternation(branches) => {
                if branches.is_empty() {
                    return Ok(());
                }
                let choice = self.rng.gen_range(0..branches.len());
                self.emit(out, &branches[choice])?;
            }
            AstNode::Group { index, node: sub, .. } => {
                if let Some(value) = self.env.get(*index) {
                    out.push_str(value);
                    return Ok(());
                }
                let start = out.len();
                self.emit(out, sub)?;
                let value = out[start..].to_string();
                trace!("group {} resolved to {:?}", index, value);
                // Stored before returning: later backreferences and repeated
                // occurrences of this group read it from the environment.
                self.env.store(*index, value);
            }
            AstNode::NonCapturingGroup { node: sub } => {
                self.emit(out, sub)?;
            }
            AstNode::Repeat {
                node: sub,
                min,
                max,
                mode,
            } => {
                if *mode == RepeatMode::Possessive {
                    return Err(Error::unsupported("possessive quantifier"));
                }
                let max = max
                    .unwrap_or_else(|| min.saturating_add(self.options.unbounded_repeat_extra));
                let count = self.rng.gen_range(*min..=max);
                trace!("repeat {{{},{}}} chose {} iterations", min, max, count);
                for _ in 0..count {
                    self.emit(out, sub)?;
                }
            }
            AstNode::Backreference(target) => {
                let value = self
                    .env
                    .lookup(target)
                    .ok_or_else(|| Error::UnresolvedBackreference {
                        target: target.clone(),
                    })?;
                out.push_str(value);
            }
            AstNode::Anchor(AnchorKind::Start) => {
                if !out.is_empty() {
                    return Err(Error::unsupported(format!("start anchor after {:?}", out)));
                }
            }
            AstNode::Anchor(AnchorKind::LineStart) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    return Err(Error::unsupported(format!(
                        "line-start anchor after {:?}",
                        out
                    )));
                }
            }
            AstNode::Anchor(AnchorKind::End) => self.ends.push((out.len(), false)),
            AstNode::Anchor(AnchorKind::LineEnd) => self.ends.push((out.len(), true)),
            AstNode::Anchor(AnchorKind::WordBoundary) => {
                return Err(Error::unsupported("word boundary \\b"));
            }
            AstNode::Anchor(AnchorKind::NonWordBoundary) => {
                return Err(Error::unsupported("non-word boundary \\B"));
            }
            AstNode::Lookahead { positive, .. } => {
                let construct = if *positive {
                    "lookahead (?=...)"
                } else {
                    "negative lookahead (?!...)"
                };
                return Err(Error::unsupported(construct));
            }
            AstNode::Lookbehind { positive, .. } => {
                let construct = if *positive {
                    "lookbehind (?<=...)"
                } else {
                    "negative lookbehind (?<!...)"
                };
                return Err(Error::unsupported(construct));
            }
            AstNode::Atomic { .. } => {
                return Err(Error::unsupported("atomic group (?>...)"));
            }
        }
        Ok(())
    }

    /// Pick uniformly from `candidates`, failing if there are none.
    fn pick(&mut self, candidates: &[char], construct: &str) -> Result<char> {
        if candidates.is_empty() {
            return Err(Error::unsupported(format!(
                "{} with no member in the working alphabet",
                construct
            )));
        }
        Ok(candidates[self.rng.gen_range(0..candidates.len())])
    }

    /// Pick uniformly over the union of a positive set's items. A range of n
    /// characters weighs n, a nested class weighs its alphabet size.
    fn pick_from_set(&mut self, items: &[SetItem]) -> Result<char> {
        let weights: Vec<u64> = items.iter().map(|item| self.item_weight(item) as u64).collect();
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return Err(Error::unsupported("set with no member in the working alphabet"));
        }
        let mut n = self.rng.gen_range(0..total);
        for (item, &weight) in items.iter().zip(&weights) {
            if n < weight {
                return self.item_nth(item, n as u32);
            }
            n -= weight;
        }
        unreachable!("selection {} exceeds set weight {}", n, total)
    }

    fn item_weight(&self, item: &SetItem) -> u32 {
        match *item {
            SetItem::Literal(_) => 1,
            SetItem::Range(lo, hi) => classes::range_len(lo, hi),
            SetItem::Class { kind, negated: false } => classes::class_alphabet(kind).len() as u32,
            SetItem::Class { kind, negated: true } => {
                classes::class_complement(kind, self.options.complement).len() as u32
            }
        }
    }

    fn item_nth(&self, item: &SetItem, n: u32) -> Result<char> {
        let ch = match *item {
            SetItem::Literal(ch) => Some(ch),
            SetItem::Range(lo, _) => classes::range_nth(lo, n),
            SetItem::Class { kind, negated: false } => {
                classes::class_alphabet(kind).get(n as usize).copied()
            }
            SetItem::Class { kind, negated: true } => {
                classes::class_complement(kind, self.options.complement)
                    .get(n as usize)
                    .copied()
            }
        };
        ch.ok_or_else(|| Error::unsupported(format!("set item {:?}", item)))
    }
}
