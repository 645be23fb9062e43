//! Pattern parser: converts pattern text into an AST and group table.

use crate::ast::*;
use crate::error::{Error, PatternSyntaxError, Result};

/// Flags accepted inside `(?...)`.
const FLAG_CHARS: &str = "aiLmsux";

/// Parse `pattern` into a [`Pattern`].
pub fn parse(pattern: &str) -> Result<Pattern> {
    Parser::new(pattern).parse()
}

pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    groups: GroupTable,
    /// Backreferences with their positions; targets are checked once the
    /// whole pattern is parsed, so forward references are allowed.
    backrefs: Vec<(GroupRef, usize)>,
    case_insensitive: bool,
    multiline: bool,
}

impl Parser {
    pub fn new(pattern: &str) -> Self {
        Parser {
            chars: pattern.chars().collect(),
            pos: 0,
            groups: GroupTable::new(),
            backrefs: Vec::new(),
            case_insensitive: false,
            multiline: false,
        }
    }

    /// Parse the full pattern.
    pub fn parse(mut self) -> Result<Pattern> {
        let root = self.parse_alternation()?;
        if self.pos < self.chars.len() {
            return Err(self.error("unbalanced parenthesis"));
        }
        for (target, position) in &self.backrefs {
            if self.groups.resolve(target).is_none() {
                return Err(
                    PatternSyntaxError::new(*position, format!("invalid reference to {}", target))
                        .into(),
                );
            }
        }
        Ok(Pattern {
            root,
            groups: self.groups,
        })
    }

    fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, position: usize, message: impl Into<String>) -> Error {
        PatternSyntaxError::new(position, message).into()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the `)` closing the group opened at `open`.
    fn close_group(&mut self, open: usize) -> Result<()> {
        if self.eat(')') {
            Ok(())
        } else {
            Err(self.error_at(open, "missing ), unterminated subpattern"))
        }
    }

    /// Parse alternation: `a|b|c`
    fn parse_alternation(&mut self) -> Result<AstNode> {
        let mut branches = vec![self.parse_concat()?];
        while self.eat('|') {
            branches.push(self.parse_concat()?);
        }
        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(AstNode::Alternation(branches))
        }
    }

    /// Parse concatenation: `abc`
    fn parse_concat(&mut self) -> Result<AstNode> {
        let mut nodes: Vec<AstNode> = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == ')' || ch == '|' {
                break;
            }
            let Some(node) = self.parse_quantified()? else {
                continue;
            };
            if let (Some(AstNode::Literal(prev)), AstNode::Literal(text)) =
                (nodes.last_mut(), &node)
            {
                prev.push_str(text);
                continue;
            }
            nodes.push(node);
        }
        if nodes.len() == 1 {
            Ok(nodes.remove(0))
        } else {
            Ok(AstNode::Concat(nodes))
        }
    }

    /// Parse an atom possibly followed by a quantifier. Returns `None` for
    /// items that produce no node (comments, global flags).
    fn parse_quantified(&mut self) -> Result<Option<AstNode>> {
        let Some(node) = self.parse_atom()? else {
            return Ok(None);
        };
        let quantifier_pos = self.pos;
        let Some((min, max)) = self.parse_quantifier()? else {
            return Ok(Some(node));
        };
        if matches!(node, AstNode::Anchor(_)) {
            return Err(self.error_at(quantifier_pos, "nothing to repeat"));
        }
        let mode = if self.eat('?') {
            RepeatMode::Lazy
        } else if self.eat('+') {
            RepeatMode::Possessive
        } else {
            RepeatMode::Greedy
        };
        let next = self.pos;
        if self.parse_quantifier()?.is_some() {
            return Err(self.error_at(next, "multiple repeat"));
        }
        Ok(Some(AstNode::Repeat {
            node: Box::new(node),
            min,
            max,
            mode,
        }))
    }

    /// Parse `*`, `+`, `?` or a well-formed brace quantifier. A `{` that does
    /// not start a quantifier is left in place for the atom parser.
    fn parse_quantifier(&mut self) -> Result<Option<(u32, Option<u32>)>> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(Some((0, None)))
            }
            Some('+') => {
                self.advance();
                Ok(Some((1, None)))
            }
            Some('?') => {
                self.advance();
                Ok(Some((0, Some(1))))
            }
            Some('{') => self.parse_brace_quantifier(),
            _ => Ok(None),
        }
    }

    /// Parse `{m}`, `{m,}`, `{,n}`, `{m,n}`.
    fn parse_brace_quantifier(&mut self) -> Result<Option<(u32, Option<u32>)>> {
        let save_pos = self.pos;
        self.advance(); // consume '{'
        if self.peek() == Some('}') {
            self.pos = save_pos;
            return Ok(None);
        }
        let lo = self.take_digits();
        let hi = if self.eat(',') {
            Some(self.take_digits())
        } else {
            None
        };
        if !self.eat('}') {
            // Not a quantifier; the '{' is a literal
            self.pos = save_pos;
            return Ok(None);
        }
        let min = match lo.as_str() {
            "" => 0,
            digits => self.repeat_count(digits, save_pos)?,
        };
        let max = match hi.as_deref() {
            None => Some(min),
            Some("") => None,
            Some(digits) => Some(self.repeat_count(digits, save_pos)?),
        };
        if let Some(max) = max {
            if max < min {
                return Err(self.error_at(save_pos, "min repeat greater than max repeat"));
            }
        }
        Ok(Some((min, max)))
    }

    fn repeat_count(&self, digits: &str, position: usize) -> Result<u32> {
        digits
            .parse::<u32>()
            .map_err(|_| self.error_at(position, "the repetition number is too large"))
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.advance();
        }
        digits
    }

    /// Parse a single atom (literal, class, set, group, anchor, etc.)
    fn parse_atom(&mut self) -> Result<Option<AstNode>> {
        let node = match self.peek() {
            None => return Err(self.error("unexpected end of pattern")),
            Some('(') => return self.parse_group(),
            Some('[') => self.parse_set()?,
            Some('\\') => self.parse_escape()?,
            Some('*' | '+' | '?') => return Err(self.error("nothing to repeat")),
            Some('{') => {
                let start = self.pos;
                if self.parse_brace_quantifier()?.is_some() {
                    return Err(self.error_at(start, "nothing to repeat"));
                }
                self.advance();
                AstNode::Literal("{".to_string())
            }
            Some(ch) => {
                self.advance();
                match ch {
                    '.' => AstNode::Dot,
                    '^' if self.multiline => AstNode::Anchor(AnchorKind::LineStart),
                    '^' => AstNode::Anchor(AnchorKind::Start),
                    '$' if self.multiline => AstNode::Anchor(AnchorKind::LineEnd),
                    '$' => AstNode::Anchor(AnchorKind::End),
                    _ => AstNode::Literal(ch.to_string()),
                }
            }
        };
        Ok(Some(node))
    }

    /// Parse an escape sequence outside a set.
    fn parse_escape(&mut self) -> Result<AstNode> {
        let start = self.pos;
        self.advance(); // consume '\\'
        let Some(ch) = self.advance() else {
            return Err(self.error_at(start, "bad escape (end of pattern)"));
        };
        let node = match ch {
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => {
                let (kind, negated) = class_escape(ch);
                AstNode::CharClass { kind, negated }
            }
            'b' => AstNode::Anchor(AnchorKind::WordBoundary),
            'B' => AstNode::Anchor(AnchorKind::NonWordBoundary),
            'A' => AstNode::Anchor(AnchorKind::Start),
            'Z' => AstNode::Anchor(AnchorKind::End),
            '1'..='9' => {
                let mut index = ch as usize - '0' as usize;
                if let Some(next) = self.peek().filter(char::is_ascii_digit) {
                    self.advance();
                    index = index * 10 + (next as usize - '0' as usize);
                }
                self.backreference(GroupRef::Index(index), start)
            }
            'g' => {
                if !self.eat('<') {
                    return Err(self.error("missing <"));
                }
                let name = self.parse_group_name('>', true)?;
                let target = match name.parse::<usize>() {
                    Ok(index) => GroupRef::Index(index),
                    Err(_) => GroupRef::Name(name),
                };
                self.backreference(target, start)
            }
            _ => match self.parse_char_escape(ch, start)? {
                Some(literal) => AstNode::Literal(literal.to_string()),
                None => AstNode::Literal(ch.to_string()),
            },
        };
        Ok(node)
    }

    fn backreference(&mut self, target: GroupRef, position: usize) -> AstNode {
        self.backrefs.push((target.clone(), position));
        AstNode::Backreference(target)
    }

    /// Character-valued escapes shared by atoms and sets: control characters,
    /// octal, and hex. Returns `None` when `ch` is not one of them.
    fn parse_char_escape(&mut self, ch: char, start: usize) -> Result<Option<char>> {
        let literal = match ch {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\x0c',
            'v' => '\x0b',
            'a' => '\x07',
            '0'..='7' => {
                let mut value = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.peek() {
                        Some(digit @ '0'..='7') => {
                            self.advance();
                            value = value * 8 + (digit as u32 - '0' as u32);
                        }
                        _ => break,
                    }
                }
                char::from_u32(value).ok_or_else(|| self.error_at(start, "bad octal escape"))?
            }
            'x' => self.parse_hex_escape(2, start)?,
            'u' => self.parse_hex_escape(4, start)?,
            'U' => self.parse_hex_escape(8, start)?,
            _ => return Ok(None),
        };
        Ok(Some(literal))
    }

    fn parse_hex_escape(&mut self, width: usize, start: usize) -> Result<char> {
        let mut value = 0u32;
        for _ in 0..width {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error_at(start, "incomplete hex escape"))?;
            self.advance();
            value = value.wrapping_mul(16).wrapping_add(digit);
        }
        char::from_u32(value).ok_or_else(|| self.error_at(start, "bad escape: invalid code point"))
    }

    /// Parse a group or `(?...)` extension. Returns `None` for comments and
    /// global flags, which produce no node.
    fn parse_group(&mut self) -> Result<Option<AstNode>> {
        let open = self.pos;
        self.advance(); // consume '('

        if !self.eat('?') {
            return self.parse_capture(open, None).map(Some);
        }

        let node = match self.advance() {
            Some(':') => AstNode::NonCapturingGroup {
                node: Box::new(self.parse_group_body(open)?),
            },
            Some('P') => match self.advance() {
                Some('<') => {
                    let name = self.parse_group_name('>', false)?;
                    return self.parse_capture(open, Some(name)).map(Some);
                }
                Some('=') => {
                    let name = self.parse_group_name(')', false)?;
                    return Ok(Some(self.backreference(GroupRef::Name(name), open)));
                }
                _ => return Err(self.error_at(open, "unknown extension ?P")),
            },
            Some('<') => match self.peek() {
                Some(sign @ ('=' | '!')) => {
                    self.advance();
                    AstNode::Lookbehind {
                        node: Box::new(self.parse_group_body(open)?),
                        positive: sign == '=',
                    }
                }
                _ => {
                    let name = self.parse_group_name('>', false)?;
                    return self.parse_capture(open, Some(name)).map(Some);
                }
            },
            Some(sign @ ('=' | '!')) => AstNode::Lookahead {
                node: Box::new(self.parse_group_body(open)?),
                positive: sign == '=',
            },
            Some('>') => AstNode::Atomic {
                node: Box::new(self.parse_group_body(open)?),
            },
            Some('#') => {
                while let Some(ch) = self.advance() {
                    if ch == ')' {
                        return Ok(None);
                    }
                }
                return Err(self.error_at(open, "missing ), unterminated comment"));
            }
            Some(ch) if ch == '-' || FLAG_CHARS.contains(ch) => {
                self.pos -= 1;
                return self.parse_flags(open);
            }
            _ => return Err(self.error_at(open, "unknown extension")),
        };
        Ok(Some(node))
    }

    fn parse_capture(&mut self, open: usize, name: Option<String>) -> Result<AstNode> {
        let index = self
            .groups
            .push(name.clone())
            .ok_or_else(|| self.error_at(open, "redefinition of group name"))?;
        let node = self.parse_group_body(open)?;
        Ok(AstNode::Group {
            index,
            name,
            node: Box::new(node),
        })
    }

    fn parse_group_body(&mut self, open: usize) -> Result<AstNode> {
        let node = self.parse_alternation()?;
        self.close_group(open)?;
        Ok(node)
    }

    /// Parse a group name up to `terminator`. `\g<...>` also accepts a
    /// group index in place of a name.
    fn parse_group_name(&mut self, terminator: char, allow_index: bool) -> Result<String> {
        let start = self.pos;
        let mut name = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(self.error_at(
                        start,
                        format!("missing {}, unterminated name", terminator),
                    ));
                }
                Some(ch) if ch == terminator => break,
                Some(ch) => name.push(ch),
            }
        }
        if name.is_empty() {
            return Err(self.error_at(start, "missing group name"));
        }
        let is_identifier = name.starts_with(|c: char| c.is_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        let is_index = allow_index && name.chars().all(|c| c.is_ascii_digit());
        if !(is_identifier || is_index) {
            return Err(self.error_at(start, format!("bad character in group name '{}'", name)));
        }
        Ok(name)
    }

    /// Parse inline flags: `(?i)` applies to the rest of the pattern,
    /// `(?i-s:...)` only to its body.
    fn parse_flags(&mut self, open: usize) -> Result<Option<AstNode>> {
        let mut enable = String::new();
        let mut disable = String::new();
        let mut negating = false;
        let scoped = loop {
            match self.advance() {
                Some('-') if !negating => negating = true,
                Some(ch) if FLAG_CHARS.contains(ch) => {
                    if negating {
                        disable.push(ch);
                    } else {
                        enable.push(ch);
                    }
                }
                Some(':') => break true,
                Some(')') => break false,
                None => return Err(self.error_at(open, "missing flag")),
                Some(_) => return Err(self.error_at(self.pos - 1, "unknown flag")),
            }
        };
        if enable.contains('x') || disable.contains('x') {
            return Err(Error::unsupported("verbose flag (?x)"));
        }
        let previous = (self.case_insensitive, self.multiline);
        if enable.contains('i') {
            self.case_insensitive = true;
        }
        if disable.contains('i') {
            self.case_insensitive = false;
        }
        if enable.contains('m') {
            self.multiline = true;
        }
        if disable.contains('m') {
            self.multiline = false;
        }
        if !scoped {
            if negating {
                return Err(self.error_at(open, "missing :"));
            }
            return Ok(None);
        }
        let body = self.parse_group_body(open);
        (self.case_insensitive, self.multiline) = previous;
        Ok(Some(AstNode::NonCapturingGroup {
            node: Box::new(body?),
        }))
    }

    /// Parse a bracketed set: `[abc]`, `[a-z]`, `[^abc]`.
    fn parse_set(&mut self) -> Result<AstNode> {
        let open = self.pos;
        self.advance(); // consume '['
        let negated = self.eat('^');

        let mut items = Vec::new();
        let mut first = true;
        loop {
            let item_pos = self.pos;
            let start = match self.advance() {
                None => return Err(self.error_at(open, "unterminated character set")),
                // Allow ']' as first character in set
                Some(']') if !first => break,
                Some('\\') => self.parse_set_escape(item_pos)?,
                Some(ch) => SetItem::Literal(ch),
            };
            first = false;

            // Check for range like a-z
            if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c != ']') {
                self.advance(); // consume '-'
                let end_pos = self.pos;
                let end = match self.advance() {
                    Some('\\') => self.parse_set_escape(end_pos)?,
                    Some(ch) => SetItem::Literal(ch),
                    None => return Err(self.error_at(open, "unterminated character set")),
                };
                match (start, end) {
                    (SetItem::Literal(lo), SetItem::Literal(hi)) if lo <= hi => {
                        items.push(SetItem::Range(lo, hi));
                    }
                    _ => return Err(self.error_at(item_pos, "bad character range")),
                }
            } else {
                items.push(start);
            }
        }
        Ok(AstNode::CharSet {
            items,
            negated,
            case_insensitive: self.case_insensitive,
        })
    }

    /// Parse an escape inside a set; the backslash is already consumed.
    fn parse_set_escape(&mut self, start: usize) -> Result<SetItem> {
        let Some(ch) = self.advance() else {
            return Err(self.error_at(start, "bad escape (end of pattern)"));
        };
        let item = match ch {
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => {
                let (kind, negated) = class_escape(ch);
                SetItem::Class { kind, negated }
            }
            'b' => SetItem::Literal('\x08'),
            _ => match self.parse_char_escape(ch, start)? {
                Some(literal) => SetItem::Literal(literal),
                None => SetItem::Literal(ch),
            },
        };
        Ok(item)
    }
}

fn class_escape(ch: char) -> (ClassKind, bool) {
    let kind = match ch.to_ascii_lowercase() {
        'd' => ClassKind::Digit,
        'w' => ClassKind::Word,
        _ => ClassKind::Space,
    };
    (kind, ch.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(pattern: &str) -> AstNode {
        parse(pattern).unwrap().root
    }

    fn syntax_error(pattern: &str) -> PatternSyntaxError {
        match parse(pattern) {
            Err(Error::Syntax(err)) => err,
            other => panic!("expected syntax error for {:?}, got {:?}", pattern, other),
        }
    }

    fn lit(text: &str) -> AstNode {
        AstNode::Literal(text.to_string())
    }

    #[test]
    fn merges_adjacent_literals() {
        assert_eq!(root("abc"), lit("abc"));
        assert_eq!(root(r"a\.b"), lit("a.b"));
    }

    #[test]
    fn quantifier_binds_to_last_character() {
        assert_eq!(
            root("ab*"),
            AstNode::Concat(vec![
                lit("a"),
                AstNode::Repeat {
                    node: Box::new(lit("b")),
                    min: 0,
                    max: None,
                    mode: RepeatMode::Greedy,
                },
            ])
        );
    }

    #[test]
    fn quantifier_bounds() {
        let cases = [
            ("a*", 0, None),
            ("a+", 1, None),
            ("a?", 0, Some(1)),
            ("a{3}", 3, Some(3)),
            ("a{2,4}", 2, Some(4)),
            ("a{2,}", 2, None),
            ("a{,5}", 0, Some(5)),
        ];
        for (pattern, min, max) in cases {
            match root(pattern) {
                AstNode::Repeat { min: m, max: n, .. } => {
                    assert_eq!((m, n), (min, max), "pattern {}", pattern)
                }
                other => panic!("{} parsed to {:?}", pattern, other),
            }
        }
    }

    #[test]
    fn repeat_modes() {
        let mode = |pattern| match root(pattern) {
            AstNode::Repeat { mode, .. } => mode,
            other => panic!("{:?}", other),
        };
        assert_eq!(mode("a*"), RepeatMode::Greedy);
        assert_eq!(mode("a+?"), RepeatMode::Lazy);
        assert_eq!(mode("a{1,2}+"), RepeatMode::Possessive);
    }

    #[test]
    fn malformed_brace_is_literal() {
        assert_eq!(root("a{"), lit("a{"));
        assert_eq!(root("a{}"), lit("a{}"));
        assert_eq!(root("a{x}"), lit("a{x}"));
    }

    #[test]
    fn escapes_to_classes() {
        assert_eq!(
            root(r"\d"),
            AstNode::CharClass {
                kind: ClassKind::Digit,
                negated: false
            }
        );
        assert_eq!(
            root(r"\W"),
            AstNode::CharClass {
                kind: ClassKind::Word,
                negated: true
            }
        );
        assert_eq!(
            root(r"\S"),
            AstNode::CharClass {
                kind: ClassKind::Space,
                negated: true
            }
        );
    }

    #[test]
    fn char_escapes() {
        assert_eq!(root(r"\n\t"), lit("\n\t"));
        assert_eq!(root(r"\x41é"), lit("Aé"));
        assert_eq!(root(r"\0"), lit("\0"));
        assert_eq!(root(r"\q"), lit("q"));
    }

    #[test]
    fn capturing_groups_numbered_by_open_paren() {
        let pattern = parse("((a)(?:b)(?P<c>c))").unwrap();
        assert_eq!(pattern.groups.count(), 3);
        assert_eq!(pattern.groups.name(3), Some("c"));
        match pattern.root {
            AstNode::Group { index: 1, ref node, .. } => match node.as_ref() {
                AstNode::Concat(children) => {
                    assert!(matches!(children[0], AstNode::Group { index: 2, .. }));
                    assert!(matches!(children[1], AstNode::NonCapturingGroup { .. }));
                    assert!(matches!(children[2], AstNode::Group { index: 3, .. }));
                }
                other => panic!("{:?}", other),
            },
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn backreference_forms() {
        assert_eq!(
            root(r"(a)\1"),
            AstNode::Concat(vec![
                AstNode::Group {
                    index: 1,
                    name: None,
                    node: Box::new(lit("a")),
                },
                AstNode::Backreference(GroupRef::Index(1)),
            ])
        );
        let named = root("(?P<foo>x)(?P=foo)");
        assert!(matches!(
            named,
            AstNode::Concat(ref c)
                if c[1] == AstNode::Backreference(GroupRef::Name("foo".to_string()))
        ));
        let g_index = root(r"(x)\g<1>");
        assert!(matches!(
            g_index,
            AstNode::Concat(ref c) if c[1] == AstNode::Backreference(GroupRef::Index(1))
        ));
        let g_name = root(r"(?P<n>x)\g<n>");
        assert!(matches!(
            g_name,
            AstNode::Concat(ref c)
                if c[1] == AstNode::Backreference(GroupRef::Name("n".to_string()))
        ));
    }

    #[test]
    fn forward_backreference_parses() {
        assert!(parse(r"\1(a)").is_ok());
    }

    #[test]
    fn set_items() {
        assert_eq!(
            root(r"[]a-c\d-]"),
            AstNode::CharSet {
                items: vec![
                    SetItem::Literal(']'),
                    SetItem::Range('a', 'c'),
                    SetItem::Class {
                        kind: ClassKind::Digit,
                        negated: false
                    },
                    SetItem::Literal('-'),
                ],
                negated: false,
                case_insensitive: false,
            }
        );
        assert!(matches!(
            root("[^]x]"),
            AstNode::CharSet { negated: true, ref items, .. } if items.len() == 2
        ));
        assert!(matches!(
            root(r"[\]]"),
            AstNode::CharSet { ref items, .. } if items == &[SetItem::Literal(']')]
        ));
    }

    #[test]
    fn scoped_flags_mark_sets() {
        match root("(?i:[^a])[^a]") {
            AstNode::Concat(children) => {
                let AstNode::NonCapturingGroup { ref node } = children[0] else {
                    panic!("{:?}", children[0]);
                };
                assert!(matches!(**node, AstNode::CharSet { case_insensitive: true, .. }));
                assert!(matches!(
                    children[1],
                    AstNode::CharSet { case_insensitive: false, .. }
                ));
            }
            other => panic!("{:?}", other),
        }
        assert!(matches!(root("(?i)[a]"), AstNode::CharSet { case_insensitive: true, .. }));
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(root("a(?#note)b"), lit("ab"));
    }

    #[test]
    fn empty_alternatives_are_legal() {
        assert_eq!(root("a|"), AstNode::Alternation(vec![lit("a"), AstNode::Concat(vec![])]));
        assert!(parse("()").is_ok());
    }

    #[test]
    fn lookaround_and_atomic_parse() {
        assert!(matches!(root("(?=a)"), AstNode::Lookahead { positive: true, .. }));
        assert!(matches!(root("(?!a)"), AstNode::Lookahead { positive: false, .. }));
        assert!(matches!(root("(?<=a)"), AstNode::Lookbehind { positive: true, .. }));
        assert!(matches!(root("(?<!a)"), AstNode::Lookbehind { positive: false, .. }));
        assert!(matches!(root("(?>a)"), AstNode::Atomic { .. }));
    }

    #[test]
    fn syntax_errors_carry_position() {
        assert_eq!(syntax_error("ab(c").position, 2);
        assert_eq!(syntax_error("abc)").position, 3);
        assert_eq!(syntax_error("a[bc").position, 1);
        assert_eq!(syntax_error("*a").position, 0);
        assert_eq!(syntax_error("a|*").position, 2);
        assert_eq!(syntax_error("a**").position, 2);
        assert_eq!(syntax_error("^*").position, 1);
        assert_eq!(syntax_error("{2}").position, 0);
        assert_eq!(syntax_error("a{3,1}").position, 1);
        assert_eq!(syntax_error("[z-a]").position, 1);
        assert_eq!(syntax_error(r"ab\").position, 2);
    }

    #[test]
    fn unknown_backreference_targets_are_rejected() {
        assert_eq!(syntax_error(r"(a)\2").position, 3);
        assert_eq!(syntax_error("(?P=nope)").position, 0);
        assert_eq!(syntax_error(r"(a)\g<bar>").position, 3);
    }

    #[test]
    fn duplicate_group_names_are_rejected() {
        let err = syntax_error("(?P<a>x)(?P<a>y)");
        assert_eq!(err.position, 8);
        assert!(err.message.contains("redefinition"));
    }

    #[test]
    fn multiline_flag_selects_line_anchors() {
        assert_eq!(
            root("^a$"),
            AstNode::Concat(vec![
                AstNode::Anchor(AnchorKind::Start),
                lit("a"),
                AstNode::Anchor(AnchorKind::End),
            ])
        );
        assert_eq!(
            root(r"(?m)^a$\Z"),
            AstNode::Concat(vec![
                AstNode::Anchor(AnchorKind::LineStart),
                lit("a"),
                AstNode::Anchor(AnchorKind::LineEnd),
                AstNode::Anchor(AnchorKind::End),
            ])
        );
        match root("(?m:^)^") {
            AstNode::Concat(children) => {
                assert_eq!(children[1], AstNode::Anchor(AnchorKind::Start));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn verbose_flag_is_unsupported() {
        assert!(matches!(parse("(?x)a b"), Err(Error::Unsupported { .. })));
    }
}
