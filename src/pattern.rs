//! Parameter-token grammar.
//!
//! Splits a route pattern into literal text and parameter tokens. The
//! grammar is the classic `path-to-regexp` one used by most JavaScript
//! routers:
//!
//! | Syntax            | Meaning                                          |
//! |-------------------|--------------------------------------------------|
//! | `/:id`            | required parameter, one segment                  |
//! | `/:id?`           | optional parameter                               |
//! | `/:path+`         | one or more segments, joined with `/`            |
//! | `/:path*`         | zero or more segments                            |
//! | `/:id(\d+)`       | parameter with a custom value pattern            |
//! | `/(\d+)`          | unnamed parameter, named by position (`"0"`)     |
//! | `/*`              | unnamed wildcard, matches anything (`.*`)        |
//! | `\:`              | escaped literal character                        |
//!
//! A `/` or `.` directly before a parameter is its *prefix*: it belongs to
//! the token, so an optional parameter takes its separator with it.
//!
//! # Examples
//!
//! ```
//! use route_match::pattern::{parse, CaptureKind, Token};
//!
//! let tokens = parse("/users/:id?").unwrap();
//! assert_eq!(tokens.len(), 2);
//! assert!(matches!(&tokens[0], Token::Literal(text) if text == "/users"));
//!
//! let Token::Param(param) = &tokens[1] else { panic!("expected a parameter") };
//! assert_eq!(param.name, "id");
//! assert_eq!(param.prefix, Some('/'));
//! assert_eq!(param.kind, CaptureKind::Optional);
//! ```

use crate::error::{MatchError, Result};

/// How many values a parameter token captures.
///
/// Parsed once from the token's modifier character so nothing downstream
/// has to look at `?`, `+` or `*` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    /// No modifier: exactly one value
    Required,
    /// `?`: zero or one value
    Optional,
    /// `+`: one or more values joined by the prefix
    OneOrMore,
    /// `*`: zero or more values joined by the prefix
    ZeroOrMore,
}

impl CaptureKind {
    fn from_modifier(modifier: char) -> Option<Self> {
        match modifier {
            '?' => Some(CaptureKind::Optional),
            '+' => Some(CaptureKind::OneOrMore),
            '*' => Some(CaptureKind::ZeroOrMore),
            _ => None,
        }
    }

    /// Whether the token may be absent from a matching path.
    pub const fn is_optional(self) -> bool {
        matches!(self, CaptureKind::Optional | CaptureKind::ZeroOrMore)
    }

    /// Whether the token may span several delimiter-separated values.
    pub const fn is_repeating(self) -> bool {
        matches!(self, CaptureKind::OneOrMore | CaptureKind::ZeroOrMore)
    }
}

/// A parameter placeholder parsed out of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamToken {
    /// Parameter name; positional index for unnamed groups and wildcards
    pub name: String,
    /// `/` or `.` directly preceding the token
    pub prefix: Option<char>,
    /// Regular expression a single value must match
    pub pattern: String,
    pub kind: CaptureKind,
    /// Followed by text other than its own prefix, e.g. `/:a-:b`
    pub partial: bool,
}

/// One piece of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text that must appear verbatim (escapes already resolved)
    Literal(String),
    /// Parameter placeholder
    Param(ParamToken),
}

const PREFIXES: [char; 2] = ['/', '.'];

/// Parse a pattern into tokens.
///
/// Fails with [`MatchError::PatternSyntax`] on a `:` with no name, a
/// dangling `\`, and unbalanced, empty or capturing custom groups.
pub fn parse(pattern: &str) -> Result<Vec<Token>> {
    Scanner::new(pattern).run()
}

/// Cursor over the pattern's characters, keeping byte offsets for errors.
struct Scanner<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    unnamed: usize,
    literal: String,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            unnamed: 0,
            literal: String::new(),
            tokens: Vec::new(),
        }
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).map(|&(_, c)| c)
    }

    fn offset(&self, pos: usize) -> usize {
        self.chars
            .get(pos)
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn error(&self, pos: usize, message: &str) -> MatchError {
        MatchError::syntax(self.source, self.offset(pos), message)
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek_at(self.pos) {
            if c == '\\' {
                let escaped = self
                    .peek_at(self.pos + 1)
                    .ok_or_else(|| self.error(self.pos, "unexpected end of pattern after '\\'"))?;
                self.literal.push(escaped);
                self.pos += 2;
                continue;
            }

            let (prefix, start) = if PREFIXES.contains(&c) && self.starts_param(self.pos + 1) {
                (Some(c), self.pos + 1)
            } else {
                (None, self.pos)
            };

            if self.starts_param(start) {
                self.param(prefix, start)?;
            } else {
                self.literal.push(c);
                self.pos += 1;
            }
        }

        self.flush_literal();
        Ok(self.tokens)
    }

    fn starts_param(&self, pos: usize) -> bool {
        matches!(self.peek_at(pos), Some(':' | '(' | '*'))
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.tokens
                .push(Token::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn next_unnamed(&mut self) -> String {
        let name = self.unnamed.to_string();
        self.unnamed += 1;
        name
    }

    fn param(&mut self, prefix: Option<char>, start: usize) -> Result<()> {
        let delimiter = prefix.unwrap_or('/');
        let default_pattern = format!("[^{}]+?", escape_literal(&delimiter.to_string()));
        let mut pos = start;

        let (name, pattern, kind) = match self.peek_at(pos) {
            Some('*') => {
                // Bare wildcard; takes no modifier
                pos += 1;
                (self.next_unnamed(), ".*".to_string(), CaptureKind::Required)
            }
            Some(':') => {
                pos += 1;
                let name_start = pos;
                while self
                    .peek_at(pos)
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    pos += 1;
                }
                if pos == name_start {
                    return Err(self.error(start, "missing parameter name"));
                }
                let name: String = self.chars[name_start..pos].iter().map(|&(_, c)| c).collect();
                let pattern = if self.peek_at(pos) == Some('(') {
                    let (group, end) = self.group(pos)?;
                    pos = end;
                    group
                } else {
                    default_pattern
                };
                let (kind, end) = self.modifier(pos);
                pos = end;
                (name, pattern, kind)
            }
            _ => {
                let (group, end) = self.group(pos)?;
                let (kind, end) = self.modifier(end);
                pos = end;
                (self.next_unnamed(), group, kind)
            }
        };

        let partial =
            prefix.is_some() && self.peek_at(pos).is_some_and(|next| Some(next) != prefix);

        self.flush_literal();
        self.tokens.push(Token::Param(ParamToken {
            name,
            prefix,
            pattern,
            kind,
            partial,
        }));
        self.pos = pos;
        Ok(())
    }

    fn modifier(&self, pos: usize) -> (CaptureKind, usize) {
        match self.peek_at(pos).and_then(CaptureKind::from_modifier) {
            Some(kind) => (kind, pos + 1),
            None => (CaptureKind::Required, pos),
        }
    }

    /// Read a `( ... )` group starting at `open`; returns its body and the
    /// position after the closing parenthesis.
    fn group(&self, open: usize) -> Result<(String, usize)> {
        let mut pos = open + 1;
        let mut depth = 1;
        let mut body = String::new();

        if self.peek_at(pos) == Some('?') {
            return Err(self.error(pos, "pattern cannot start with '?'"));
        }

        while let Some(c) = self.peek_at(pos) {
            match c {
                '\\' => {
                    let escaped = self
                        .peek_at(pos + 1)
                        .ok_or_else(|| self.error(pos, "unexpected end of pattern after '\\'"))?;
                    body.push(c);
                    body.push(escaped);
                    pos += 2;
                    continue;
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        pos += 1;
                        break;
                    }
                }
                '(' => {
                    depth += 1;
                    if self.peek_at(pos + 1) != Some('?') {
                        return Err(self.error(pos, "capturing groups are not allowed"));
                    }
                }
                _ => {}
            }
            body.push(c);
            pos += 1;
        }

        if depth > 0 {
            return Err(self.error(open, "unbalanced pattern"));
        }
        if body.is_empty() {
            return Err(self.error(open, "missing pattern"));
        }
        Ok((body, pos))
    }
}

/// Escape regex metacharacters in literal text.
pub(crate) fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
