//! Strict parsers for the scraped collection literals
//!
//! The scrape stores post-treatment tags as a list literal
//! (`['Sherry Cask', 'Port Finish']`) and each sensory dimension as a
//! dictionary literal (`{'smoke': 8, 'peat': 9.5}`). These are parsed
//! with an explicit recursive-descent scanner over exactly that grammar;
//! anything else is a [`MalformedRecord`](Error::MalformedRecord). No
//! input is ever evaluated as code.

use drammatch_core::{Error, NoteMap, Result};

/// Parse a tag-list literal. Tag identity is the exact string as written;
/// no fuzzy merging of near-duplicate spellings.
pub fn parse_tag_list(field: &str, input: &str) -> Result<Vec<String>> {
    let mut scanner = Scanner::new(field, input);
    scanner.skip_ws();
    scanner.expect('[')?;

    let mut tags = Vec::new();
    scanner.skip_ws();
    if scanner.eat(']') {
        scanner.expect_end()?;
        return Ok(tags);
    }

    loop {
        scanner.skip_ws();
        tags.push(scanner.parse_string()?);
        scanner.skip_ws();
        if scanner.eat(']') {
            break;
        }
        scanner.expect(',')?;
    }
    scanner.expect_end()?;
    Ok(tags)
}

/// Parse a note-dictionary literal: attribute name → 0–10 score.
///
/// A trailing `:` on an attribute name (a scrape artifact) is stripped so
/// the same attribute reported with and without it aggregates into one
/// composite. Duplicate keys keep the last value.
pub fn parse_note_map(field: &str, input: &str) -> Result<NoteMap> {
    let mut scanner = Scanner::new(field, input);
    scanner.skip_ws();
    scanner.expect('{')?;

    let mut notes = NoteMap::new();
    scanner.skip_ws();
    if scanner.eat('}') {
        scanner.expect_end()?;
        return Ok(notes);
    }

    loop {
        scanner.skip_ws();
        let raw_key = scanner.parse_string()?;
        let key = raw_key.trim().trim_end_matches(':').to_string();
        if key.is_empty() {
            return Err(Error::malformed(field, "empty attribute name"));
        }
        scanner.skip_ws();
        scanner.expect(':')?;
        scanner.skip_ws();
        let score = scanner.parse_number()?;
        if !(0.0..=10.0).contains(&score) {
            return Err(Error::malformed(
                field,
                format!("score {} for '{}' outside [0, 10]", score, key),
            ));
        }
        notes.insert(key, score);
        scanner.skip_ws();
        if scanner.eat('}') {
            break;
        }
        scanner.expect(',')?;
    }
    scanner.expect_end()?;
    Ok(notes)
}

struct Scanner<'a> {
    field: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(field: &'a str, input: &str) -> Self {
        Self {
            field,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    /// Fails on any trailing non-whitespace after the literal.
    fn expect_end(&mut self) -> Result<()> {
        self.skip_ws();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected trailing '{}'", c))),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            Some(c) => return Err(self.error(format!("expected quoted string, found '{}'", c))),
            None => return Err(self.error("expected quoted string, found end of input")),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('\\') => out.push('\\'),
                    Some('\'') => out.push('\''),
                    Some('"') => out.push('"'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => {
                        return Err(self.error(format!("unknown escape '\\{}'", c)));
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected number, found '{}'", c)),
                None => self.error("expected number, found end of input"),
            });
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map_err(|_| self.error(format!("invalid number '{}'", text)))
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(
            self.field,
            format!("{} at position {}", reason.into(), self.pos),
        )
    }
}
