//! Script block tokenizer
//!
//! Turns the raw text of a block into a flat token stream. The tokenizer knows
//! nothing about styles or triggers beyond their syntax; the interpreter
//! reduces the stream into dialogue.
//!
//! Grammar:
//! - `<name>` opens a tag; while a tag is open any `<...>` closes it
//! - `{*op:command;*}` or `{op:command;}` is a trigger
//! - `\c \g \o \w` set the font colour, `\b` breaks, `\d` disables skipping,
//!   `\+N \-N \=` change the reveal speed, `\*` shakes, `\n` breaks the line
//! - raw line feeds and carriage returns are ignored

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontColor {
    #[default]
    White,
    Blue,
    Green,
    Orange,
}

impl FontColor {
    /// Colour selected by a tag name, if the name is a colour
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "white" => Some(Self::White),
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A printable character
    Char(char),
    /// Contents of `<...>`
    Tag(String),
    Trigger { op: String, command: String },
    /// Broken markup, skipped by the interpreter
    Malformed { text: String, reason: &'static str },
    /// `\X` with an unknown `X`; printed as `X`
    UnknownEscape(char),
    Color(FontColor),
    Break,
    NoSkip,
    SpeedUp(u32),
    SpeedDown(u32),
    SpeedReset,
    Shake,
    LineBreak,
}

/// Split raw block text into tokens
pub fn tokenize(raw: &str) -> Vec<Token> {
    Tokenizer::new(raw).run()
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    fn new(raw: &str) -> Self {
        Self {
            chars: raw.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(&ch) = self.chars.get(self.pos) {
            match ch {
                '<' => self.tag(),
                '{' => self.trigger(),
                '\\' => self.escape(),
                '\n' | '\r' => self.pos += 1,
                _ => {
                    self.tokens.push(Token::Char(ch));
                    self.pos += 1;
                }
            }
        }
        self.tokens
    }

    fn find_from(&self, start: usize, target: char) -> Option<usize> {
        self.chars[start..]
            .iter()
            .position(|&c| c == target)
            .map(|offset| start + offset)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn malformed_rest(&mut self, reason: &'static str) {
        let text = self.text(self.pos, self.chars.len());
        self.tokens.push(Token::Malformed { text, reason });
        self.pos = self.chars.len();
    }

    fn tag(&mut self) {
        let Some(close) = self.find_from(self.pos, '>') else {
            self.malformed_rest("unterminated tag");
            return;
        };
        let name = self.text(self.pos + 1, close).trim().to_ascii_lowercase();
        self.tokens.push(Token::Tag(name));
        self.pos = close + 1;
    }

    fn trigger(&mut self) {
        let Some(close) = self.find_from(self.pos, '}') else {
            self.malformed_rest("unterminated trigger");
            return;
        };
        let body = self.text(self.pos + 1, close);
        self.pos = close + 1;

        let token = match parse_trigger_body(&body) {
            Ok((op, command)) => Token::Trigger { op, command },
            Err(reason) => Token::Malformed {
                text: format!("{{{body}}}"),
                reason,
            },
        };
        self.tokens.push(token);
    }

    fn escape(&mut self) {
        let Some(&code) = self.chars.get(self.pos + 1) else {
            self.malformed_rest("dangling escape");
            return;
        };
        self.pos += 2;

        let token = match code {
            'c' => Token::Color(FontColor::Blue),
            'g' => Token::Color(FontColor::Green),
            'o' => Token::Color(FontColor::Orange),
            'w' => Token::Color(FontColor::White),
            'b' => Token::Break,
            'd' => Token::NoSkip,
            'n' => Token::LineBreak,
            '=' => Token::SpeedReset,
            '*' => Token::Shake,
            '\\' => Token::Char('\\'),
            '+' => Token::SpeedUp(self.count()),
            '-' => Token::SpeedDown(self.count()),
            other => Token::UnknownEscape(other),
        };
        self.tokens.push(token);
    }

    /// Repeat count after `\+` or `\-`, one when no digits follow
    fn count(&mut self) -> u32 {
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return 1;
        }
        self.text(start, self.pos).parse().unwrap_or(u32::MAX)
    }
}

/// Split `*op:command;*` into its op and command
fn parse_trigger_body(body: &str) -> Result<(String, String), &'static str> {
    let inner = body.strip_prefix('*').unwrap_or(body);
    let Some((op, rest)) = inner.split_once(':') else {
        return Err("missing ':' after trigger name");
    };
    let Some((command, tail)) = rest.split_once(';') else {
        return Err("missing ';' after trigger command");
    };
    if !tail.trim().is_empty() && tail.trim() != "*" {
        return Err("unexpected text after ';'");
    }
    let op = op.trim();
    if op.is_empty() {
        return Err("empty trigger name");
    }
    Ok((op.to_string(), command.to_string()))
}
