use std::borrow::Cow;

use crate::error::{Error, Result};

/// Internal field-insertion marker. Removed before lexing, so it never splits a name.
pub const STX: char = '\u{2}';

const PUNCTUATION: &[char] = &['{', '}', '(', ')', '[', ']', ':', ',', '!', '=', '|', '&'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme<'a> {
    Name(&'a str),
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub lexeme: Lexeme<'a>,
    pub line: usize,
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub fn strip_markers(source: &str) -> Cow<'_, str> {
    if source.contains(STX) {
        Cow::Owned(source.replace(STX, ""))
    } else {
        Cow::Borrowed(source)
    }
}

pub fn lex(source: &str) -> Result<Vec<Spanned<'_>>> {
    let mut out = Vec::new();
    let mut line = 1;
    let mut chars = source.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c == '\n' {
            line += 1;
            continue;
        }
        if c.is_whitespace() || c.is_control() || c == '\u{feff}' {
            continue;
        }
        if is_name_start(c) {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !is_name_continue(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            out.push(Spanned { lexeme: Lexeme::Name(&source[start..end]), line });
            continue;
        }
        if PUNCTUATION.contains(&c) {
            out.push(Spanned { lexeme: Lexeme::Punct(c), line });
            continue;
        }
        return Err(Error::malformed(line, format!("unexpected character `{c}`")));
    }

    Ok(out)
}
