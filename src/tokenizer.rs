//! Schema text → flat definition tokens.
//!
//! A small state machine over lexemes, anchored on the five declaration
//! keywords. Each recognised declaration becomes one `TokenizedDefinition`
//! whose entries are whitespace-free field signatures
//! (`posts(keyword:String,limit:Int!):[Post!]!`) or bare member labels.
//! Anything outside a recognised declaration (`schema { .. }`, `scalar X`) is
//! skipped.
pub mod lexer;

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::ir::RootOperationKind;
use lexer::{Lexeme, Spanned};

/// Joins the parts of a tokenized definition in its flat form.
pub const DELIM: &str = "::";

pub const DECLARATION_KEYWORDS: [&str; 5] = ["type", "input", "enum", "interface", "union"];

/// Top-level keywords that are skipped but still end an open union.
const SKIPPED_KEYWORDS: [&str; 3] = ["scalar", "schema", "extend"];

const IMPLEMENTS: &str = "implements";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedDefinition {
    pub kind: String,
    pub label: String,
    pub entries: Vec<String>,
    pub line: usize,
}

impl TokenizedDefinition {
    /// `[kind, label, entry_1, entry_2, ...]`
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [self.kind.as_str(), self.label.as_str()]
            .into_iter()
            .chain(self.entries.iter().map(String::as_str))
    }

    pub fn root_operation(&self) -> Option<RootOperationKind> {
        RootOperationKind::from_label(&self.label)
    }
}

impl fmt::Display for TokenizedDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts().enumerate() {
            if i > 0 {
                f.write_str(DELIM)?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenized {
    pub definitions: Vec<TokenizedDefinition>,     // source order
    pub root_operations: Vec<TokenizedDefinition>, // Query / Mutation / Subscription
    pub non_scalars: Vec<TokenizedDefinition>,     // everything else
}

impl Tokenized {
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = crate::io::read_schema(path)?;
        tokenize(&source)
    }

    pub fn is_empty(&self) -> bool {
        self.root_operations.is_empty() && self.non_scalars.is_empty()
    }
}

pub fn tokenize(source: &str) -> Result<Tokenized> {
    let source = lexer::strip_markers(source);
    let lexemes = lexer::lex(&source)?;
    let definitions = DefinitionMachine::default().run(&lexemes)?;

    let (root_operations, non_scalars): (Vec<_>, Vec<_>) = definitions
        .iter()
        .cloned()
        .partition(|def| def.root_operation().is_some());

    tracing::debug!(
        definitions = definitions.len(),
        root_operations = root_operations.len(),
        non_scalars = non_scalars.len(),
        "tokenized schema"
    );

    Ok(Tokenized { definitions, root_operations, non_scalars })
}

// ————————————————————————————————————————————————————————————————————————————
// STATE MACHINE
// ————————————————————————————————————————————————————————————————————————————

/// Progress through one type signature (`[Post!]!`).
#[derive(Debug, Default, Clone, Copy)]
struct TypeCursor {
    expecting: bool,
    brackets: usize,
    done: bool,
}

impl TypeCursor {
    fn start() -> Self {
        TypeCursor { expecting: true, brackets: 0, done: false }
    }

    fn in_progress(&self) -> bool {
        self.expecting && !self.done
    }

    fn name(&mut self) {
        if self.brackets == 0 {
            self.done = true;
        }
    }

    fn open(&mut self) -> bool {
        if !self.in_progress() {
            return false;
        }
        self.brackets += 1;
        true
    }

    fn close(&mut self) -> bool {
        if !self.in_progress() || self.brackets == 0 {
            return false;
        }
        self.brackets -= 1;
        if self.brackets == 0 {
            self.done = true;
        }
        true
    }
}

/// One field entry of an input / interface / object block.
#[derive(Debug, Default)]
struct FieldEntry {
    text: String,
    parens: usize,
    field: TypeCursor,
    argument: TypeCursor,
}

impl FieldEntry {
    fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        *self = FieldEntry::default();
        text
    }
}

#[derive(Debug)]
struct Pending {
    kind: String,
    label: String,
    entries: Vec<String>,
    line: usize,
    implementing: bool, // inside `implements A & B`
}

impl Pending {
    fn finish(self) -> TokenizedDefinition {
        TokenizedDefinition { kind: self.kind, label: self.label, entries: self.entries, line: self.line }
    }
}

#[derive(Debug)]
enum State {
    Seeking { depth: usize },
    Label { kind: String, line: usize },
    Header(Pending),
    Fields(Pending, FieldEntry),
    Members(Pending),
    UnionMembers { def: Pending, expect_member: bool },
}

enum Step {
    Next,
    Reprocess,
}

#[derive(Debug)]
struct DefinitionMachine {
    state: State,
    out: Vec<TokenizedDefinition>,
}

impl Default for DefinitionMachine {
    fn default() -> Self {
        Self { state: State::Seeking { depth: 0 }, out: Vec::new() }
    }
}

impl DefinitionMachine {
    fn run(mut self, lexemes: &[Spanned<'_>]) -> Result<Vec<TokenizedDefinition>> {
        let mut i = 0;
        while let Some(spanned) = lexemes.get(i) {
            match self.step(*spanned)? {
                Step::Next => i += 1,
                Step::Reprocess => {}
            }
        }
        self.finish_input()?;
        Ok(self.out)
    }

    fn step(&mut self, spanned: Spanned<'_>) -> Result<Step> {
        let Spanned { lexeme, line } = spanned;
        let state = std::mem::replace(&mut self.state, State::Seeking { depth: 0 });

        self.state = match state {
            State::Seeking { depth } => match lexeme {
                Lexeme::Name(name) if depth == 0 && is_declaration_keyword(name) => {
                    State::Label { kind: name.to_string(), line }
                }
                Lexeme::Punct('{') => State::Seeking { depth: depth + 1 },
                Lexeme::Punct('}') => State::Seeking { depth: depth.saturating_sub(1) },
                _ => State::Seeking { depth },
            },

            State::Label { kind, line: start } => match lexeme {
                Lexeme::Name(label) => State::Header(Pending {
                    kind,
                    label: label.to_string(),
                    entries: Vec::new(),
                    line: start,
                    implementing: false,
                }),
                _ => return Err(Error::malformed(line, format!("expected a name after `{kind}`"))),
            },

            State::Header(def) => self.header(def, lexeme, line)?,

            State::Fields(def, entry) => self.fields(def, entry, lexeme, line)?,

            State::Members(mut def) => match lexeme {
                Lexeme::Name(member) => {
                    def.entries.push(member.to_string());
                    State::Members(def)
                }
                Lexeme::Punct(',') => State::Members(def),
                Lexeme::Punct('}') => {
                    self.out.push(def.finish());
                    State::Seeking { depth: 0 }
                }
                Lexeme::Punct(c) => {
                    return Err(Error::malformed(line, format!("unexpected `{c}` in enum `{}`", def.label)));
                }
            },

            State::UnionMembers { mut def, expect_member } => match lexeme {
                Lexeme::Name(member) if expect_member => {
                    def.entries.push(member.to_string());
                    State::UnionMembers { def, expect_member: false }
                }
                Lexeme::Punct('|') if expect_member && !def.entries.is_empty() => {
                    return Err(Error::malformed(line, format!("empty member in union `{}`", def.label)));
                }
                Lexeme::Punct('|') => State::UnionMembers { def, expect_member: true },
                _ if expect_member => {
                    return Err(Error::malformed(line, format!("union `{}` is missing a member", def.label)));
                }
                Lexeme::Name(name) if is_declaration_keyword(name) || is_skipped_keyword(name) => {
                    // the next top-level declaration closes the union
                    self.out.push(def.finish());
                    self.state = State::Seeking { depth: 0 };
                    return Ok(Step::Reprocess);
                }
                Lexeme::Name(name) => {
                    return Err(Error::malformed(
                        line,
                        format!("expected `|` before `{name}` in union `{}`", def.label),
                    ));
                }
                Lexeme::Punct(c) => {
                    return Err(Error::malformed(line, format!("unexpected `{c}` in union `{}`", def.label)));
                }
            },
        };

        Ok(Step::Next)
    }

    fn header(&mut self, mut def: Pending, lexeme: Lexeme<'_>, line: usize) -> Result<State> {
        let keyword = def.kind.to_ascii_lowercase();
        let state = match (keyword.as_str(), lexeme) {
            ("union", Lexeme::Punct('=')) => State::UnionMembers { def, expect_member: true },
            ("enum", Lexeme::Punct('{')) => State::Members(def),
            ("union", _) => {
                return Err(Error::malformed(line, format!("expected `=` after union `{}`", def.label)));
            }
            (_, Lexeme::Punct('{')) => State::Fields(def, FieldEntry::default()),
            // `implements A & B`
            ("type" | "interface", Lexeme::Name(name)) if !def.implementing && name.eq_ignore_ascii_case(IMPLEMENTS) => {
                def.implementing = true;
                State::Header(def)
            }
            ("type" | "interface", Lexeme::Name(name)) if def.implementing && !is_declaration_keyword(name) => {
                State::Header(def)
            }
            ("type" | "interface", Lexeme::Punct('&')) if def.implementing => State::Header(def),
            _ => {
                return Err(Error::malformed(line, format!("expected `{{` to open `{}`", def.label)));
            }
        };
        Ok(state)
    }

    fn fields(&mut self, mut def: Pending, mut entry: FieldEntry, lexeme: Lexeme<'_>, line: usize) -> Result<State> {
        let unexpected = |what: &str, def: &Pending| {
            Error::malformed(line, format!("unexpected {what} in `{}`", def.label))
        };

        match lexeme {
            Lexeme::Name(name) if entry.parens > 0 => {
                if entry.argument.done {
                    entry.text.push(',');
                    entry.argument = TypeCursor::default();
                }
                if entry.argument.in_progress() {
                    entry.argument.name();
                } else if entry.argument.expecting || !entry.text.ends_with(['(', ',']) {
                    return Err(unexpected(&format!("`{name}`"), &def));
                }
                entry.text.push_str(name);
            }
            Lexeme::Name(name) => {
                if entry.field.done {
                    def.entries.push(entry.take());
                } else if entry.field.in_progress() {
                    entry.field.name();
                } else if !entry.text.is_empty() {
                    return Err(unexpected(&format!("`{name}`"), &def));
                }
                entry.text.push_str(name);
            }
            Lexeme::Punct(':') => {
                if entry.parens > 0 {
                    if entry.argument.expecting || entry.text.ends_with(['(', ',']) {
                        return Err(unexpected("`:`", &def));
                    }
                    entry.argument = TypeCursor::start();
                } else {
                    if entry.field.expecting || entry.text.is_empty() {
                        return Err(unexpected("`:`", &def));
                    }
                    entry.field = TypeCursor::start();
                }
                entry.text.push(':');
            }
            Lexeme::Punct('[') => {
                let opened = if entry.parens > 0 { entry.argument.open() } else { entry.field.open() };
                if !opened {
                    return Err(unexpected("`[`", &def));
                }
                entry.text.push('[');
            }
            Lexeme::Punct(']') => {
                let closed = if entry.parens > 0 { entry.argument.close() } else { entry.field.close() };
                if !closed {
                    return Err(unexpected("`]`", &def));
                }
                entry.text.push(']');
            }
            Lexeme::Punct('!') => {
                let cursor = if entry.parens > 0 { &entry.argument } else { &entry.field };
                if !cursor.expecting || entry.text.ends_with(['!', '[', ':']) {
                    return Err(unexpected("`!`", &def));
                }
                entry.text.push('!');
            }
            Lexeme::Punct('(') => {
                if entry.parens > 0 || entry.field.expecting || entry.text.is_empty() {
                    return Err(unexpected("`(`", &def));
                }
                entry.parens += 1;
                entry.argument = TypeCursor::default();
                entry.text.push('(');
            }
            Lexeme::Punct(')') => {
                if entry.parens == 0 || entry.argument.in_progress() {
                    return Err(unexpected("`)`", &def));
                }
                entry.parens -= 1;
                entry.text.push(')');
            }
            Lexeme::Punct(',') if entry.parens > 0 => {
                if entry.argument.done {
                    entry.text.push(',');
                    entry.argument = TypeCursor::default();
                } else if entry.argument.expecting {
                    return Err(unexpected("`,`", &def));
                }
            }
            Lexeme::Punct(',') => {
                if entry.field.done {
                    def.entries.push(entry.take());
                }
            }
            Lexeme::Punct('}') if entry.parens == 0 => {
                if !entry.text.is_empty() {
                    if !entry.field.done {
                        return Err(Error::malformed(
                            line,
                            format!("field `{}` in `{}` has no type", entry.text, def.label),
                        ));
                    }
                    def.entries.push(entry.take());
                }
                self.out.push(def.finish());
                return Ok(State::Seeking { depth: 0 });
            }
            Lexeme::Punct(c) => return Err(unexpected(&format!("`{c}`"), &def)),
        }

        Ok(State::Fields(def, entry))
    }

    fn finish_input(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Seeking { depth: 0 });
        match state {
            State::Seeking { .. } => Ok(()),
            State::UnionMembers { def, expect_member: false } => {
                self.out.push(def.finish());
                Ok(())
            }
            State::Label { kind, line } => {
                Err(Error::malformed(line, format!("`{kind}` is missing its name")))
            }
            State::Header(def)
            | State::Fields(def, _)
            | State::Members(def)
            | State::UnionMembers { def, .. } => {
                Err(Error::malformed(def.line, format!("definition `{}` is not terminated", def.label)))
            }
        }
    }
}

fn is_declaration_keyword(name: &str) -> bool {
    DECLARATION_KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(name))
}

fn is_skipped_keyword(name: &str) -> bool {
    SKIPPED_KEYWORDS.iter().any(|keyword| keyword.eq_ignore_ascii_case(name))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
