// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsers for the plain-text input formats.
//!
//! Translations are written one per line, as `lang: text`.
//!
//! Bulk imports are stanzas of `field: value` lines separated by blank
//! lines. The first field of a stanza names its kind and carries its text:
//!
//! ```text
//! word: run
//! pos: verb
//! level: 1
//! de: laufen
//!
//! example: I run every morning.
//! de: Ich laufe jeden Morgen.
//! ```
//!
//! A malformed stanza does not stop the import: it is reported as skipped,
//! with the reason, and parsing continues with the next one.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::translation::Translation;

#[derive(Debug)]
pub struct ParserError {
    pub message: String,
    pub source_path: String,
    pub line_num: usize,
}

impl ParserError {
    fn new(message: impl Into<String>, source_path: &str, line_num: usize) -> Self {
        ParserError {
            message: message.into(),
            source_path: source_path.to_string(),
            line_num,
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Location: {}:{}",
            self.message,
            self.source_path,
            self.line_num + 1
        )
    }
}

impl Error for ParserError {}

/// Parse `lang: text` lines. Blank lines are ignored.
pub fn parse_translations(source_path: &str, text: &str) -> Result<Vec<Translation>, ParserError> {
    let mut translations = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        match Line::read(line) {
            Line::Blank => {}
            Line::Field { key, value } if is_language(&key) && !value.is_empty() => {
                translations.push(Translation::new(key, value));
            }
            Line::Field { .. } | Line::Text => {
                return Err(ParserError::new(
                    "Expected a line like `lang: text`.",
                    source_path,
                    line_num,
                ));
            }
        }
    }
    Ok(translations)
}

/// Format translations the way [`parse_translations`] reads them.
pub fn format_translations(translations: &[Translation]) -> String {
    translations
        .iter()
        .map(|t| format!("{}: {}", t.language, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A language code: two or three lowercase ASCII letters, with an optional
/// region such as `pt-br`.
fn is_language(key: &str) -> bool {
    let (lang, region) = match key.split_once('-') {
        Some((lang, region)) => (lang, Some(region)),
        None => (key, None),
    };
    let lowercase = |s: &str| s.chars().all(|c| c.is_ascii_lowercase());
    (2..=3).contains(&lang.len())
        && lowercase(lang)
        && region.is_none_or(|r| (2..=4).contains(&r.len()) && lowercase(r))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Word,
    Example,
}

impl RowKind {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "word" => Some(RowKind::Word),
            "example" => Some(RowKind::Example),
            _ => None,
        }
    }
}

/// One stanza that parsed cleanly.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportRow {
    pub kind: RowKind,
    pub text: String,
    pub lemma: Option<String>,
    pub part_of_speech: Option<String>,
    pub level: Option<u32>,
    pub translations: Vec<Translation>,
    /// Line of the stanza's first field.
    pub line_num: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The first field is neither `word` nor `example`.
    UnknownKind(String),
    /// The first field has no value.
    MissingText,
    UnknownField(String),
    DuplicateField(String),
    /// `level` is not a non-negative integer.
    NotANumber(String),
    /// A line without a colon.
    MalformedLine(usize),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownKind(key) => write!(f, "unknown entry kind `{key}`"),
            SkipReason::MissingText => write!(f, "entry has no text"),
            SkipReason::UnknownField(key) => write!(f, "unknown field `{key}`"),
            SkipReason::DuplicateField(key) => write!(f, "field `{key}` appears twice"),
            SkipReason::NotANumber(value) => write!(f, "`{value}` is not a number"),
            SkipReason::MalformedLine(line_num) => {
                write!(f, "line {} is not a `field: value` line", line_num + 1)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportBlock {
    Row(ImportRow),
    Skipped { line_num: usize, reason: SkipReason },
}

enum State {
    /// Between stanzas.
    Initial,
    /// Reading the fields of a stanza.
    ReadingBlock {
        fields: Vec<(String, String)>,
        malformed: Option<usize>,
        start_line: usize,
    },
}

enum Line {
    /// An empty or all-whitespace line.
    Blank,
    /// A line like `key: value`.
    Field { key: String, value: String },
    /// Any other line.
    Text,
}

impl Line {
    fn read(line: &str) -> Self {
        if line.trim().is_empty() {
            return Line::Blank;
        }
        match line.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() && !key.trim().contains(' ') => {
                Line::Field {
                    key: key.trim().to_lowercase(),
                    value: value.trim().to_string(),
                }
            }
            _ => Line::Text,
        }
    }
}

/// Parse a bulk-import file into rows and skipped stanzas, in file order.
pub fn parse_import(text: &str) -> Vec<ImportBlock> {
    let mut blocks = Vec::new();
    let mut state = State::Initial;
    for (line_num, line) in text.lines().enumerate() {
        state = parse_line(state, Line::read(line), line_num, &mut blocks);
    }
    if let State::ReadingBlock {
        fields,
        malformed,
        start_line,
    } = state
    {
        blocks.push(finish_block(fields, malformed, start_line));
    }
    blocks
}

fn parse_line(state: State, line: Line, line_num: usize, blocks: &mut Vec<ImportBlock>) -> State {
    match state {
        State::Initial => match line {
            Line::Blank => State::Initial,
            Line::Field { key, value } => State::ReadingBlock {
                fields: vec![(key, value)],
                malformed: None,
                start_line: line_num,
            },
            Line::Text => State::ReadingBlock {
                fields: Vec::new(),
                malformed: Some(line_num),
                start_line: line_num,
            },
        },
        State::ReadingBlock {
            mut fields,
            malformed,
            start_line,
        } => match line {
            Line::Blank => {
                // The stanza is over.
                blocks.push(finish_block(fields, malformed, start_line));
                State::Initial
            }
            Line::Field { key, value } => {
                fields.push((key, value));
                State::ReadingBlock {
                    fields,
                    malformed,
                    start_line,
                }
            }
            Line::Text => State::ReadingBlock {
                fields,
                malformed: malformed.or(Some(line_num)),
                start_line,
            },
        },
    }
}

fn finish_block(
    fields: Vec<(String, String)>,
    malformed: Option<usize>,
    start_line: usize,
) -> ImportBlock {
    match build_row(fields, malformed, start_line) {
        Ok(row) => ImportBlock::Row(row),
        Err(reason) => ImportBlock::Skipped {
            line_num: start_line,
            reason,
        },
    }
}

fn build_row(
    fields: Vec<(String, String)>,
    malformed: Option<usize>,
    start_line: usize,
) -> Result<ImportRow, SkipReason> {
    if let Some(line_num) = malformed {
        return Err(SkipReason::MalformedLine(line_num));
    }
    let mut fields = fields.into_iter();
    let Some((first_key, text)) = fields.next() else {
        return Err(SkipReason::MissingText);
    };
    let kind = RowKind::from_key(&first_key).ok_or(SkipReason::UnknownKind(first_key))?;
    if text.is_empty() {
        return Err(SkipReason::MissingText);
    }
    let mut row = ImportRow {
        kind,
        text,
        lemma: None,
        part_of_speech: None,
        level: None,
        translations: Vec::new(),
        line_num: start_line,
    };
    let mut seen: HashSet<String> = HashSet::new();
    for (key, value) in fields {
        if !seen.insert(key.clone()) || RowKind::from_key(&key).is_some() {
            return Err(SkipReason::DuplicateField(key));
        }
        match (kind, key.as_str()) {
            (RowKind::Word, "lemma") => row.lemma = Some(value),
            (RowKind::Word, "pos") => row.part_of_speech = Some(value),
            (RowKind::Word, "level") => {
                let level = value.parse().map_err(|_| SkipReason::NotANumber(value))?;
                row.level = Some(level);
            }
            (RowKind::Example, "lemma" | "pos" | "level") => {
                return Err(SkipReason::UnknownField(key.clone()));
            }
            (_, key) if is_language(key) => row.translations.push(Translation::new(key, value)),
            _ => return Err(SkipReason::UnknownField(key.clone())),
        }
    }
    Ok(row)
}
