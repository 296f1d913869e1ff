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

//! Sentence tokenization.
//!
//! A sentence is split into words, numbers, time abbreviations and
//! punctuation. Whitespace is dropped. The caller may ask for one phrase to
//! be kept whole, which is how multi-word vocabulary items survive.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

/// Alternatives in precedence order. The regex engine prefers the earliest
/// alternative that matches at a given position.
const TOKEN_PATTERN: &str = concat!(
    r"(?P<time>(?i:\b[ap]\.m\.))",
    r"|(?P<word>[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)?)",
    r"|(?P<number>\d+(?:\.\d+)?)",
    r#"|(?P<punct>[.,!?;:()\[\]{}"'])"#,
    r"|(?P<symbol>\S)",
);

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"));

/// A sentence-final `a.m`/`p.m` that lost its period, optionally followed by
/// sentence-ending punctuation other than a period and by closing quotes or
/// brackets.
static BARE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b([ap]\.m)([!?,;:"')\]}]*)\s*$"#)
        .expect("time suffix pattern is valid")
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// Letters, with at most one internal apostrophe (`don't`).
    Word,
    /// An integer or a decimal number.
    Number,
    /// `a.m.` or `p.m.`.
    TimeAbbreviation,
    /// One of `. , ! ? ; : ( ) [ ] { } " '`.
    Punctuation,
    /// The caller-supplied phrase.
    Phrase,
    /// Any other single non-whitespace character.
    Symbol,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Whether this token is something a learner would call a word.
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Phrase)
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }
}

/// Split a sentence into tokens.
///
/// When `phrase` is given, every case-insensitive whole-word occurrence of it
/// becomes a single [`TokenKind::Phrase`] token. This never fails: text that
/// is empty or all whitespace has no tokens.
pub fn tokenize(sentence: &str, phrase: Option<&str>) -> Vec<Token> {
    let sentence = close_time_abbreviation(sentence);
    match phrase.and_then(phrase_regex) {
        Some(re) => collect(&re, &sentence),
        None => collect(&TOKEN_RE, &sentence),
    }
}

/// Sentences often drop the period of a final `a.m`/`p.m` when it would
/// run into the sentence's own punctuation. Put it back.
fn close_time_abbreviation(sentence: &str) -> Cow<'_, str> {
    BARE_TIME_RE.replace(sentence, "${1}.${2}")
}

fn phrase_regex(phrase: &str) -> Option<Regex> {
    let parts: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if parts.is_empty() {
        return None;
    }
    let start = if phrase.trim_start().starts_with(is_word_char) { r"\b" } else { "" };
    let end = if phrase.trim_end().ends_with(is_word_char) { r"\b" } else { "" };
    let pattern = format!(
        r"(?P<phrase>(?i:{start}{}{end}))|{TOKEN_PATTERN}",
        parts.join(r"\s+")
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("ignoring exception phrase {phrase:?}: {e}");
            None
        }
    }
}

/// A character `\b` treats as part of a word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn collect(re: &Regex, sentence: &str) -> Vec<Token> {
    re.captures_iter(sentence).filter_map(classify).collect()
}

fn classify(caps: Captures<'_>) -> Option<Token> {
    const GROUPS: [(&str, TokenKind); 6] = [
        ("phrase", TokenKind::Phrase),
        ("time", TokenKind::TimeAbbreviation),
        ("word", TokenKind::Word),
        ("number", TokenKind::Number),
        ("punct", TokenKind::Punctuation),
        ("symbol", TokenKind::Symbol),
    ];
    GROUPS.iter().find_map(|(name, kind)| {
        caps.name(name)
            .map(|m| Token::new(normalize_phrase_spacing(m.as_str(), *kind), *kind))
    })
}

/// A phrase matched across a run of whitespace is stored with single spaces.
fn normalize_phrase_spacing(text: &str, kind: TokenKind) -> String {
    if kind == TokenKind::Phrase {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    }
}
