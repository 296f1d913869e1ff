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

//! Deciding which tokens may be lowercased.
//!
//! Option lists and prompts show words in lowercase so that the capital
//! letter of the first word does not give the answer away. Names and a
//! table of exceptions (weekdays, months, the pronoun "I", ...) keep their
//! capitals.

use std::collections::HashSet;

use crate::text::tokenizer::Token;
use crate::text::tokenizer::TokenKind;

const PRONOUNS: [&str; 5] = ["i", "i'm", "i've", "i'll", "i'd"];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const ABBREVIATIONS: [&str; 12] = [
    "mr", "mrs", "ms", "dr", "st", "tv", "usa", "uk", "eu", "un", "ok", "dj",
];

const HOLIDAYS: [&str; 9] = [
    "christmas",
    "easter",
    "halloween",
    "thanksgiving",
    "hanukkah",
    "ramadan",
    "diwali",
    "valentine's",
    "passover",
];

/// Words that are never lowercased, compared case-insensitively.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseRules {
    exceptions: HashSet<String>,
}

impl CaseRules {
    /// A table with no exceptions at all.
    pub fn empty() -> Self {
        Self {
            exceptions: HashSet::new(),
        }
    }

    /// The built-in English table.
    pub fn english() -> Self {
        let exceptions = PRONOUNS
            .iter()
            .chain(WEEKDAYS.iter())
            .chain(MONTHS.iter())
            .chain(ABBREVIATIONS.iter())
            .chain(HOLIDAYS.iter())
            .map(|s| s.to_string())
            .collect();
        Self { exceptions }
    }

    /// Add more exceptions, e.g. from the configuration file.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exceptions
            .extend(extra.into_iter().map(|s| fold(s.as_ref())));
        self
    }

    pub fn contains(&self, text: &str) -> bool {
        self.exceptions.contains(&fold(text))
    }
}

impl Default for CaseRules {
    fn default() -> Self {
        Self::english()
    }
}

/// Lowercase, with curly apostrophes straightened.
fn fold(text: &str) -> String {
    text.trim().replace('’', "'").to_lowercase()
}

/// The named-entity collaborator: decides whether a token names a person,
/// place or organization.
pub trait NameTagger {
    fn is_name(&self, tokens: &[Token], index: usize) -> bool;
}

/// A tagger that knows no names.
pub struct NoNames;

impl NameTagger for NoNames {
    fn is_name(&self, _tokens: &[Token], _index: usize) -> bool {
        false
    }
}

/// Common given names, recognized at any position in a sentence. Names that
/// double as ordinary words ("Bill", "Rose", "Will") are left out.
const GIVEN_NAMES: &[&str] = &[
    "adam", "ahmed", "alex", "alice", "ana", "anna", "ben", "carlos", "chen", "daniel", "david",
    "elena", "emily", "emma", "fatima", "george", "hana", "hans", "harry", "helen", "ivan",
    "james", "john", "jose", "juan", "julia", "kate", "kenji", "laura", "leo", "lisa", "lucas",
    "lucy", "maria", "marie", "mary", "mia", "michael", "mohammed", "nina", "olga", "omar",
    "paul", "pedro", "peter", "ravi", "sam", "sara", "sarah", "sofia", "sophie", "tom", "yuki",
];

/// Countries and cities. Names that double as ordinary words ("China",
/// "Turkey", "Nice") are left out.
const PLACES: &[&str] = &[
    "africa", "america", "amsterdam", "asia", "athens", "australia", "barcelona", "beijing",
    "berlin", "brazil", "cairo", "canada", "chicago", "dublin", "egypt", "england", "europe",
    "france", "germany", "greece", "india", "ireland", "italy", "japan", "kenya", "korea",
    "lisbon", "london", "madrid", "mexico", "moscow", "paris", "peru", "portugal", "prague",
    "rome", "russia", "scotland", "seoul", "spain", "sydney", "tokyo", "toronto", "vienna",
    "wales",
];

/// Treats names from its gazetteer as names anywhere, and any other
/// capitalized word as a name unless it starts a sentence.
#[derive(Clone, Debug)]
pub struct HeuristicTagger {
    known: HashSet<String>,
}

impl HeuristicTagger {
    /// The built-in gazetteer extended with `known`.
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = GIVEN_NAMES
            .iter()
            .chain(PLACES.iter())
            .map(|s| s.to_string())
            .chain(known.into_iter().map(|s| fold(s.as_ref())))
            .collect();
        Self { known }
    }
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl NameTagger for HeuristicTagger {
    fn is_name(&self, tokens: &[Token], index: usize) -> bool {
        let Some(token) = tokens.get(index) else {
            return false;
        };
        if !token.is_word() {
            return false;
        }
        if self.known.contains(&fold(&token.text)) {
            return true;
        }
        starts_uppercase(&token.text) && !starts_sentence(tokens, index)
    }
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Whether the token at `index` is the first word of a sentence, skipping
/// opening quotes and brackets.
fn starts_sentence(tokens: &[Token], index: usize) -> bool {
    for token in tokens[..index].iter().rev() {
        match token.text.as_str() {
            "\"" | "'" | "(" | "[" | "{" => continue,
            "." | "!" | "?" => return true,
            _ => return false,
        }
    }
    true
}

/// The case normalization rule: the exception table plus a name tagger.
pub struct Casing<'a> {
    rules: &'a CaseRules,
    tagger: &'a dyn NameTagger,
}

impl<'a> Casing<'a> {
    pub fn new(rules: &'a CaseRules, tagger: &'a dyn NameTagger) -> Self {
        Self { rules, tagger }
    }

    /// Whether the token at `index` must keep its case.
    pub fn preserves(&self, tokens: &[Token], index: usize) -> bool {
        let Some(token) = tokens.get(index) else {
            return true;
        };
        match token.kind {
            TokenKind::Word | TokenKind::Phrase => {
                self.rules.contains(&token.text) || self.tagger.is_name(tokens, index)
            }
            TokenKind::TimeAbbreviation => false,
            TokenKind::Number | TokenKind::Punctuation | TokenKind::Symbol => true,
        }
    }

    /// The display text of the token at `index`.
    pub fn normalize(&self, tokens: &[Token], index: usize) -> String {
        match tokens.get(index) {
            Some(token) if self.preserves(tokens, index) => token.text.clone(),
            Some(token) => token.text.to_lowercase(),
            None => String::new(),
        }
    }
}
