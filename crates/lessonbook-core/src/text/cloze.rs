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

//! Cloze prompts and option lists.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::generate::GenerationError;
use crate::rng::TinyRng;
use crate::rng::sample;
use crate::text::casing::Casing;
use crate::text::tokenizer::Token;

/// The blank marker.
pub const BLANK: &str = "_";

/// Punctuation that attaches to the preceding token.
const NO_SPACE_BEFORE: [&str; 4] = [",", ".", "!", "?"];

/// Join token texts back into a sentence.
pub fn join_tokens<S: AsRef<str>>(texts: &[S]) -> String {
    let mut out = String::new();
    for (i, text) in texts.iter().enumerate() {
        let text = text.as_ref();
        if i > 0 && !NO_SPACE_BEFORE.contains(&text) {
            out.push(' ');
        }
        out.push_str(text);
    }
    out
}

/// Replace the tokens at `blanks` with [`BLANK`] and join the result.
///
/// Indices past the end of `tokens` are ignored.
pub fn build_blank_prompt(tokens: &[Token], blanks: &BTreeSet<usize>, casing: &Casing) -> String {
    let texts: Vec<String> = (0..tokens.len())
        .map(|i| {
            if blanks.contains(&i) {
                BLANK.to_string()
            } else {
                casing.normalize(tokens, i)
            }
        })
        .collect();
    join_tokens(&texts)
}

/// The word bank of a combination exercise: every token in sentence order,
/// case-normalized, without the punctuation that ends the sentence.
pub fn build_combine_options(tokens: &[Token], casing: &Casing) -> Vec<String> {
    let end = tokens
        .iter()
        .rposition(|t| !t.is_punctuation())
        .map_or(0, |i| i + 1);
    (0..end).map(|i| casing.normalize(tokens, i)).collect()
}

/// The options of a selection exercise: the answers, then `count` distractors
/// drawn from `pool`.
///
/// A candidate is only eligible if it is a single word and does not
/// case-insensitively match any token of the sentence. Fewer than `count`
/// distractors are returned when the pool is small, but never zero.
pub fn build_select_options(
    answers: &[String],
    sentence_tokens: &[String],
    pool: &[String],
    count: usize,
    rng: &mut TinyRng,
) -> Result<Vec<String>, GenerationError> {
    let eligible = eligible_distractors(sentence_tokens, pool);
    if eligible.is_empty() {
        return Err(GenerationError::InsufficientDistractors);
    }
    let mut options: Vec<String> = answers.to_vec();
    options.extend(sample(&eligible, count.max(1), rng));
    Ok(options)
}

/// Filter the candidate pool down to the words that may serve as
/// distractors, without duplicates.
pub fn eligible_distractors(sentence_tokens: &[String], pool: &[String]) -> Vec<String> {
    let in_sentence: HashSet<String> = sentence_tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    pool.iter()
        .map(|candidate| candidate.trim())
        .filter(|candidate| !candidate.is_empty())
        .filter(|candidate| !candidate.contains(char::is_whitespace))
        .filter(|candidate| !in_sentence.contains(&candidate.to_lowercase()))
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .map(str::to_string)
        .collect()
}
