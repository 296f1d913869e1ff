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

//! Automatic generation of exercises from an example sentence.
//!
//! Planning is pure: it decides which exercises to create and builds their
//! payloads. Submitting them is the caller's job.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::rng::TinyRng;
use crate::text::casing::Casing;
use crate::text::cloze::build_blank_prompt;
use crate::text::cloze::build_combine_options;
use crate::text::cloze::build_select_options;
use crate::text::tokenizer::Token;
use crate::text::tokenizer::tokenize;
use crate::types::example::Example;
use crate::types::exercise::Exercise;
use crate::types::exercise::ExerciseOption;
use crate::types::exercise::ExerciseType;
use crate::types::exercise::NewExercise;
use crate::types::word::Word;

/// Suffixes tried, in order, after the bare lemma when looking for the
/// answer in a sentence.
const INFLECTION_SUFFIXES: [&str; 3] = ["s", "es", "ed"];

/// The exercise types that are generated automatically, in generation order.
pub const GENERATED_TYPES: [ExerciseType; 2] =
    [ExerciseType::WordCombination, ExerciseType::WordSelection];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The sentence has no words.
    EmptySentence,
    /// No token of the sentence matches the word's lemma or its inflections.
    AnswerNotFound { lemma: String },
    /// No vocabulary is left to draw a distractor from.
    InsufficientDistractors,
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::EmptySentence => write!(f, "the sentence has no words"),
            GenerationError::AnswerNotFound { lemma } => {
                write!(f, "could not find \"{lemma}\" in the sentence")
            }
            GenerationError::InsufficientDistractors => write!(
                f,
                "no studied vocabulary is available to use as a distractor"
            ),
        }
    }
}

impl Error for GenerationError {}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    /// How many distractors a selection exercise gets.
    pub distractor_count: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            distractor_count: 1,
        }
    }
}

/// The outcome of planning one exercise type.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedExercise {
    pub exercise_type: ExerciseType,
    pub result: Result<NewExercise, GenerationError>,
}

/// Plan the exercises to create for `example`.
///
/// Types that `existing` already covers for this example are skipped, so
/// planning again after the first plan was submitted yields nothing. Each
/// remaining type is planned independently: one failing does not stop the
/// other.
pub fn plan_generation(
    example: &Example,
    word: &Word,
    existing: &[Exercise],
    pool: &[String],
    casing: &Casing,
    settings: &GenerationSettings,
    rng: &mut TinyRng,
) -> Vec<PlannedExercise> {
    let tokens = tokenize(&example.text, phrase_of(word));
    GENERATED_TYPES
        .iter()
        .filter(|ty| !already_exists(existing, example, **ty))
        .map(|&exercise_type| {
            let result = match exercise_type {
                ExerciseType::WordCombination => combine_exercise(example, &tokens, casing),
                _ => selection_exercise(
                    example,
                    word,
                    &tokens,
                    pool,
                    casing,
                    settings.distractor_count,
                    rng,
                ),
            };
            PlannedExercise {
                exercise_type,
                result,
            }
        })
        .collect()
}

/// Multi-word lemmas are kept whole by the tokenizer.
fn phrase_of(word: &Word) -> Option<&str> {
    let lemma = word.lemma().trim();
    if lemma.contains(char::is_whitespace) {
        Some(lemma)
    } else {
        None
    }
}

fn already_exists(existing: &[Exercise], example: &Example, exercise_type: ExerciseType) -> bool {
    existing
        .iter()
        .any(|e| e.example_id == example.id && e.exercise_type == exercise_type)
}

/// Build a "reconstruct the sentence" exercise. The options are the word
/// bank in sentence order, so the correct answer is every option in turn.
pub fn combine_exercise(
    example: &Example,
    tokens: &[Token],
    casing: &Casing,
) -> Result<NewExercise, GenerationError> {
    let bank = build_combine_options(tokens, casing);
    if !tokens.iter().any(Token::is_word) || bank.is_empty() {
        return Err(GenerationError::EmptySentence);
    }
    let prompt = example
        .gloss()
        .map(|t| t.text.clone())
        .unwrap_or_default();
    let correct: Vec<usize> = (0..bank.len()).collect();
    Ok(NewExercise {
        example_id: example.id,
        exercise_type: ExerciseType::WordCombination,
        prompt,
        options: to_options(&example.language, bank),
        correct_options: Some(correct),
    })
}

/// Build a "pick the missing word" exercise. The first option is the answer.
pub fn selection_exercise(
    example: &Example,
    word: &Word,
    tokens: &[Token],
    pool: &[String],
    casing: &Casing,
    distractor_count: usize,
    rng: &mut TinyRng,
) -> Result<NewExercise, GenerationError> {
    if !tokens.iter().any(Token::is_word) {
        return Err(GenerationError::EmptySentence);
    }
    let lemma = word.lemma();
    let index = find_answer_index(tokens, lemma).ok_or_else(|| GenerationError::AnswerNotFound {
        lemma: lemma.to_string(),
    })?;
    let prompt = build_blank_prompt(tokens, &BTreeSet::from([index]), casing);
    let answer = casing.normalize(tokens, index);
    let sentence: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
    let options = build_select_options(&[answer], &sentence, pool, distractor_count, rng)?;
    Ok(NewExercise {
        example_id: example.id,
        exercise_type: ExerciseType::WordSelection,
        prompt,
        options: to_options(&example.language, options),
        correct_options: Some(vec![0]),
    })
}

/// Find the token that realizes `lemma`: the lemma itself, then the lemma
/// with `s`, `es` or `ed` appended. Matching is case-insensitive and the
/// first form that occurs anywhere wins.
pub fn find_answer_index(tokens: &[Token], lemma: &str) -> Option<usize> {
    let lemma = lemma.trim().to_lowercase();
    if lemma.is_empty() {
        return None;
    }
    let forms = std::iter::once(lemma.clone())
        .chain(INFLECTION_SUFFIXES.iter().map(|suffix| format!("{lemma}{suffix}")));
    for form in forms {
        let found = tokens
            .iter()
            .position(|t| t.is_word() && t.text.to_lowercase() == form);
        if found.is_some() {
            return found;
        }
    }
    None
}

fn to_options(language: &str, texts: Vec<String>) -> Vec<ExerciseOption> {
    texts
        .into_iter()
        .map(|text| ExerciseOption::single(language, text))
        .collect()
}
