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

//! The exercise editor. All derived state (tokens, prompt, options) is
//! computed by [`recompute`] from the draft; call it after every change.

use std::collections::BTreeSet;

use lessonbook_core::Casing;
use lessonbook_core::Token;
use lessonbook_core::rng::TinyRng;
use lessonbook_core::text::cloze::build_blank_prompt;
use lessonbook_core::text::cloze::build_combine_options;
use lessonbook_core::text::cloze::build_select_options;
use lessonbook_core::tokenize;
use lessonbook_core::types::aliases::ExampleId;
use lessonbook_core::types::exercise::ExerciseOption;
use lessonbook_core::types::exercise::ExerciseType;
use lessonbook_core::types::exercise::NewExercise;

#[derive(Debug, Clone)]
pub struct ExerciseDraft {
    pub exercise_type: ExerciseType,
    pub sentence: String,
    pub language: String,
    /// Kept as one token when present in the sentence.
    pub phrase: Option<String>,
    /// Indices of the tokens to blank out.
    pub blanks: BTreeSet<usize>,
    /// Translation shown as the prompt of a combination exercise.
    pub gloss: String,
    /// Distractor candidates for selection exercises.
    pub pool: Vec<String>,
    pub distractor_count: usize,
    /// Seeds the distractor draw, so the same draft always previews the same.
    pub seed: u64,
    pub question: String,
    /// Choices of a comprehension question. The first is the correct one.
    pub choices: Vec<String>,
}

impl ExerciseDraft {
    pub fn new(exercise_type: ExerciseType, sentence: &str, language: &str) -> Self {
        Self {
            exercise_type,
            sentence: sentence.to_string(),
            language: language.to_string(),
            phrase: None,
            blanks: BTreeSet::new(),
            gloss: String::new(),
            pool: Vec::new(),
            distractor_count: 1,
            seed: 0,
            question: String::new(),
            choices: Vec::new(),
        }
    }

    /// Replace the sentence. Blank indices refer to the old tokens, so they
    /// are cleared.
    pub fn set_sentence(&mut self, sentence: &str) {
        self.sentence = sentence.to_string();
        self.blanks.clear();
    }

    pub fn set_phrase(&mut self, phrase: Option<String>) {
        self.phrase = phrase.filter(|p| !p.trim().is_empty());
        self.blanks.clear();
    }

    pub fn toggle_blank(&mut self, index: usize) {
        if !self.blanks.remove(&index) {
            self.blanks.insert(index);
        }
    }
}

/// Everything the editor displays for a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPreview {
    pub tokens: Vec<Token>,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: Vec<usize>,
    /// Why the draft cannot be saved yet.
    pub error: Option<String>,
}

impl DraftPreview {
    fn invalid(tokens: Vec<Token>, error: impl Into<String>) -> Self {
        Self {
            tokens,
            prompt: String::new(),
            options: Vec::new(),
            correct: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.error.is_none()
    }

    /// The request body for saving the draft, if it is complete.
    pub fn to_new_exercise(&self, draft: &ExerciseDraft, example_id: ExampleId) -> Option<NewExercise> {
        if !self.is_ready() {
            return None;
        }
        Some(NewExercise {
            example_id,
            exercise_type: draft.exercise_type,
            prompt: self.prompt.clone(),
            options: self
                .options
                .iter()
                .map(|text| ExerciseOption::single(&draft.language, text.clone()))
                .collect(),
            correct_options: Some(self.correct.clone()),
        })
    }
}

pub fn recompute(draft: &ExerciseDraft, casing: &Casing) -> DraftPreview {
    let tokens = tokenize(&draft.sentence, draft.phrase.as_deref());
    if !tokens.iter().any(Token::is_word) {
        return DraftPreview::invalid(tokens, "Enter a sentence.");
    }
    let blanks: BTreeSet<usize> = draft
        .blanks
        .iter()
        .copied()
        .filter(|&i| tokens.get(i).is_some_and(Token::is_word))
        .collect();
    match draft.exercise_type {
        ExerciseType::WordCombination => {
            let options = build_combine_options(&tokens, casing);
            DraftPreview {
                prompt: draft.gloss.trim().to_string(),
                correct: (0..options.len()).collect(),
                options,
                tokens,
                error: None,
            }
        }
        ExerciseType::WordSelection | ExerciseType::FreeTextInput if blanks.is_empty() => {
            DraftPreview::invalid(tokens, "Select the word to blank out.")
        }
        ExerciseType::WordSelection => {
            let prompt = build_blank_prompt(&tokens, &blanks, casing);
            let answers: Vec<String> = blanks.iter().map(|&i| casing.normalize(&tokens, i)).collect();
            let sentence: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
            let mut rng = TinyRng::from_seed(draft.seed);
            match build_select_options(&answers, &sentence, &draft.pool, draft.distractor_count, &mut rng) {
                Ok(options) => DraftPreview {
                    tokens,
                    prompt,
                    options,
                    correct: (0..answers.len()).collect(),
                    error: None,
                },
                Err(e) => DraftPreview::invalid(tokens, e.to_string()),
            }
        }
        ExerciseType::FreeTextInput => {
            let prompt = build_blank_prompt(&tokens, &blanks, casing);
            let options: Vec<String> = blanks.iter().map(|&i| casing.normalize(&tokens, i)).collect();
            DraftPreview {
                tokens,
                prompt,
                correct: (0..options.len()).collect(),
                options,
                error: None,
            }
        }
        ExerciseType::ComprehensionChoice => {
            let question = draft.question.trim();
            let choices: Vec<String> = draft
                .choices
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            if question.is_empty() {
                DraftPreview::invalid(tokens, "Enter a question.")
            } else if choices.len() < 2 {
                DraftPreview::invalid(tokens, "Add at least two choices.")
            } else {
                DraftPreview {
                    tokens,
                    prompt: question.to_string(),
                    options: choices,
                    correct: vec![0],
                    error: None,
                }
            }
        }
    }
}
