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

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::aliases::ExampleId;
use crate::types::aliases::ExerciseId;
use crate::types::aliases::Language;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Pick the word that fills the blank.
    WordSelection,
    /// Rebuild the sentence from a bank of its words.
    WordCombination,
    /// Type the missing word.
    FreeTextInput,
    /// Answer a question about the sentence.
    ComprehensionChoice,
}

impl ExerciseType {
    pub fn as_str(&self) -> &str {
        match self {
            ExerciseType::WordSelection => "word_selection",
            ExerciseType::WordCombination => "word_combination",
            ExerciseType::FreeTextInput => "free_text_input",
            ExerciseType::ComprehensionChoice => "comprehension_choice",
        }
    }
}

impl Display for ExerciseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One option of an exercise, with its display text per language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOption {
    pub texts: BTreeMap<Language, String>,
}

impl ExerciseOption {
    pub fn single(language: &str, text: impl Into<String>) -> Self {
        let mut texts = BTreeMap::new();
        texts.insert(language.to_string(), text.into());
        Self { texts }
    }

    pub fn text(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub example_id: ExampleId,
    pub exercise_type: ExerciseType,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<ExerciseOption>,
    #[serde(default)]
    pub correct_options: Option<Vec<usize>>,
}

/// The body of `POST /exercises`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExercise {
    pub example_id: ExampleId,
    pub exercise_type: ExerciseType,
    pub prompt: String,
    pub options: Vec<ExerciseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_options: Option<Vec<usize>>,
}

impl NewExercise {
    /// The exercise this request would create, once the server assigns it an
    /// id.
    pub fn into_exercise(self, id: ExerciseId) -> Exercise {
        Exercise {
            id,
            example_id: self.example_id,
            exercise_type: self.exercise_type,
            prompt: self.prompt,
            options: self.options,
            correct_options: self.correct_options,
        }
    }
}

/// Partial update of an exercise. `options` replaces the whole list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExercisePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ExerciseOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_options: Option<Vec<usize>>,
}
