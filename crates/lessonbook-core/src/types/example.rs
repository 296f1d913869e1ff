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

use serde::Deserialize;
use serde::Serialize;

use crate::types::aliases::ExampleId;
use crate::types::aliases::Language;
use crate::types::aliases::LessonId;
use crate::types::aliases::WordId;
use crate::types::translation::Translation;

/// An example sentence illustrating a word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub id: ExampleId,
    pub text: String,
    pub language: Language,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub word_id: Option<WordId>,
    #[serde(default)]
    pub lesson_id: Option<LessonId>,
}

impl Example {
    /// The first translation into a language other than the sentence's own.
    pub fn gloss(&self) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.language != self.language && !t.text.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExample {
    pub text: String,
    pub language: Language,
    pub translations: Vec<Translation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_id: Option<WordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<LessonId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamplePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<Translation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_id: Option<WordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<LessonId>,
}
