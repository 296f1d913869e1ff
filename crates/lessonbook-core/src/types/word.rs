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

use crate::types::aliases::FormId;
use crate::types::aliases::Language;
use crate::types::aliases::LessonId;
use crate::types::aliases::SenseId;
use crate::types::aliases::WordId;
use crate::types::translation::Translation;

/// A vocabulary item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    #[serde(default)]
    pub lemma: Option<String>,
    pub language: Language,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub lesson_ids: Vec<LessonId>,
}

impl Word {
    /// The dictionary form of the word. Falls back to the word's text when
    /// the server has no separate lemma.
    pub fn lemma(&self) -> &str {
        match &self.lemma {
            Some(lemma) if !lemma.trim().is_empty() => lemma,
            _ => &self.text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewWord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub translations: Vec<Translation>,
}

/// Partial update of a word. `translations` replaces the whole list when
/// present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<Translation>>,
}

/// One meaning of a word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordSense {
    pub id: SenseId,
    pub word_id: WordId,
    pub definition: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSense {
    pub word_id: WordId,
    pub definition: String,
    pub translations: Vec<Translation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<Translation>>,
}

/// An inflected form of a word, e.g. `went` for `go`, labelled `past`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordForm {
    pub id: FormId,
    pub word_id: WordId,
    pub form: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewForm {
    pub word_id: WordId,
    pub form: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
