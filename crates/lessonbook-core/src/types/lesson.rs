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

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::types::aliases::Language;
use crate::types::aliases::LessonId;
use crate::types::tag::Tag;

/// A lesson: one unit of a course, at a given level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub unit: u32,
    pub level: String,
    pub topic: String,
    #[serde(default)]
    pub grammar: Option<String>,
    pub language: Language,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The body of `POST /lessons`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLesson {
    pub unit: u32,
    pub level: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
    pub language: Language,
}

/// The body of `PUT /lessons/{id}`. Absent fields are left untouched by the
/// server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// `Some(None)` is sent as `null` and clears the note.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub grammar: Option<Option<String>>,
}

/// Deserialize a field that is present in the body, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The body of `PUT /lessons/{id}/expressions/order`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionOrder {
    pub ids: Vec<i64>,
}
