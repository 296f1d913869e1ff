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

use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::query::WordQuery;
use lessonbook_core::types::word::Word;

use crate::sources::words::Words;

#[derive(Debug, Default)]
pub struct WordSearchView {
    pub query: String,
    pub language: Option<String>,
    pub lesson_id: Option<LessonId>,
    pub results: Vec<Word>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WordSearchView {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Search the vocabulary. An empty query is rejected without asking the
    /// server.
    pub async fn search(&mut self, source: &Words) {
        let q = self.query.trim();
        if q.is_empty() {
            self.results.clear();
            self.error = Some("Enter a word to search for.".to_string());
            return;
        }
        let query = WordQuery {
            q: Some(q.to_string()),
            language: self.language.clone(),
            lesson_id: self.lesson_id,
            ..Default::default()
        };
        self.loading = true;
        self.error = None;
        match source.list(&query).await {
            Ok(results) => self.results = results,
            Err(e) => {
                self.results.clear();
                self.error = Some(format!("Search failed: {e}"));
            }
        }
        self.loading = false;
    }
}
