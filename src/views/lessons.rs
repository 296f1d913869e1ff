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

use lessonbook_core::types::lesson::Lesson;
use lessonbook_core::types::query::LessonQuery;

use crate::sources::lessons::Lessons;

/// The lesson list, with its filters.
#[derive(Debug, Default)]
pub struct LessonListView {
    pub query: LessonQuery,
    pub lessons: Vec<Lesson>,
    /// Set while a load is in flight.
    pub loading: bool,
    pub error: Option<String>,
}

impl LessonListView {
    pub fn new(query: LessonQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    /// Fetch the lessons matching the current filters. On failure the
    /// previous results are kept and `error` is set.
    pub async fn load(&mut self, source: &Lessons) {
        self.loading = true;
        self.error = None;
        match source.list(&self.query).await {
            Ok(mut lessons) => {
                lessons.sort_by(|a, b| (a.unit, a.id).cmp(&(b.unit, b.id)));
                self.lessons = lessons;
            }
            Err(e) => self.error = Some(format!("Could not load lessons: {e}")),
        }
        self.loading = false;
    }

    /// Drop a deleted lesson without reloading.
    pub fn remove(&mut self, id: i64) {
        self.lessons.retain(|l| l.id != id);
    }
}
