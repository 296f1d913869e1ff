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

use lessonbook_core::reconcile::TagDiff;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::aliases::TagId;
use lessonbook_core::types::aliases::WordId;
use lessonbook_core::types::lesson::ExpressionOrder;
use lessonbook_core::types::lesson::Lesson;
use lessonbook_core::types::lesson::LessonPatch;
use lessonbook_core::types::lesson::NewLesson;
use lessonbook_core::types::query::LessonQuery;
use log::info;
use tokio::task::JoinSet;

use crate::client::ApiClient;
use crate::client::Empty;
use crate::error::ApiResult;
use crate::sources::batch::BatchReport;

#[derive(Clone, Debug)]
pub struct Lessons {
    client: ApiClient,
}

impl Lessons {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &LessonQuery) -> ApiResult<Vec<Lesson>> {
        self.client.get_query("lessons", query).await
    }

    pub async fn get(&self, id: LessonId) -> ApiResult<Lesson> {
        self.client.get(&format!("lessons/{id}")).await
    }

    pub async fn create(&self, lesson: &NewLesson) -> ApiResult<Lesson> {
        self.client.post("lessons", lesson).await
    }

    pub async fn update(&self, id: LessonId, patch: &LessonPatch) -> ApiResult<Lesson> {
        self.client.put(&format!("lessons/{id}"), patch).await
    }

    pub async fn delete(&self, id: LessonId) -> ApiResult<Empty> {
        self.client.delete(&format!("lessons/{id}")).await
    }

    pub async fn attach_word(&self, id: LessonId, word: WordId) -> ApiResult<Empty> {
        self.client
            .post_empty(&format!("lessons/{id}/words/{word}"))
            .await
    }

    pub async fn detach_word(&self, id: LessonId, word: WordId) -> ApiResult<Empty> {
        self.client
            .delete(&format!("lessons/{id}/words/{word}"))
            .await
    }

    pub async fn attach_tag(&self, id: LessonId, tag: TagId) -> ApiResult<Empty> {
        self.client
            .post_empty(&format!("lessons/{id}/tags/{tag}"))
            .await
    }

    pub async fn detach_tag(&self, id: LessonId, tag: TagId) -> ApiResult<Empty> {
        self.client
            .delete(&format!("lessons/{id}/tags/{tag}"))
            .await
    }

    /// Replace the display order of the lesson's words and examples.
    pub async fn reorder(&self, id: LessonId, ids: Vec<i64>) -> ApiResult<Empty> {
        self.client
            .put(
                &format!("lessons/{id}/expressions/order"),
                &ExpressionOrder { ids },
            )
            .await
    }

    /// Attach and detach `tag` as `diff` says. All calls run concurrently and
    /// every one is awaited, whatever happens to the others.
    pub async fn apply_tag_diff(&self, tag: TagId, diff: &TagDiff) -> BatchReport {
        let mut set = JoinSet::new();
        for &lesson in &diff.attach {
            let this = self.clone();
            set.spawn(async move {
                let result = this.attach_tag(lesson, tag).await;
                (format!("attach tag {tag} to lesson {lesson}"), result)
            });
        }
        for &lesson in &diff.detach {
            let this = self.clone();
            set.spawn(async move {
                let result = this.detach_tag(lesson, tag).await;
                (format!("detach tag {tag} from lesson {lesson}"), result)
            });
        }
        let mut report = BatchReport::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((label, result)) => report.record(label, &result),
                Err(e) => report.fail("tag update", e),
            }
        }
        // Completion order is arbitrary.
        report.failed.sort();
        info!("tag {tag}: {}", report.summary());
        report
    }
}
