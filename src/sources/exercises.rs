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

use lessonbook_core::types::aliases::ExerciseId;
use lessonbook_core::types::exercise::Exercise;
use lessonbook_core::types::exercise::ExercisePatch;
use lessonbook_core::types::exercise::NewExercise;
use lessonbook_core::types::query::ExerciseQuery;

use crate::client::ApiClient;
use crate::client::Empty;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Exercises {
    client: ApiClient,
}

impl Exercises {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ExerciseQuery) -> ApiResult<Vec<Exercise>> {
        self.client.get_query("exercises", query).await
    }

    pub async fn get(&self, id: ExerciseId) -> ApiResult<Exercise> {
        self.client.get(&format!("exercises/{id}")).await
    }

    pub async fn create(&self, exercise: &NewExercise) -> ApiResult<Exercise> {
        self.client.post("exercises", exercise).await
    }

    pub async fn update(&self, id: ExerciseId, patch: &ExercisePatch) -> ApiResult<Exercise> {
        self.client.put(&format!("exercises/{id}"), patch).await
    }

    pub async fn delete(&self, id: ExerciseId) -> ApiResult<Empty> {
        self.client.delete(&format!("exercises/{id}")).await
    }
}
