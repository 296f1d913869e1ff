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

use lessonbook_core::types::aliases::ExampleId;
use lessonbook_core::types::example::Example;
use lessonbook_core::types::example::ExamplePatch;
use lessonbook_core::types::example::NewExample;
use lessonbook_core::types::query::ExampleQuery;

use crate::client::ApiClient;
use crate::client::Empty;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Examples {
    client: ApiClient,
}

impl Examples {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ExampleQuery) -> ApiResult<Vec<Example>> {
        self.client.get_query("examples", query).await
    }

    pub async fn get(&self, id: ExampleId) -> ApiResult<Example> {
        self.client.get(&format!("examples/{id}")).await
    }

    pub async fn create(&self, example: &NewExample) -> ApiResult<Example> {
        self.client.post("examples", example).await
    }

    pub async fn update(&self, id: ExampleId, patch: &ExamplePatch) -> ApiResult<Example> {
        self.client.put(&format!("examples/{id}"), patch).await
    }

    pub async fn delete(&self, id: ExampleId) -> ApiResult<Empty> {
        self.client.delete(&format!("examples/{id}")).await
    }
}
