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

use lessonbook_core::types::aliases::TagId;
use lessonbook_core::types::tag::NewTag;
use lessonbook_core::types::tag::Tag;

use crate::client::ApiClient;
use crate::client::Empty;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Tags {
    client: ApiClient,
}

impl Tags {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Tag>> {
        self.client.get("tags").await
    }

    pub async fn create(&self, name: &str) -> ApiResult<Tag> {
        let tag = NewTag {
            name: name.to_string(),
        };
        self.client.post("tags", &tag).await
    }

    pub async fn delete(&self, id: TagId) -> ApiResult<Empty> {
        self.client.delete(&format!("tags/{id}")).await
    }

    /// Find a tag by name, ignoring case.
    pub async fn find(&self, name: &str) -> ApiResult<Option<Tag>> {
        let tags = self.list().await?;
        Ok(tags
            .into_iter()
            .find(|tag| tag.name.eq_ignore_ascii_case(name.trim())))
    }
}
