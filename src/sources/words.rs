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

use lessonbook_core::types::aliases::FormId;
use lessonbook_core::types::aliases::SenseId;
use lessonbook_core::types::aliases::WordId;
use lessonbook_core::types::query::WordChildQuery;
use lessonbook_core::types::query::WordQuery;
use lessonbook_core::types::word::FormPatch;
use lessonbook_core::types::word::NewForm;
use lessonbook_core::types::word::NewSense;
use lessonbook_core::types::word::NewWord;
use lessonbook_core::types::word::SensePatch;
use lessonbook_core::types::word::Word;
use lessonbook_core::types::word::WordForm;
use lessonbook_core::types::word::WordPatch;
use lessonbook_core::types::word::WordSense;

use crate::client::ApiClient;
use crate::client::Empty;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Words {
    client: ApiClient,
}

impl Words {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &WordQuery) -> ApiResult<Vec<Word>> {
        self.client.get_query("words", query).await
    }

    pub async fn get(&self, id: WordId) -> ApiResult<Word> {
        self.client.get(&format!("words/{id}")).await
    }

    pub async fn create(&self, word: &NewWord) -> ApiResult<Word> {
        self.client.post("words", word).await
    }

    pub async fn update(&self, id: WordId, patch: &WordPatch) -> ApiResult<Word> {
        self.client.put(&format!("words/{id}"), patch).await
    }

    pub async fn delete(&self, id: WordId) -> ApiResult<Empty> {
        self.client.delete(&format!("words/{id}")).await
    }
}

/// The dictionary senses of words.
#[derive(Clone, Debug)]
pub struct Senses {
    client: ApiClient,
}

impl Senses {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &WordChildQuery) -> ApiResult<Vec<WordSense>> {
        self.client.get_query("senses", query).await
    }

    pub async fn get(&self, id: SenseId) -> ApiResult<WordSense> {
        self.client.get(&format!("senses/{id}")).await
    }

    pub async fn create(&self, sense: &NewSense) -> ApiResult<WordSense> {
        self.client.post("senses", sense).await
    }

    pub async fn update(&self, id: SenseId, patch: &SensePatch) -> ApiResult<WordSense> {
        self.client.put(&format!("senses/{id}"), patch).await
    }

    pub async fn delete(&self, id: SenseId) -> ApiResult<Empty> {
        self.client.delete(&format!("senses/{id}")).await
    }
}

/// Inflected forms of words.
#[derive(Clone, Debug)]
pub struct Forms {
    client: ApiClient,
}

impl Forms {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &WordChildQuery) -> ApiResult<Vec<WordForm>> {
        self.client.get_query("forms", query).await
    }

    pub async fn get(&self, id: FormId) -> ApiResult<WordForm> {
        self.client.get(&format!("forms/{id}")).await
    }

    pub async fn create(&self, form: &NewForm) -> ApiResult<WordForm> {
        self.client.post("forms", form).await
    }

    pub async fn update(&self, id: FormId, patch: &FormPatch) -> ApiResult<WordForm> {
        self.client.put(&format!("forms/{id}"), patch).await
    }

    pub async fn delete(&self, id: FormId) -> ApiResult<Empty> {
        self.client.delete(&format!("forms/{id}")).await
    }
}
