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

//! One data source per server resource. Each holds a clone of the shared
//! [`ApiClient`] and maps its methods onto the resource's endpoints.

pub mod auth;
pub mod batch;
pub mod examples;
pub mod exercises;
pub mod lessons;
pub mod tags;
pub mod words;

use crate::client::ApiClient;
use crate::sources::auth::Auth;
use crate::sources::examples::Examples;
use crate::sources::exercises::Exercises;
use crate::sources::lessons::Lessons;
use crate::sources::tags::Tags;
use crate::sources::words::Forms;
use crate::sources::words::Senses;
use crate::sources::words::Words;

/// Every data source, built from one client.
#[derive(Clone, Debug)]
pub struct Sources {
    pub auth: Auth,
    pub lessons: Lessons,
    pub words: Words,
    pub senses: Senses,
    pub forms: Forms,
    pub examples: Examples,
    pub exercises: Exercises,
    pub tags: Tags,
}

impl Sources {
    pub fn new(client: &ApiClient) -> Self {
        Self {
            auth: Auth::new(client.clone()),
            lessons: Lessons::new(client.clone()),
            words: Words::new(client.clone()),
            senses: Senses::new(client.clone()),
            forms: Forms::new(client.clone()),
            examples: Examples::new(client.clone()),
            exercises: Exercises::new(client.clone()),
            tags: Tags::new(client.clone()),
        }
    }
}
