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

use lessonbook_core::types::auth::AuthToken;
use lessonbook_core::types::auth::LoginForm;

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Clone, Debug)]
pub struct Auth {
    client: ApiClient,
}

impl Auth {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange a username and password for a bearer token. The credentials
    /// are sent form-encoded.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthToken> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post_form("auth/login", &form).await
    }
}
