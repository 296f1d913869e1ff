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

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::auth::Auth;

/// Log in and return the access token. The token is never written to disk.
pub async fn fetch_token(config: &Config, username: &str, password: &str) -> Fallible<String> {
    let client = config.client()?.with_token(None);
    match Auth::new(client).login(username, password).await {
        Ok(token) => Ok(token.access_token),
        Err(e) if e.is_unauthorized() => fail("wrong username or password"),
        Err(e) => Err(e.into()),
    }
}

pub async fn login(config: &Config, username: &str, password: &str) -> Fallible<()> {
    let token = fetch_token(config, username, password).await?;
    println!("{token}");
    eprintln!("Logged in. Export it as LESSONBOOK_TOKEN or set `token` in lessonbook.toml.");
    Ok(())
}
