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

pub mod content;
pub mod export;
pub mod generate;
pub mod import;
pub mod lessons;
pub mod login;
pub mod preview;
pub mod tag;

use log::warn;

use crate::config::Config;
use crate::error::Fallible;
use crate::sources::Sources;

/// What a command that talks to the server needs.
pub struct Session {
    pub config: Config,
    pub sources: Sources,
}

impl Session {
    pub fn open(config: Config) -> Fallible<Self> {
        let client = config.client()?;
        if client.token().is_none() {
            warn!("no token configured; run `lessonbook login` first");
        }
        let sources = Sources::new(&client);
        Ok(Self { config, sources })
    }
}
