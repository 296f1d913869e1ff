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

use std::path::Path;
use std::time::Duration;

use lessonbook_core::CaseRules;
use lessonbook_core::GenerationSettings;
use lessonbook_core::HeuristicTagger;
use log::debug;
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

pub const CONFIG_FILE: &str = "lessonbook.toml";

const DEFAULT_LANGUAGE: &str = "en";

/// Settings read from `lessonbook.toml`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root URL of the lesson server's API.
    pub base_url: Option<String>,
    /// Bearer token, as printed by `lessonbook login`.
    pub token: Option<String>,
    /// Request timeout. No timeout when absent.
    pub timeout_secs: Option<u64>,
    /// How many distractors a selection exercise gets.
    pub distractor_count: Option<usize>,
    /// Language of new lessons, words and examples.
    pub language: Option<String>,
    pub casing: CasingConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CasingConfig {
    /// Words whose capitalization is always kept, on top of the built-in list.
    pub extra: Vec<String>,
    /// Proper names, kept capitalized wherever they appear.
    pub known_names: Vec<String>,
}

/// Values given on the command line or through the environment. They take
/// precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Read the configuration from `path`, or from `lessonbook.toml` in the
    /// working directory if there is one. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    debug!("no {CONFIG_FILE} in the working directory, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("config file not found: {}", path.display()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| {
            ErrorReport::new(format!("{}: {}", path.display(), e.message()))
        })
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        match toml::from_str(text) {
            Ok(config) => Ok(config),
            Err(e) => fail(format!("invalid configuration: {}", e.message())),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.base_url.is_some() {
            self.base_url = overrides.base_url;
        }
        if overrides.token.is_some() {
            self.token = overrides.token;
        }
        self
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn case_rules(&self) -> CaseRules {
        CaseRules::english().with_extra(&self.casing.extra)
    }

    pub fn tagger(&self) -> HeuristicTagger {
        HeuristicTagger::new(&self.casing.known_names)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        let mut settings = GenerationSettings::default();
        if let Some(count) = self.distractor_count {
            settings.distractor_count = count;
        }
        settings
    }

    /// A client for the configured server, authenticated when a token is set.
    pub fn client(&self) -> Fallible<ApiClient> {
        let Some(base_url) = &self.base_url else {
            return fail(format!(
                "no server configured: set `base_url` in {CONFIG_FILE}, LESSONBOOK_URL, or pass --url"
            ));
        };
        let timeout = self.timeout_secs.map(Duration::from_secs);
        let client = ApiClient::new(base_url, timeout)?;
        Ok(client.with_token(self.token.clone()))
    }
}
