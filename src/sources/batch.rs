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

use std::fmt::Display;

/// The outcome of a group of independent calls. Nothing is rolled back: the
/// report says which items went through and which did not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub skipped: usize,
    /// Label of the failed item and a readable reason.
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn record<T, E: Display>(&mut self, label: impl Into<String>, result: &Result<T, E>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(e) => self.fail(label, e),
        }
    }

    pub fn fail(&mut self, label: impl Into<String>, reason: impl Display) {
        self.failed.push((label.into(), reason.to_string()));
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.succeeded += other.succeeded;
        self.skipped += other.skipped;
        self.failed.extend(other.failed);
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// A one-line summary like `3 succeeded, 1 failed, 2 skipped`.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} succeeded", self.succeeded)];
        if !self.failed.is_empty() {
            parts.push(format!("{} failed", self.failed.len()));
        }
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        parts.join(", ")
    }
}
