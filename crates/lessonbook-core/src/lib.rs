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

//! lessonbook-core: the I/O-free part of the lessonbook client.
//!
//! This library provides:
//! - Models of the lesson server's resources and request bodies
//! - Sentence tokenization and case normalization
//! - Cloze prompts, option lists and automatic exercise generation
//! - Parsers for translation lines and bulk-import files
//! - The plain-text lesson export format

pub mod error;
pub mod generate;
pub mod reconcile;
pub mod rng;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use generate::{GenerationError, GenerationSettings, PlannedExercise, plan_generation};
pub use text::casing::{CaseRules, Casing, HeuristicTagger, NameTagger};
pub use text::tokenizer::{Token, TokenKind, tokenize};
