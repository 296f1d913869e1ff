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

pub type LessonId = i64;
pub type WordId = i64;
pub type SenseId = i64;
pub type FormId = i64;
pub type ExampleId = i64;
pub type ExerciseId = i64;
pub type TagId = i64;

/// A language code such as `en` or `de`.
pub type Language = String;
