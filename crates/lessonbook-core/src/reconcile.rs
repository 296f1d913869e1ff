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

//! Working out which lessons a tag must be attached to or detached from.

use std::collections::BTreeSet;

use crate::types::aliases::LessonId;
use crate::types::aliases::TagId;
use crate::types::lesson::Lesson;

/// The calls needed to move a tag from its current lessons to the desired
/// ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub attach: Vec<LessonId>,
    pub detach: Vec<LessonId>,
}

impl TagDiff {
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// The lessons that currently carry `tag`.
pub fn lessons_with_tag(lessons: &[Lesson], tag: TagId) -> BTreeSet<LessonId> {
    lessons
        .iter()
        .filter(|lesson| lesson.tags.iter().any(|t| t.id == tag))
        .map(|lesson| lesson.id)
        .collect()
}

pub fn reconcile_tag(current: &BTreeSet<LessonId>, desired: &BTreeSet<LessonId>) -> TagDiff {
    TagDiff {
        attach: desired.difference(current).copied().collect(),
        detach: current.difference(desired).copied().collect(),
    }
}
