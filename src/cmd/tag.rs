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

use std::collections::BTreeSet;

use lessonbook_core::reconcile::lessons_with_tag;
use lessonbook_core::reconcile::reconcile_tag;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::query::LessonQuery;
use lessonbook_core::types::tag::Tag;

use crate::cmd::Session;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::Sources;
use crate::sources::batch::BatchReport;

/// Find the tag called `name`, creating it if asked to.
async fn resolve_tag(sources: &Sources, name: &str, create: bool) -> Fallible<Tag> {
    match sources.tags.find(name).await? {
        Some(tag) => Ok(tag),
        None if create => Ok(sources.tags.create(name.trim()).await?),
        None => fail(format!("no tag named `{name}`; pass --create to add it")),
    }
}

/// Make `lessons` exactly the set of lessons carrying the tag.
pub async fn set_tagged_lessons(
    sources: &Sources,
    name: &str,
    lessons: &[LessonId],
    create: bool,
) -> Fallible<BatchReport> {
    let tag = resolve_tag(sources, name, create).await?;
    let all = sources.lessons.list(&LessonQuery::default()).await?;
    let known: BTreeSet<LessonId> = all.iter().map(|l| l.id).collect();
    if let Some(unknown) = lessons.iter().find(|id| !known.contains(id)) {
        return fail(format!("no lesson with id {unknown}"));
    }
    let current = lessons_with_tag(&all, tag.id);
    let desired: BTreeSet<LessonId> = lessons.iter().copied().collect();
    let diff = reconcile_tag(&current, &desired);
    if diff.is_empty() {
        return Ok(BatchReport::default());
    }
    Ok(sources.lessons.apply_tag_diff(tag.id, &diff).await)
}

pub async fn tag(session: &Session, name: &str, lessons: Vec<LessonId>, create: bool) -> Fallible<()> {
    let report = set_tagged_lessons(&session.sources, name, &lessons, create).await?;
    if report == BatchReport::default() {
        println!("Tag `{name}` is already on exactly those lessons.");
        return Ok(());
    }
    for (label, reason) in &report.failed {
        eprintln!("{label}: {reason}");
    }
    println!("Tag `{name}`: {}.", report.summary());
    if !report.is_complete() {
        return fail("some lessons could not be updated");
    }
    Ok(())
}
