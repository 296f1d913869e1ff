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

use std::fmt::Write;

use lessonbook_core::text::parser::format_translations;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::aliases::WordId;
use lessonbook_core::types::example::Example;
use lessonbook_core::types::lesson::Lesson;
use lessonbook_core::types::query::ExampleQuery;
use lessonbook_core::types::query::LessonQuery;
use lessonbook_core::types::query::WordQuery;
use lessonbook_core::types::word::Word;

use crate::cmd::Session;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::lessons::Lessons;
use crate::views::lesson_form::LessonForm;
use crate::views::lessons::LessonListView;

pub fn format_lesson_row(lesson: &Lesson) -> String {
    let mut row = format!(
        "{:>5}  unit {:<3} {:<3} {}",
        lesson.id, lesson.unit, lesson.level, lesson.topic
    );
    if !lesson.tags.is_empty() {
        let tags: Vec<&str> = lesson.tags.iter().map(|t| t.name.as_str()).collect();
        let _ = write!(row, "  [{}]", tags.join(", "));
    }
    row
}

pub async fn list_lessons(session: &Session, query: LessonQuery) -> Fallible<()> {
    let mut view = LessonListView::new(query);
    view.load(&session.sources.lessons).await;
    if let Some(error) = view.error {
        return fail(error);
    }
    if view.lessons.is_empty() {
        println!("No lessons found.");
    }
    for lesson in &view.lessons {
        println!("{}", format_lesson_row(lesson));
    }
    Ok(())
}

/// A lesson with its words and examples, as plain text.
pub fn format_lesson_details(lesson: &Lesson, words: &[Word], examples: &[Example]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Unit {}: {} ({})", lesson.unit, lesson.topic, lesson.level);
    if let Some(grammar) = &lesson.grammar {
        let _ = writeln!(out, "Grammar: {grammar}");
    }
    let _ = writeln!(out, "\nWords:");
    for word in words {
        let _ = writeln!(out, "{:>5}  {}", word.id, word.text);
        for line in format_translations(&word.translations).lines() {
            let _ = writeln!(out, "         {line}");
        }
    }
    let _ = writeln!(out, "\nExamples:");
    for example in examples {
        let _ = writeln!(out, "{:>5}  {}", example.id, example.text);
    }
    out
}

pub async fn show_lesson(session: &Session, id: LessonId) -> Fallible<()> {
    let sources = &session.sources;
    let lesson = sources.lessons.get(id).await?;
    let words = sources
        .words
        .list(&WordQuery {
            lesson_id: Some(id),
            ..Default::default()
        })
        .await?;
    let examples = sources
        .examples
        .list(&ExampleQuery {
            lesson_id: Some(id),
            ..Default::default()
        })
        .await?;
    print!("{}", format_lesson_details(&lesson, &words, &examples));
    Ok(())
}

pub async fn create_lesson(session: &Session, mut form: LessonForm) -> Fallible<()> {
    if form.language.trim().is_empty() {
        form.language = session.config.language().to_string();
    }
    match form.submit(&session.sources.lessons).await {
        Some(lesson) => {
            println!("Created lesson {}.", lesson.id);
            Ok(())
        }
        None => fail(form.error.unwrap_or_default()),
    }
}

/// Field changes for `lessons edit`. Unset fields keep their value, and an
/// empty grammar note clears it.
#[derive(Debug, Default)]
pub struct LessonEdits {
    pub unit: Option<String>,
    pub level: Option<String>,
    pub topic: Option<String>,
    pub grammar: Option<String>,
}

/// Load the lesson into the edit form, apply `edits` and save.
pub async fn apply_edits(lessons: &Lessons, id: LessonId, edits: LessonEdits) -> Fallible<Lesson> {
    let current = lessons.get(id).await?;
    let mut form = LessonForm::edit(&current);
    if let Some(unit) = edits.unit {
        form.unit = unit;
    }
    if let Some(level) = edits.level {
        form.level = level;
    }
    if let Some(topic) = edits.topic {
        form.topic = topic;
    }
    if let Some(grammar) = edits.grammar {
        form.grammar = grammar;
    }
    match form.submit(lessons).await {
        Some(lesson) => Ok(lesson),
        None => fail(form.error.unwrap_or_default()),
    }
}

pub async fn edit_lesson(session: &Session, id: LessonId, edits: LessonEdits) -> Fallible<()> {
    let lesson = apply_edits(&session.sources.lessons, id, edits).await?;
    println!("Updated lesson {}.", lesson.id);
    Ok(())
}

pub async fn delete_lesson(session: &Session, id: LessonId) -> Fallible<()> {
    session.sources.lessons.delete(id).await?;
    println!("Deleted lesson {id}.");
    Ok(())
}

pub async fn order_lesson(session: &Session, id: LessonId, ids: Vec<i64>) -> Fallible<()> {
    if ids.is_empty() {
        return fail("give the word and example ids in their new order");
    }
    session.sources.lessons.reorder(id, ids).await?;
    println!("Reordered lesson {id}.");
    Ok(())
}

pub async fn link_word(session: &Session, id: LessonId, word: WordId, attach: bool) -> Fallible<()> {
    let lessons = &session.sources.lessons;
    if attach {
        lessons.attach_word(id, word).await?;
        println!("Added word {word} to lesson {id}.");
    } else {
        lessons.detach_word(id, word).await?;
        println!("Removed word {word} from lesson {id}.");
    }
    Ok(())
}
