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

//! Words, examples and exercises: listings, and adding single records.

use std::fmt::Write;

use lessonbook_core::text::parser::format_translations;
use lessonbook_core::text::parser::parse_translations;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::aliases::WordId;
use lessonbook_core::types::example::NewExample;
use lessonbook_core::types::exercise::Exercise;
use lessonbook_core::types::query::ExampleQuery;
use lessonbook_core::types::query::ExerciseQuery;
use lessonbook_core::types::query::WordChildQuery;
use lessonbook_core::types::translation::Translation;
use lessonbook_core::types::word::NewWord;
use lessonbook_core::types::word::Word;

use crate::cmd::Session;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::Sources;
use crate::views::words::WordSearchView;

pub async fn search_words(
    session: &Session,
    query: String,
    lesson: Option<LessonId>,
    language: Option<String>,
) -> Fallible<()> {
    let mut view = WordSearchView::new(query);
    view.lesson_id = lesson;
    view.language = language;
    view.search(&session.sources.words).await;
    if let Some(error) = view.error {
        return fail(error);
    }
    if view.results.is_empty() {
        println!("No words found.");
    }
    for word in &view.results {
        let gloss: Vec<&str> = word.translations.iter().map(|t| t.text.as_str()).collect();
        println!("{:>5}  {}  {}", word.id, word.text, gloss.join(", "));
    }
    Ok(())
}

pub async fn show_word(session: &Session, id: WordId) -> Fallible<()> {
    let sources = &session.sources;
    let word = sources.words.get(id).await?;
    let children = WordChildQuery {
        word_id: Some(id),
        ..Default::default()
    };
    let senses = sources.senses.list(&children).await?;
    let forms = sources.forms.list(&children).await?;
    println!("{} ({})", word.text, word.lemma());
    if let Some(pos) = &word.part_of_speech {
        println!("Part of speech: {pos}");
    }
    println!("{}", format_translations(&word.translations));
    for (n, sense) in senses.iter().enumerate() {
        println!("{}. {}", n + 1, sense.definition);
    }
    for form in &forms {
        match &form.label {
            Some(label) => println!("  {} ({label})", form.form),
            None => println!("  {}", form.form),
        }
    }
    Ok(())
}

/// Translations from repeated `--translation "lang: text"` arguments.
pub fn parse_translation_args(args: &[String]) -> Fallible<Vec<Translation>> {
    Ok(parse_translations("--translation", &args.join("\n"))?)
}

/// Create a word and add it to `lesson`, if given.
pub async fn create_word(
    sources: &Sources,
    word: &NewWord,
    lesson: Option<LessonId>,
) -> Fallible<Word> {
    let created = sources.words.create(word).await?;
    if let Some(lesson) = lesson {
        sources.lessons.attach_word(lesson, created.id).await?;
    }
    Ok(created)
}

pub async fn add_word(session: &Session, word: NewWord, lesson: Option<LessonId>) -> Fallible<()> {
    let created = create_word(&session.sources, &word, lesson).await?;
    println!("Created word {}.", created.id);
    Ok(())
}

pub async fn add_example(session: &Session, example: NewExample) -> Fallible<()> {
    let created = session.sources.examples.create(&example).await?;
    println!("Created example {}.", created.id);
    Ok(())
}

pub async fn list_examples(session: &Session, query: ExampleQuery) -> Fallible<()> {
    let examples = session.sources.examples.list(&query).await?;
    if examples.is_empty() {
        println!("No examples found.");
    }
    for example in &examples {
        let gloss = example.gloss().map(|t| t.text.as_str()).unwrap_or("");
        println!("{:>5}  {}  {}", example.id, example.text, gloss);
    }
    Ok(())
}

/// One exercise: its type and prompt, then each option with a `*` on the
/// correct ones.
pub fn format_exercise(exercise: &Exercise, language: &str) -> String {
    let mut out = format!(
        "{:>5}  {} (example {})\n       {}\n",
        exercise.id, exercise.exercise_type, exercise.example_id, exercise.prompt
    );
    let correct = exercise.correct_options.clone().unwrap_or_default();
    for (i, option) in exercise.options.iter().enumerate() {
        let text = option
            .text(language)
            .or_else(|| option.texts.values().next().map(String::as_str))
            .unwrap_or("");
        let mark = if correct.contains(&i) { '*' } else { ' ' };
        let _ = writeln!(out, "     {mark} {text}");
    }
    out
}

pub async fn list_exercises(session: &Session, query: ExerciseQuery) -> Fallible<()> {
    let exercises = session.sources.exercises.list(&query).await?;
    if exercises.is_empty() {
        println!("No exercises found.");
    }
    for exercise in &exercises {
        print!("{}", format_exercise(exercise, session.config.language()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lessonbook_core::types::exercise::ExerciseOption;
    use lessonbook_core::types::exercise::ExerciseType;

    use super::*;
    use crate::helper::FakeServer;

    fn args(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_translation_args() -> Fallible<()> {
        let translations = parse_translation_args(&args(&["es: mesa", "pt-br: mesa"]))?;
        assert_eq!(
            translations,
            vec![Translation::new("es", "mesa"), Translation::new("pt-br", "mesa")]
        );
        assert!(parse_translation_args(&[])?.is_empty());
        let err = parse_translation_args(&args(&["es: mesa", "Spanish mesa"])).unwrap_err();
        assert!(err.message().ends_with("--translation:2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_word_in_lesson() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let word = NewWord {
            text: "chair".to_string(),
            lemma: None,
            language: "en".to_string(),
            part_of_speech: Some("noun".to_string()),
            level: None,
            translations: parse_translation_args(&args(&["es: silla"]))?,
        };
        let created = create_word(&sources, &word, Some(2)).await?;
        assert_eq!(
            server.last_request(),
            format!("POST /lessons/2/words/{}", created.id)
        );
        let stored = server.words().into_iter().find(|w| w.id == created.id);
        let stored = stored.map(|w| (w.lesson_ids, w.translations));
        assert_eq!(stored, Some((vec![2], vec![Translation::new("es", "silla")])));
        Ok(())
    }

    #[test]
    fn test_format_exercise() {
        let exercise = Exercise {
            id: 101,
            example_id: 20,
            exercise_type: ExerciseType::WordSelection,
            prompt: "I _ apples at the market.".to_string(),
            options: vec![
                ExerciseOption::single("en", "buy"),
                ExerciseOption::single("es", "libro"),
            ],
            correct_options: Some(vec![0]),
        };
        assert_eq!(
            format_exercise(&exercise, "en"),
            "  101  word_selection (example 20)\n       I _ apples at the market.\n     * buy\n       libro\n"
        );
    }
}
