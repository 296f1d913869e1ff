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

//! The plain-text dump of a course, used by "copy all lessons".
//!
//! Each lesson is written as its unit number, its topic and its grammar
//! note, each followed by a blank line. Then come the lesson's words, each
//! with its translations and a blank line, and then the examples of each
//! word in the same shape.

use std::fmt::Write;

use crate::types::example::Example;
use crate::types::lesson::Lesson;
use crate::types::translation::Translation;
use crate::types::word::Word;

#[derive(Clone, Debug, PartialEq)]
pub struct LessonExport {
    pub lesson: Lesson,
    pub words: Vec<WordExport>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WordExport {
    pub word: Word,
    pub examples: Vec<Example>,
}

pub fn format_lessons(lessons: &[LessonExport]) -> String {
    let mut out = String::new();
    for export in lessons {
        format_lesson(&mut out, export);
    }
    out
}

fn format_lesson(out: &mut String, export: &LessonExport) {
    let lesson = &export.lesson;
    let _ = writeln!(out, "{}\n", lesson.unit);
    let _ = writeln!(out, "{}\n", lesson.topic);
    let _ = writeln!(out, "{}\n", lesson.grammar.as_deref().unwrap_or(""));
    for entry in &export.words {
        format_entry(out, &entry.word.text, &entry.word.translations);
    }
    for entry in &export.words {
        for example in &entry.examples {
            format_entry(out, &example.text, &example.translations);
        }
    }
}

fn format_entry(out: &mut String, text: &str, translations: &[Translation]) {
    let _ = writeln!(out, "{text}");
    for translation in translations {
        let _ = writeln!(out, "{}", translation.text);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson() -> Lesson {
        Lesson {
            id: 1,
            unit: 3,
            level: "A1".to_string(),
            topic: "At the market".to_string(),
            grammar: Some("Countable nouns".to_string()),
            language: "en".to_string(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn word(id: i64, text: &str, translation: &str) -> Word {
        Word {
            id,
            text: text.to_string(),
            lemma: None,
            language: "en".to_string(),
            part_of_speech: None,
            level: None,
            translations: vec![Translation::new("de", translation)],
            lesson_ids: vec![1],
        }
    }

    fn example(id: i64, text: &str, translation: &str) -> Example {
        Example {
            id,
            text: text.to_string(),
            language: "en".to_string(),
            translations: vec![Translation::new("de", translation)],
            word_id: None,
            lesson_id: Some(1),
        }
    }

    #[test]
    fn test_format_lesson() {
        let export = LessonExport {
            lesson: lesson(),
            words: vec![
                WordExport {
                    word: word(1, "apple", "Apfel"),
                    examples: vec![example(1, "An apple a day.", "Ein Apfel am Tag.")],
                },
                WordExport {
                    word: word(2, "pear", "Birne"),
                    examples: Vec::new(),
                },
            ],
        };
        let expected = "\
3

At the market

Countable nouns

apple
Apfel

pear
Birne

An apple a day.
Ein Apfel am Tag.

";
        assert_eq!(format_lessons(&[export]), expected);
    }

    #[test]
    fn test_missing_grammar_leaves_an_empty_line() {
        let mut plain = lesson();
        plain.grammar = None;
        let export = LessonExport {
            lesson: plain,
            words: Vec::new(),
        };
        assert_eq!(format_lessons(&[export]), "3\n\nAt the market\n\n\n\n");
    }
}
