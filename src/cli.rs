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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use lessonbook_core::types::example::NewExample;
use lessonbook_core::types::exercise::ExerciseType;
use lessonbook_core::types::query::ExampleQuery;
use lessonbook_core::types::query::ExerciseQuery;
use lessonbook_core::types::query::LessonQuery;
use lessonbook_core::types::word::NewWord;

use crate::cmd::Session;
use crate::cmd::content::add_example;
use crate::cmd::content::add_word;
use crate::cmd::content::list_examples;
use crate::cmd::content::list_exercises;
use crate::cmd::content::parse_translation_args;
use crate::cmd::content::search_words;
use crate::cmd::content::show_word;
use crate::cmd::export::export_lessons;
use crate::cmd::generate::Target;
use crate::cmd::generate::generate;
use crate::cmd::import::import;
use crate::cmd::lessons::LessonEdits;
use crate::cmd::lessons::create_lesson;
use crate::cmd::lessons::delete_lesson;
use crate::cmd::lessons::edit_lesson;
use crate::cmd::lessons::link_word;
use crate::cmd::lessons::list_lessons;
use crate::cmd::lessons::order_lesson;
use crate::cmd::lessons::show_lesson;
use crate::cmd::login::login;
use crate::cmd::preview::preview;
use crate::cmd::tag::tag;
use crate::config::Config;
use crate::config::Overrides;
use crate::error::Fallible;
use crate::error::fail;
use crate::views::draft::ExerciseDraft;
use crate::views::lesson_form::LessonForm;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. By default, `lessonbook.toml` in the current directory is used if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Base URL of the lesson server's API.
    #[arg(long, global = true, env = "LESSONBOOK_URL")]
    url: Option<String>,
    /// Access token, as printed by `login`.
    #[arg(long, global = true, env = "LESSONBOOK_TOKEN", hide_env_values = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print an access token.
    Login {
        username: String,
        #[arg(long, env = "LESSONBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Commands relating to lessons.
    Lessons {
        #[command(subcommand)]
        command: LessonCommand,
    },
    /// Commands relating to vocabulary.
    Words {
        #[command(subcommand)]
        command: WordCommand,
    },
    /// Commands relating to example sentences.
    Examples {
        #[command(subcommand)]
        command: ExampleCommand,
    },
    /// Commands relating to exercises.
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommand,
    },
    /// Generate the missing exercises of an example, or of every example in a lesson.
    Generate {
        /// The example to generate exercises for.
        #[arg(long, conflicts_with = "lesson", required_unless_present = "lesson")]
        example: Option<i64>,
        /// Generate for every example of this lesson instead.
        #[arg(long)]
        lesson: Option<i64>,
        /// Seed for the distractor draw. By default, the clock is used.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Preview an exercise for a sentence without saving it.
    Preview {
        sentence: String,
        /// The kind of exercise.
        #[arg(long, default_value_t = ExerciseKind::Select)]
        kind: ExerciseKind,
        /// Index of a token to blank out. Repeatable.
        #[arg(long)]
        blank: Vec<usize>,
        /// A phrase to keep as a single token.
        #[arg(long)]
        phrase: Option<String>,
        /// Comma-separated distractor candidates.
        #[arg(long, value_delimiter = ',')]
        pool: Vec<String>,
        /// The translation shown by combination exercises.
        #[arg(long, default_value = "")]
        gloss: String,
        /// The question of a comprehension exercise.
        #[arg(long, default_value = "")]
        question: String,
        /// A choice of a comprehension exercise; the first is correct. Repeatable.
        #[arg(long)]
        choice: Vec<String>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Import words and examples from a file, a directory of `.txt` files, or `-` for standard input.
    Import {
        path: String,
        /// Add the imported words and examples to this lesson.
        #[arg(long)]
        lesson: Option<i64>,
        /// Only show what would be imported.
        #[arg(long)]
        dry_run: bool,
    },
    /// Export lessons as plain text.
    Export {
        /// Only lessons at this level.
        #[arg(long)]
        level: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Put a tag on exactly the given lessons.
    Tag {
        /// Name of the tag.
        name: String,
        /// Ids of the lessons that should carry the tag. None removes it everywhere.
        lessons: Vec<i64>,
        /// Create the tag if it does not exist.
        #[arg(long)]
        create: bool,
    },
}

#[derive(Subcommand)]
enum LessonCommand {
    /// List lessons.
    List {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        unit: Option<u32>,
        /// Only lessons whose topic contains this text.
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show a lesson with its words and examples.
    Show { id: i64 },
    /// Create a lesson.
    Create {
        #[arg(long)]
        unit: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "")]
        level: String,
        #[arg(long, default_value = "")]
        grammar: String,
        /// By default, the configured language.
        #[arg(long, default_value = "")]
        language: String,
    },
    /// Change a lesson. Fields that are not given keep their value.
    Edit {
        id: i64,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        level: Option<String>,
        /// An empty value removes the grammar note.
        #[arg(long)]
        grammar: Option<String>,
    },
    /// Delete a lesson.
    Delete { id: i64 },
    /// Set the display order of a lesson's words and examples.
    Order { id: i64, ids: Vec<i64> },
    /// Add a word to a lesson.
    AddWord { id: i64, word: i64 },
    /// Remove a word from a lesson.
    RemoveWord { id: i64, word: i64 },
}

#[derive(Subcommand)]
enum WordCommand {
    /// Search the vocabulary.
    Search {
        query: String,
        #[arg(long)]
        lesson: Option<i64>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show a word with its senses and forms.
    Show { id: i64 },
    /// Add a word to the vocabulary.
    Add {
        text: String,
        #[arg(long)]
        lemma: Option<String>,
        /// Part of speech.
        #[arg(long)]
        pos: Option<String>,
        #[arg(long)]
        level: Option<u32>,
        /// Also add the word to this lesson.
        #[arg(long)]
        lesson: Option<i64>,
        /// A translation as `lang: text`. Repeat for more languages.
        #[arg(long)]
        translation: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ExampleCommand {
    /// List example sentences.
    List {
        /// Only examples of this word.
        #[arg(long)]
        word: Option<i64>,
        /// Only examples of this lesson.
        #[arg(long)]
        lesson: Option<i64>,
        /// Only examples containing this text.
        #[arg(long)]
        query: Option<String>,
    },
    /// Add an example sentence.
    Add {
        text: String,
        /// The word the sentence illustrates.
        #[arg(long)]
        word: Option<i64>,
        #[arg(long)]
        lesson: Option<i64>,
        /// A translation as `lang: text`. Repeat for more languages.
        #[arg(long)]
        translation: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ExerciseCommand {
    /// List exercises.
    List {
        /// Only exercises of this example.
        #[arg(long)]
        example: Option<i64>,
        /// Only exercises of this lesson.
        #[arg(long)]
        lesson: Option<i64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExerciseKind {
    Select,
    Combine,
    Input,
    Choice,
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExerciseKind::Select => "select",
            ExerciseKind::Combine => "combine",
            ExerciseKind::Input => "input",
            ExerciseKind::Choice => "choice",
        };
        write!(f, "{name}")
    }
}

impl From<ExerciseKind> for ExerciseType {
    fn from(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::Select => ExerciseType::WordSelection,
            ExerciseKind::Combine => ExerciseType::WordCombination,
            ExerciseKind::Input => ExerciseType::FreeTextInput,
            ExerciseKind::Choice => ExerciseType::ComprehensionChoice,
        }
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?.with_overrides(Overrides {
        base_url: cli.url,
        token: cli.token,
    });
    match cli.command {
        Command::Login { username, password } => login(&config, &username, &password).await,
        Command::Preview {
            sentence,
            kind,
            blank,
            phrase,
            pool,
            gloss,
            question,
            choice,
            seed,
        } => {
            let mut draft = ExerciseDraft::new(kind.into(), &sentence, config.language());
            draft.set_phrase(phrase);
            draft.blanks = blank.into_iter().collect();
            draft.pool = pool;
            draft.gloss = gloss;
            draft.question = question;
            draft.choices = choice;
            draft.seed = seed;
            preview(&config, draft)
        }
        Command::Import {
            path,
            lesson,
            dry_run,
        } => import(config, &path, lesson, dry_run).await,
        Command::Lessons { command } => run_lessons(&Session::open(config)?, command).await,
        Command::Words { command } => {
            let session = Session::open(config)?;
            match command {
                WordCommand::Search {
                    query,
                    lesson,
                    language,
                } => search_words(&session, query, lesson, language).await,
                WordCommand::Show { id } => show_word(&session, id).await,
                WordCommand::Add {
                    text,
                    lemma,
                    pos,
                    level,
                    lesson,
                    translation,
                } => {
                    let word = NewWord {
                        text,
                        lemma,
                        language: session.config.language().to_string(),
                        part_of_speech: pos,
                        level,
                        translations: parse_translation_args(&translation)?,
                    };
                    add_word(&session, word, lesson).await
                }
            }
        }
        Command::Examples { command } => {
            let session = Session::open(config)?;
            match command {
                ExampleCommand::List {
                    word,
                    lesson,
                    query,
                } => {
                    let query = ExampleQuery {
                        q: query,
                        word_id: word,
                        lesson_id: lesson,
                        ..Default::default()
                    };
                    list_examples(&session, query).await
                }
                ExampleCommand::Add {
                    text,
                    word,
                    lesson,
                    translation,
                } => {
                    let example = NewExample {
                        text,
                        language: session.config.language().to_string(),
                        translations: parse_translation_args(&translation)?,
                        word_id: word,
                        lesson_id: lesson,
                    };
                    add_example(&session, example).await
                }
            }
        }
        Command::Exercises {
            command: ExerciseCommand::List { example, lesson },
        } => {
            let query = ExerciseQuery {
                example_id: example,
                lesson_id: lesson,
                ..Default::default()
            };
            list_exercises(&Session::open(config)?, query).await
        }
        Command::Generate {
            example,
            lesson,
            seed,
        } => {
            let target = match (example, lesson) {
                (Some(example), _) => Target::Example(example),
                (None, Some(lesson)) => Target::Lesson(lesson),
                (None, None) => return fail("pass --example or --lesson"),
            };
            generate(&Session::open(config)?, target, seed).await
        }
        Command::Export { level, output } => {
            let query = LessonQuery {
                level,
                ..Default::default()
            };
            export_lessons(&Session::open(config)?, query, output).await
        }
        Command::Tag {
            name,
            lessons,
            create,
        } => tag(&Session::open(config)?, &name, lessons, create).await,
    }
}

async fn run_lessons(session: &Session, command: LessonCommand) -> Fallible<()> {
    match command {
        LessonCommand::List {
            level,
            unit,
            query,
            limit,
            offset,
        } => {
            let query = LessonQuery {
                q: query,
                level,
                unit,
                language: None,
                limit,
                offset,
            };
            list_lessons(session, query).await
        }
        LessonCommand::Show { id } => show_lesson(session, id).await,
        LessonCommand::Create {
            unit,
            topic,
            level,
            grammar,
            language,
        } => {
            let form = LessonForm {
                unit,
                level,
                topic,
                grammar,
                language,
                ..Default::default()
            };
            create_lesson(session, form).await
        }
        LessonCommand::Edit {
            id,
            unit,
            topic,
            level,
            grammar,
        } => {
            let edits = LessonEdits {
                unit,
                level,
                topic,
                grammar,
            };
            edit_lesson(session, id, edits).await
        }
        LessonCommand::Delete { id } => delete_lesson(session, id).await,
        LessonCommand::Order { id, ids } => order_lesson(session, id, ids).await,
        LessonCommand::AddWord { id, word } => link_word(session, id, word, true).await,
        LessonCommand::RemoveWord { id, word } => link_word(session, id, word, false).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preview() {
        let cli = Cli::try_parse_from([
            "lessonbook",
            "preview",
            "My phone and my bag.",
            "--blank",
            "1",
            "--pool",
            "book,table",
        ])
        .unwrap();
        match cli.command {
            Command::Preview {
                kind, blank, pool, ..
            } => {
                assert_eq!(kind, ExerciseKind::Select);
                assert_eq!(blank, vec![1]);
                assert_eq!(pool, vec!["book", "table"]);
            }
            _ => panic!("expected the preview command"),
        }
    }

    #[test]
    fn test_generate_needs_a_target() {
        assert!(Cli::try_parse_from(["lessonbook", "generate"]).is_err());
        let both = ["lessonbook", "generate", "--example", "1", "--lesson", "2"];
        assert!(Cli::try_parse_from(both).is_err());
        assert!(Cli::try_parse_from(["lessonbook", "generate", "--lesson", "2"]).is_ok());
    }

    #[test]
    fn test_parse_lesson_edit() {
        let cli = Cli::try_parse_from(["lessonbook", "lessons", "edit", "2", "--grammar", ""]).unwrap();
        match cli.command {
            Command::Lessons {
                command:
                    LessonCommand::Edit {
                        id, unit, grammar, ..
                    },
            } => {
                assert_eq!(id, 2);
                assert_eq!(unit, None);
                assert_eq!(grammar.as_deref(), Some(""));
            }
            _ => panic!("expected the lessons edit command"),
        }
    }

    #[test]
    fn test_parse_word_add_translations() {
        let cli = Cli::try_parse_from([
            "lessonbook",
            "words",
            "add",
            "chair",
            "--translation",
            "es: silla",
            "--translation",
            "de: Stuhl",
        ])
        .unwrap();
        match cli.command {
            Command::Words {
                command: WordCommand::Add { text, translation, .. },
            } => {
                assert_eq!(text, "chair");
                assert_eq!(translation, vec!["es: silla", "de: Stuhl"]);
            }
            _ => panic!("expected the words add command"),
        }
    }
}
