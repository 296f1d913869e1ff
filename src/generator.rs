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

//! Automatic exercise generation against the server: gather the distractor
//! pool, plan, then submit each planned exercise on its own.

use std::fmt::Display;
use std::fmt::Formatter;

use lessonbook_core::CaseRules;
use lessonbook_core::Casing;
use lessonbook_core::GenerationError;
use lessonbook_core::GenerationSettings;
use lessonbook_core::HeuristicTagger;
use lessonbook_core::plan_generation;
use lessonbook_core::rng::TinyRng;
use lessonbook_core::types::aliases::ExampleId;
use lessonbook_core::types::example::Example;
use lessonbook_core::types::exercise::Exercise;
use lessonbook_core::types::exercise::ExerciseType;
use lessonbook_core::types::query::ExerciseQuery;
use lessonbook_core::types::query::LessonQuery;
use lessonbook_core::types::query::WordQuery;
use lessonbook_core::types::word::Word;
use log::info;
use log::warn;

use crate::error::ApiError;
use crate::error::ApiResult;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::Sources;

const LOG_TARGET: &str = "lessonbook::generate";
const API_TARGET: &str = "lessonbook::api";

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateFailure {
    /// The exercise could not be built from the example.
    Planning(GenerationError),
    /// The server refused it, or could not be reached.
    Api(ApiError),
}

impl Display for GenerateFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateFailure::Planning(e) => write!(f, "{e}"),
            GenerateFailure::Api(e) => write!(f, "{e}"),
        }
    }
}

/// What happened to one exercise type.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub exercise_type: ExerciseType,
    pub result: Result<Exercise, GenerateFailure>,
}

pub struct ExerciseGenerator<'a> {
    sources: &'a Sources,
    rules: CaseRules,
    tagger: HeuristicTagger,
    settings: GenerationSettings,
}

impl<'a> ExerciseGenerator<'a> {
    pub fn new(
        sources: &'a Sources,
        rules: CaseRules,
        tagger: HeuristicTagger,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            sources,
            rules,
            tagger,
            settings,
        }
    }

    /// The vocabulary of every lesson in the example's language whose unit
    /// is lower than the example's lesson. Examples outside any lesson get
    /// an empty pool.
    pub async fn candidate_pool(&self, example: &Example) -> ApiResult<Vec<String>> {
        let Some(lesson_id) = example.lesson_id else {
            return Ok(Vec::new());
        };
        let lesson = self.sources.lessons.get(lesson_id).await?;
        let query = LessonQuery {
            language: Some(lesson.language.clone()),
            ..Default::default()
        };
        let earlier = self
            .sources
            .lessons
            .list(&query)
            .await?
            .into_iter()
            .filter(|l| l.unit < lesson.unit);
        let mut pool = Vec::new();
        for l in earlier {
            let query = WordQuery {
                lesson_id: Some(l.id),
                ..Default::default()
            };
            let words = self.sources.words.list(&query).await?;
            pool.extend(words.into_iter().map(|w| w.text));
        }
        Ok(pool)
    }

    /// Create the missing generated exercises for `example`. Each type is
    /// submitted independently and nothing is undone when one fails.
    pub async fn auto_generate(
        &self,
        example: &Example,
        word: &Word,
        existing: &[Exercise],
        rng: &mut TinyRng,
    ) -> Vec<Outcome> {
        let has_selection = existing.iter().any(|e| {
            e.example_id == example.id && e.exercise_type == ExerciseType::WordSelection
        });
        let mut pool_error = None;
        let pool = if has_selection {
            Vec::new()
        } else {
            match self.candidate_pool(example).await {
                Ok(pool) => pool,
                Err(e) => {
                    warn!(target: API_TARGET, "example {}: could not load distractors: {e}", example.id);
                    pool_error = Some(e);
                    Vec::new()
                }
            }
        };
        let plans = {
            let casing = Casing::new(&self.rules, &self.tagger);
            plan_generation(
                example,
                word,
                existing,
                &pool,
                &casing,
                &self.settings,
                rng,
            )
        };
        let mut outcomes = Vec::with_capacity(plans.len());
        for plan in plans {
            let exercise_type = plan.exercise_type;
            let result = match (plan.result, &pool_error) {
                (Err(GenerationError::InsufficientDistractors), Some(e)) => {
                    Err(GenerateFailure::Api(e.clone()))
                }
                (Err(e), _) => {
                    warn!(target: LOG_TARGET, "example {}: no {exercise_type} exercise: {e}", example.id);
                    Err(GenerateFailure::Planning(e))
                }
                (Ok(new), _) => match self.sources.exercises.create(&new).await {
                    Ok(created) => {
                        info!(target: LOG_TARGET, "example {}: created {exercise_type} exercise {}", example.id, created.id);
                        Ok(created)
                    }
                    Err(e) => {
                        warn!(target: API_TARGET, "example {}: {exercise_type} exercise rejected: {e}", example.id);
                        Err(GenerateFailure::Api(e))
                    }
                },
            };
            outcomes.push(Outcome {
                exercise_type,
                result,
            });
        }
        outcomes
    }

    /// Load an example with its word and exercises, then auto-generate.
    pub async fn generate_for_example(
        &self,
        id: ExampleId,
        rng: &mut TinyRng,
    ) -> Fallible<Vec<Outcome>> {
        let example = self.sources.examples.get(id).await?;
        let Some(word_id) = example.word_id else {
            return fail(format!("example {id} is not linked to a word"));
        };
        let word = self.sources.words.get(word_id).await?;
        let query = ExerciseQuery {
            example_id: Some(id),
            ..Default::default()
        };
        let existing = self.sources.exercises.list(&query).await?;
        Ok(self.auto_generate(&example, &word, &existing, rng).await)
    }
}

#[cfg(test)]
mod tests {
    use lessonbook_core::types::example::NewExample;

    use super::*;
    use crate::helper::FakeServer;

    fn generator(sources: &Sources) -> ExerciseGenerator<'_> {
        ExerciseGenerator::new(
            sources,
            CaseRules::english(),
            HeuristicTagger::default(),
            GenerationSettings::default(),
        )
    }

    fn texts(exercise: &Exercise) -> Vec<String> {
        exercise
            .options
            .iter()
            .map(|o| o.text("en").unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_pool_comes_from_earlier_units() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let example = sources.examples.get(20).await?;
        let pool = generator(&sources).candidate_pool(&example).await?;
        assert_eq!(pool, vec!["hello", "book", "table", "phone"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_generates_both_types() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let mut rng = TinyRng::from_seed(7);
        let outcomes = generator(&sources)
            .generate_for_example(20, &mut rng)
            .await?;
        assert_eq!(outcomes.len(), 2);
        let combine = outcomes[0].result.as_ref().unwrap();
        assert_eq!(combine.exercise_type, ExerciseType::WordCombination);
        assert_eq!(combine.prompt, "Compro manzanas en el mercado.");
        assert_eq!(
            texts(combine),
            vec!["I", "buy", "apples", "at", "the", "market"]
        );
        let select = outcomes[1].result.as_ref().unwrap();
        assert_eq!(select.exercise_type, ExerciseType::WordSelection);
        assert_eq!(select.prompt, "I _ apples at the market.");
        let options = texts(select);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], "buy");
        assert!(["hello", "book", "table", "phone"].contains(&options[1].as_str()));
        assert_eq!(select.correct_options, Some(vec![0]));
        assert_eq!(server.exercises().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_generation_is_idempotent() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let mut rng = TinyRng::from_seed(1);
        let generator = generator(&sources);
        generator.generate_for_example(21, &mut rng).await?;
        let again = generator.generate_for_example(21, &mut rng).await?;
        assert!(again.is_empty());
        assert_eq!(server.exercises().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_inflected_answer_and_casing() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let mut rng = TinyRng::from_seed(3);
        let outcomes = generator(&sources)
            .generate_for_example(21, &mut rng)
            .await?;
        let combine = outcomes[0].result.as_ref().unwrap();
        assert_eq!(texts(combine), vec!["she", "walked", "home", "on", "Monday"]);
        let select = outcomes[1].result.as_ref().unwrap();
        assert_eq!(select.prompt, "she _ home on Monday.");
        assert_eq!(texts(select)[0], "walked");
        Ok(())
    }

    #[tokio::test]
    async fn test_types_fail_independently() -> Fallible<()> {
        let server = FakeServer::start().await?;
        server.reject_exercise_type(ExerciseType::WordCombination);
        let sources = Sources::new(&server.client()?);
        let mut rng = TinyRng::from_seed(5);
        let outcomes = generator(&sources)
            .generate_for_example(20, &mut rng)
            .await?;
        assert!(matches!(
            outcomes[0].result,
            Err(GenerateFailure::Api(ApiError::Status { code: 422, .. }))
        ));
        assert!(outcomes[1].result.is_ok());
        let stored = server.exercises();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].exercise_type, ExerciseType::WordSelection);
        Ok(())
    }

    #[tokio::test]
    async fn test_first_unit_has_no_distractors() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let mut rng = TinyRng::from_seed(9);
        let outcomes = generator(&sources)
            .generate_for_example(22, &mut rng)
            .await?;
        assert!(outcomes[0].result.is_ok());
        assert_eq!(
            outcomes[1].result,
            Err(GenerateFailure::Planning(
                GenerationError::InsufficientDistractors
            ))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_example_without_word() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let created = sources
            .examples
            .create(&NewExample {
                text: "Good night.".to_string(),
                language: "en".to_string(),
                translations: Vec::new(),
                word_id: None,
                lesson_id: Some(1),
            })
            .await?;
        let mut rng = TinyRng::from_seed(2);
        let err = generator(&sources)
            .generate_for_example(created.id, &mut rng)
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            format!("example {} is not linked to a word", created.id)
        );
        Ok(())
    }
}
