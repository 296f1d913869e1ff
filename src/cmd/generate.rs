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

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use lessonbook_core::rng::TinyRng;
use lessonbook_core::types::aliases::ExampleId;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::query::ExampleQuery;

use crate::cmd::Session;
use crate::error::Fallible;
use crate::error::fail;
use crate::generator::ExerciseGenerator;
use crate::generator::Outcome;

/// Which examples to generate exercises for.
pub enum Target {
    Example(ExampleId),
    Lesson(LessonId),
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

pub fn format_outcome(example: ExampleId, outcome: &Outcome) -> String {
    match &outcome.result {
        Ok(exercise) => format!(
            "example {example}: created {} exercise {}",
            outcome.exercise_type, exercise.id
        ),
        Err(e) => format!(
            "example {example}: no {} exercise: {e}",
            outcome.exercise_type
        ),
    }
}

pub async fn generate(session: &Session, target: Target, seed: Option<u64>) -> Fallible<()> {
    let config = &session.config;
    let generator = ExerciseGenerator::new(
        &session.sources,
        config.case_rules(),
        config.tagger(),
        config.generation_settings(),
    );
    let mut rng = TinyRng::from_seed(seed.unwrap_or_else(clock_seed));
    let examples: Vec<ExampleId> = match target {
        Target::Example(id) => vec![id],
        Target::Lesson(lesson) => {
            let query = ExampleQuery {
                lesson_id: Some(lesson),
                ..Default::default()
            };
            let examples = session.sources.examples.list(&query).await?;
            examples
                .into_iter()
                .filter(|e| e.word_id.is_some())
                .map(|e| e.id)
                .collect()
        }
    };
    let mut created = 0;
    let mut failed = 0;
    for id in examples {
        let outcomes = match generator.generate_for_example(id, &mut rng).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                eprintln!("example {id}: {}", e.message());
                failed += 1;
                continue;
            }
        };
        if outcomes.is_empty() {
            println!("example {id}: nothing to generate");
        }
        for outcome in &outcomes {
            println!("{}", format_outcome(id, outcome));
            if outcome.result.is_ok() {
                created += 1;
            } else {
                failed += 1;
            }
        }
    }
    println!("{created} exercises created.");
    if failed > 0 {
        return fail(format!("{failed} exercises could not be generated"));
    }
    Ok(())
}
