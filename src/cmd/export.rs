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

use lessonbook_core::text::export::LessonExport;
use lessonbook_core::text::export::WordExport;
use lessonbook_core::text::export::format_lessons;
use lessonbook_core::types::query::ExampleQuery;
use lessonbook_core::types::query::LessonQuery;
use lessonbook_core::types::query::WordQuery;

use crate::cmd::Session;
use crate::error::ApiResult;
use crate::error::Fallible;
use crate::sources::Sources;

/// Fetch every lesson matching `query` with its words, and each word's
/// examples within that lesson. Lessons are ordered by unit.
pub async fn collect_lessons(sources: &Sources, query: &LessonQuery) -> ApiResult<Vec<LessonExport>> {
    let mut lessons = sources.lessons.list(query).await?;
    lessons.sort_by(|a, b| (a.unit, a.id).cmp(&(b.unit, b.id)));
    let mut exports = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        let words = sources
            .words
            .list(&WordQuery {
                lesson_id: Some(lesson.id),
                ..Default::default()
            })
            .await?;
        let mut entries = Vec::with_capacity(words.len());
        for word in words {
            let examples = sources
                .examples
                .list(&ExampleQuery {
                    word_id: Some(word.id),
                    lesson_id: Some(lesson.id),
                    ..Default::default()
                })
                .await?;
            entries.push(WordExport { word, examples });
        }
        exports.push(LessonExport {
            lesson,
            words: entries,
        });
    }
    Ok(exports)
}

pub async fn export_lessons(
    session: &Session,
    query: LessonQuery,
    output: Option<String>,
) -> Fallible<()> {
    let lessons = collect_lessons(&session.sources, &query).await?;
    let text = format_lessons(&lessons);
    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!("Exported {} lessons to {path}.", lessons.len());
        }
        None => print!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::FakeServer;

    #[tokio::test]
    async fn test_export_market_lesson() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let query = LessonQuery {
            level: Some("A2".to_string()),
            ..Default::default()
        };
        let lessons = collect_lessons(&sources, &query).await?;
        assert_eq!(
            format_lessons(&lessons),
            "3

At the market

Present simple

buy
comprar

walk
caminar

I buy apples at the market.
Compro manzanas en el mercado.

She walked home on Monday.
Ella caminó a casa el lunes.

"
        );
        Ok(())
    }
}
