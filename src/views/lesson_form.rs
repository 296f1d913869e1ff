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

use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::lesson::Lesson;
use lessonbook_core::types::lesson::LessonPatch;
use lessonbook_core::types::lesson::NewLesson;

use crate::error::ValidationError;
use crate::sources::lessons::Lessons;

/// The create/edit lesson form. Fields hold raw user input.
#[derive(Debug, Default, Clone)]
pub struct LessonForm {
    /// The lesson being edited, if any.
    pub id: Option<LessonId>,
    pub unit: String,
    pub level: String,
    pub topic: String,
    pub grammar: String,
    pub language: String,
    pub error: Option<String>,
}

impl LessonForm {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            ..Default::default()
        }
    }

    pub fn edit(lesson: &Lesson) -> Self {
        Self {
            id: Some(lesson.id),
            unit: lesson.unit.to_string(),
            level: lesson.level.clone(),
            topic: lesson.topic.clone(),
            grammar: lesson.grammar.clone().unwrap_or_default(),
            language: lesson.language.clone(),
            error: None,
        }
    }

    pub fn validate(&self) -> Result<NewLesson, ValidationError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::Required("Topic"));
        }
        let unit = self.unit.trim();
        if unit.is_empty() {
            return Err(ValidationError::Required("Unit"));
        }
        let unit: u32 = unit
            .parse()
            .map_err(|_| ValidationError::NotANumber("Unit"))?;
        let grammar = self.grammar.trim();
        Ok(NewLesson {
            unit,
            level: self.level.trim().to_string(),
            topic: topic.to_string(),
            grammar: (!grammar.is_empty()).then(|| grammar.to_string()),
            language: self.language.trim().to_string(),
        })
    }

    /// Validate, then create or update the lesson. Nothing is sent when
    /// validation fails.
    pub async fn submit(&mut self, source: &Lessons) -> Option<Lesson> {
        let lesson = match self.validate() {
            Ok(lesson) => lesson,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };
        let result = match self.id {
            Some(id) => {
                let patch = LessonPatch {
                    unit: Some(lesson.unit),
                    level: Some(lesson.level),
                    topic: Some(lesson.topic),
                    grammar: Some(lesson.grammar),
                };
                source.update(id, &patch).await
            }
            None => source.create(&lesson).await,
        };
        match result {
            Ok(saved) => {
                self.error = None;
                self.id = Some(saved.id);
                Some(saved)
            }
            Err(e) => {
                self.error = Some(format!("Could not save the lesson: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::helper::FakeServer;

    fn form(unit: &str, topic: &str) -> LessonForm {
        LessonForm {
            unit: unit.to_string(),
            level: "A1".to_string(),
            topic: topic.to_string(),
            ..LessonForm::new("en")
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            form("2", "  ").validate(),
            Err(ValidationError::Required("Topic"))
        );
        assert_eq!(
            form("", "Food").validate(),
            Err(ValidationError::Required("Unit"))
        );
        assert_eq!(
            form("two", "Food").validate(),
            Err(ValidationError::NotANumber("Unit"))
        );
        let lesson = form(" 2 ", " Food ").validate().unwrap();
        assert_eq!(lesson.unit, 2);
        assert_eq!(lesson.topic, "Food");
        assert_eq!(lesson.grammar, None);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let source = Lessons::new(server.client()?);
        let mut form = form("x", "Food");
        assert_eq!(form.submit(&source).await, None);
        assert_eq!(form.error.as_deref(), Some("Unit must be a number."));
        assert!(server.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_then_edit() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let source = Lessons::new(server.client()?);
        let mut form = form("5", "Weather");
        let created = form.submit(&source).await.unwrap();
        assert_eq!(form.id, Some(created.id));
        let mut edit = LessonForm::edit(&created);
        edit.grammar = "Future tense".to_string();
        let updated = edit.submit(&source).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.grammar.as_deref(), Some("Future tense"));
        assert_eq!(server.lesson_count(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_emptied_grammar_is_cleared() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let source = Lessons::new(server.client()?);
        let shopping = source.get(2).await?;
        assert_eq!(shopping.grammar.as_deref(), Some("Plural nouns"));
        let mut edit = LessonForm::edit(&shopping);
        edit.grammar = "  ".to_string();
        let updated = edit.submit(&source).await.unwrap();
        assert_eq!(updated.grammar, None);
        assert_eq!(
            server.last_request(),
            "PUT /lessons/2 {\"unit\":2,\"level\":\"A1\",\"topic\":\"Shopping\",\"grammar\":null}"
        );
        assert_eq!(source.get(2).await?.grammar, None);
        Ok(())
    }
}
