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

//! An in-process fake of the lesson server for tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::body::to_bytes;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use lessonbook_core::types::auth::AuthToken;
use lessonbook_core::types::example::Example;
use lessonbook_core::types::example::NewExample;
use lessonbook_core::types::exercise::Exercise;
use lessonbook_core::types::exercise::ExerciseType;
use lessonbook_core::types::exercise::NewExercise;
use lessonbook_core::types::lesson::ExpressionOrder;
use lessonbook_core::types::lesson::Lesson;
use lessonbook_core::types::lesson::LessonPatch;
use lessonbook_core::types::lesson::NewLesson;
use lessonbook_core::types::tag::NewTag;
use lessonbook_core::types::tag::Tag;
use lessonbook_core::types::translation::Translation;
use lessonbook_core::types::word::NewForm;
use lessonbook_core::types::word::NewSense;
use lessonbook_core::types::word::NewWord;
use lessonbook_core::types::word::Word;
use lessonbook_core::types::word::WordForm;
use lessonbook_core::types::word::WordPatch;
use lessonbook_core::types::word::WordSense;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::spawn;
use tokio::time::sleep;

use crate::client::ApiClient;
use crate::error::Fallible;

pub const PASSWORD: &str = "sesame";
pub const TOKEN: &str = "tok-ana";

type Shared = Arc<Mutex<FakeState>>;
type Reply<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Default)]
struct FakeState {
    lessons: Vec<Lesson>,
    words: Vec<Word>,
    senses: Vec<WordSense>,
    forms: Vec<WordForm>,
    examples: Vec<Example>,
    exercises: Vec<Exercise>,
    tags: Vec<Tag>,
    orders: Vec<(i64, Vec<i64>)>,
    next_id: i64,
    broken_lessons: HashSet<i64>,
    rejected_type: Option<ExerciseType>,
    requests: Vec<String>,
}

impl FakeState {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default, Deserialize)]
struct Filter {
    q: Option<String>,
    level: Option<String>,
    unit: Option<u32>,
    language: Option<String>,
    lesson_id: Option<i64>,
    word_id: Option<i64>,
    example_id: Option<i64>,
}

fn missing(kind: &str, id: i64) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{kind} {id} not found"))
}

fn lesson(id: i64, unit: u32, level: &str, topic: &str, grammar: Option<&str>) -> Lesson {
    Lesson {
        id,
        unit,
        level: level.to_string(),
        topic: topic.to_string(),
        grammar: grammar.map(str::to_string),
        language: "en".to_string(),
        tags: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

fn word(id: i64, text: &str, lesson_id: i64, spanish: &str) -> Word {
    Word {
        id,
        text: text.to_string(),
        lemma: None,
        language: "en".to_string(),
        part_of_speech: None,
        level: None,
        translations: vec![Translation::new("es", spanish)],
        lesson_ids: vec![lesson_id],
    }
}

fn example(id: i64, text: &str, spanish: &str, word_id: i64, lesson_id: i64) -> Example {
    Example {
        id,
        text: text.to_string(),
        language: "en".to_string(),
        translations: vec![Translation::new("es", spanish)],
        word_id: Some(word_id),
        lesson_id: Some(lesson_id),
    }
}

fn seed() -> FakeState {
    let travel = Tag {
        id: 1,
        name: "travel".to_string(),
    };
    let food = Tag {
        id: 2,
        name: "food".to_string(),
    };
    let mut shopping = lesson(2, 2, "A1", "Shopping", Some("Plural nouns"));
    shopping.tags.push(travel.clone());
    FakeState {
        lessons: vec![
            lesson(1, 1, "A1", "Greetings", None),
            shopping,
            lesson(3, 3, "A2", "At the market", Some("Present simple")),
        ],
        words: vec![
            word(10, "hello", 1, "hola"),
            word(11, "book", 1, "libro"),
            word(12, "table", 2, "mesa"),
            word(13, "phone", 2, "teléfono"),
            word(14, "buy", 3, "comprar"),
            word(15, "walk", 3, "caminar"),
        ],
        examples: vec![
            example(
                20,
                "I buy apples at the market.",
                "Compro manzanas en el mercado.",
                14,
                3,
            ),
            example(
                21,
                "She walked home on Monday.",
                "Ella caminó a casa el lunes.",
                15,
                3,
            ),
            example(22, "Hello, Tom!", "¡Hola, Tom!", 10, 1),
        ],
        tags: vec![travel, food],
        next_id: 100,
        ..Default::default()
    }
}

async fn wait_for_server(host: &str, port: u16) {
    while TcpStream::connect(format!("{host}:{port}")).await.is_err() {
        sleep(Duration::from_millis(1)).await;
    }
}

/// A fake server running on a free local port.
pub struct FakeServer {
    port: u16,
    state: Shared,
}

impl FakeServer {
    pub async fn start() -> Fallible<Self> {
        let state: Shared = Arc::new(Mutex::new(seed()));
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/lessons", get(list_lessons).post(create_lesson))
            .route(
                "/lessons/{id}",
                get(get_lesson).put(update_lesson).delete(delete_lesson),
            )
            .route(
                "/lessons/{id}/tags/{tag}",
                post(attach_tag).delete(detach_tag),
            )
            .route(
                "/lessons/{id}/words/{word}",
                post(attach_word).delete(detach_word),
            )
            .route("/lessons/{id}/expressions/order", put(reorder))
            .route("/words", get(list_words).post(create_word))
            .route("/words/{id}", get(get_word).put(update_word))
            .route("/senses", get(list_senses).post(create_sense))
            .route("/senses/{id}", delete(delete_sense))
            .route("/forms", get(list_forms).post(create_form))
            .route("/examples", get(list_examples).post(create_example))
            .route("/examples/{id}", get(get_example))
            .route("/exercises", get(list_exercises).post(create_exercise))
            .route("/tags", get(list_tags).post(create_tag))
            .route("/tags/{id}", delete(delete_tag))
            .route("/broken", get(broken))
            .layer(from_fn_with_state(state.clone(), record_and_authorize))
            .with_state(state.clone());
        let port = portpicker::pick_unused_port().unwrap();
        let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
        spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        wait_for_server("127.0.0.1", port).await;
        Ok(Self { port, state })
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn anonymous_client(&self) -> Fallible<ApiClient> {
        Ok(ApiClient::new(&self.url(), None)?)
    }

    pub fn client(&self) -> Fallible<ApiClient> {
        Ok(self.anonymous_client()?.with_token(Some(TOKEN.to_string())))
    }

    /// Requests as `METHOD /path?query body`, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> String {
        self.requests().pop().unwrap_or_default()
    }

    pub fn lesson_count(&self) -> usize {
        self.state.lock().unwrap().lessons.len()
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.state.lock().unwrap().exercises.clone()
    }

    pub fn words(&self) -> Vec<Word> {
        self.state.lock().unwrap().words.clone()
    }

    pub fn examples(&self) -> Vec<Example> {
        self.state.lock().unwrap().examples.clone()
    }

    /// Make every tag or word link call on this lesson fail with a 500.
    pub fn break_lesson(&self, id: i64) {
        self.state.lock().unwrap().broken_lessons.insert(id);
    }

    /// Make the server refuse to create exercises of this type.
    pub fn reject_exercise_type(&self, exercise_type: ExerciseType) {
        self.state.lock().unwrap().rejected_type = Some(exercise_type);
    }
}

async fn record_and_authorize(
    State(state): State<Shared>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let target = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let mut line = format!("{} {target}", parts.method);
    if !bytes.is_empty() {
        line.push(' ');
        line.push_str(&String::from_utf8_lossy(&bytes));
    }
    state.lock().unwrap().requests.push(line);
    let expected = format!("Bearer {TOKEN}");
    let authorized = parts
        .headers
        .get(AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes());
    if parts.uri.path() != "/auth/login" && !authorized {
        return (StatusCode::UNAUTHORIZED, "not authenticated").into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn login(body: String) -> Reply<AuthToken> {
    let fields: Vec<(&str, &str)> = body.split('&').filter_map(|f| f.split_once('=')).collect();
    let password = fields
        .iter()
        .find(|(key, _)| *key == "password")
        .map(|(_, value)| *value);
    if password != Some(PASSWORD) {
        return Err((StatusCode::UNAUTHORIZED, "bad credentials".to_string()));
    }
    Ok(Json(AuthToken {
        access_token: TOKEN.to_string(),
        token_type: "bearer".to_string(),
    }))
}

async fn list_lessons(State(state): State<Shared>, Query(f): Query<Filter>) -> Json<Vec<Lesson>> {
    let state = state.lock().unwrap();
    let q = f.q.map(|q| q.to_lowercase());
    let lessons = state
        .lessons
        .iter()
        .filter(|l| f.level.as_ref().is_none_or(|level| &l.level == level))
        .filter(|l| f.unit.is_none_or(|unit| l.unit == unit))
        .filter(|l| f.language.as_ref().is_none_or(|lang| &l.language == lang))
        .filter(|l| {
            q.as_ref()
                .is_none_or(|q| l.topic.to_lowercase().contains(q))
        })
        .cloned()
        .collect();
    Json(lessons)
}

async fn get_lesson(State(state): State<Shared>, Path(id): Path<i64>) -> Reply<Lesson> {
    let state = state.lock().unwrap();
    let lesson = state.lessons.iter().find(|l| l.id == id);
    lesson.cloned().map(Json).ok_or_else(|| missing("lesson", id))
}

async fn create_lesson(State(state): State<Shared>, Json(new): Json<NewLesson>) -> Json<Lesson> {
    let mut state = state.lock().unwrap();
    let id = state.id();
    let mut created = lesson(id, new.unit, &new.level, &new.topic, new.grammar.as_deref());
    created.language = new.language;
    state.lessons.push(created.clone());
    Json(created)
}

async fn update_lesson(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(patch): Json<LessonPatch>,
) -> Reply<Lesson> {
    let mut state = state.lock().unwrap();
    let lesson = state
        .lessons
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| missing("lesson", id))?;
    if let Some(unit) = patch.unit {
        lesson.unit = unit;
    }
    if let Some(level) = patch.level {
        lesson.level = level;
    }
    if let Some(topic) = patch.topic {
        lesson.topic = topic;
    }
    if let Some(grammar) = patch.grammar {
        lesson.grammar = grammar;
    }
    Ok(Json(lesson.clone()))
}

async fn delete_lesson(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.lessons.retain(|l| l.id != id);
    StatusCode::NO_CONTENT
}

fn link_lesson<'a>(
    state: &'a mut FakeState,
    id: i64,
) -> Result<&'a mut Lesson, (StatusCode, String)> {
    if state.broken_lessons.contains(&id) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "database is locked".to_string()));
    }
    state
        .lessons
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| missing("lesson", id))
}

async fn attach_tag(
    State(state): State<Shared>,
    Path((id, tag)): Path<(i64, i64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = state.lock().unwrap();
    let tag = state
        .tags
        .iter()
        .find(|t| t.id == tag)
        .cloned()
        .ok_or_else(|| missing("tag", tag))?;
    let lesson = link_lesson(&mut state, id)?;
    if !lesson.tags.contains(&tag) {
        lesson.tags.push(tag);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn detach_tag(
    State(state): State<Shared>,
    Path((id, tag)): Path<(i64, i64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = state.lock().unwrap();
    let lesson = link_lesson(&mut state, id)?;
    lesson.tags.retain(|t| t.id != tag);
    Ok(StatusCode::NO_CONTENT)
}

async fn attach_word(
    State(state): State<Shared>,
    Path((id, word)): Path<(i64, i64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = state.lock().unwrap();
    link_lesson(&mut state, id)?;
    let word = state
        .words
        .iter_mut()
        .find(|w| w.id == word)
        .ok_or_else(|| missing("word", word))?;
    if !word.lesson_ids.contains(&id) {
        word.lesson_ids.push(id);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn detach_word(
    State(state): State<Shared>,
    Path((id, word)): Path<(i64, i64)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut state = state.lock().unwrap();
    link_lesson(&mut state, id)?;
    if let Some(word) = state.words.iter_mut().find(|w| w.id == word) {
        word.lesson_ids.retain(|l| *l != id);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(order): Json<ExpressionOrder>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.orders.retain(|(lesson, _)| *lesson != id);
    state.orders.push((id, order.ids));
    StatusCode::NO_CONTENT
}

async fn list_words(State(state): State<Shared>, Query(f): Query<Filter>) -> Json<Vec<Word>> {
    let state = state.lock().unwrap();
    let q = f.q.map(|q| q.to_lowercase());
    let words = state
        .words
        .iter()
        .filter(|w| q.as_ref().is_none_or(|q| w.text.to_lowercase().contains(q)))
        .filter(|w| f.lesson_id.is_none_or(|id| w.lesson_ids.contains(&id)))
        .filter(|w| f.language.as_ref().is_none_or(|lang| &w.language == lang))
        .cloned()
        .collect();
    Json(words)
}

async fn get_word(State(state): State<Shared>, Path(id): Path<i64>) -> Reply<Word> {
    let state = state.lock().unwrap();
    let word = state.words.iter().find(|w| w.id == id);
    word.cloned().map(Json).ok_or_else(|| missing("word", id))
}

async fn create_word(State(state): State<Shared>, Json(new): Json<NewWord>) -> Reply<Word> {
    if new.text.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "text is empty".to_string()));
    }
    let mut state = state.lock().unwrap();
    let id = state.id();
    let created = Word {
        id,
        text: new.text,
        lemma: new.lemma,
        language: new.language,
        part_of_speech: new.part_of_speech,
        level: new.level,
        translations: new.translations,
        lesson_ids: Vec::new(),
    };
    state.words.push(created.clone());
    Ok(Json(created))
}

async fn update_word(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(patch): Json<WordPatch>,
) -> Reply<Word> {
    let mut state = state.lock().unwrap();
    let word = state
        .words
        .iter_mut()
        .find(|w| w.id == id)
        .ok_or_else(|| missing("word", id))?;
    if let Some(text) = patch.text {
        word.text = text;
    }
    if patch.lemma.is_some() {
        word.lemma = patch.lemma;
    }
    if patch.part_of_speech.is_some() {
        word.part_of_speech = patch.part_of_speech;
    }
    if patch.level.is_some() {
        word.level = patch.level;
    }
    if let Some(translations) = patch.translations {
        word.translations = translations;
    }
    Ok(Json(word.clone()))
}

async fn list_senses(State(state): State<Shared>, Query(f): Query<Filter>) -> Json<Vec<WordSense>> {
    let state = state.lock().unwrap();
    let senses = state.senses.iter();
    Json(
        senses
            .filter(|s| f.word_id.is_none_or(|id| s.word_id == id))
            .cloned()
            .collect(),
    )
}

async fn create_sense(State(state): State<Shared>, Json(new): Json<NewSense>) -> Json<WordSense> {
    let mut state = state.lock().unwrap();
    let id = state.id();
    let sense = WordSense {
        id,
        word_id: new.word_id,
        definition: new.definition,
        translations: new.translations,
    };
    state.senses.push(sense.clone());
    Json(sense)
}

async fn delete_sense(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    state.lock().unwrap().senses.retain(|s| s.id != id);
    StatusCode::NO_CONTENT
}

async fn list_forms(State(state): State<Shared>, Query(f): Query<Filter>) -> Json<Vec<WordForm>> {
    let state = state.lock().unwrap();
    let forms = state.forms.iter();
    Json(
        forms
            .filter(|s| f.word_id.is_none_or(|id| s.word_id == id))
            .cloned()
            .collect(),
    )
}

async fn create_form(State(state): State<Shared>, Json(new): Json<NewForm>) -> Json<WordForm> {
    let mut state = state.lock().unwrap();
    let id = state.id();
    let form = WordForm {
        id,
        word_id: new.word_id,
        form: new.form,
        label: new.label,
    };
    state.forms.push(form.clone());
    Json(form)
}

async fn list_examples(State(state): State<Shared>, Query(f): Query<Filter>) -> Json<Vec<Example>> {
    let state = state.lock().unwrap();
    let q = f.q.map(|q| q.to_lowercase());
    let examples = state
        .examples
        .iter()
        .filter(|e| q.as_ref().is_none_or(|q| e.text.to_lowercase().contains(q)))
        .filter(|e| f.word_id.is_none_or(|id| e.word_id == Some(id)))
        .filter(|e| f.lesson_id.is_none_or(|id| e.lesson_id == Some(id)))
        .cloned()
        .collect();
    Json(examples)
}

async fn get_example(State(state): State<Shared>, Path(id): Path<i64>) -> Reply<Example> {
    let state = state.lock().unwrap();
    let example = state.examples.iter().find(|e| e.id == id);
    example.cloned().map(Json).ok_or_else(|| missing("example", id))
}

async fn create_example(State(state): State<Shared>, Json(new): Json<NewExample>) -> Json<Example> {
    let mut state = state.lock().unwrap();
    let id = state.id();
    let created = Example {
        id,
        text: new.text,
        language: new.language,
        translations: new.translations,
        word_id: new.word_id,
        lesson_id: new.lesson_id,
    };
    state.examples.push(created.clone());
    Json(created)
}

async fn list_exercises(
    State(state): State<Shared>,
    Query(f): Query<Filter>,
) -> Json<Vec<Exercise>> {
    let state = state.lock().unwrap();
    let exercises = state.exercises.iter();
    Json(
        exercises
            .filter(|e| f.example_id.is_none_or(|id| e.example_id == id))
            .cloned()
            .collect(),
    )
}

async fn create_exercise(
    State(state): State<Shared>,
    Json(new): Json<NewExercise>,
) -> Reply<Exercise> {
    let mut state = state.lock().unwrap();
    if state.rejected_type == Some(new.exercise_type) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} exercises are disabled", new.exercise_type),
        ));
    }
    let id = state.id();
    let created = new.into_exercise(id);
    state.exercises.push(created.clone());
    Ok(Json(created))
}

async fn list_tags(State(state): State<Shared>) -> Json<Vec<Tag>> {
    Json(state.lock().unwrap().tags.clone())
}

async fn create_tag(State(state): State<Shared>, Json(new): Json<NewTag>) -> Json<Tag> {
    let mut state = state.lock().unwrap();
    let id = state.id();
    let tag = Tag { id, name: new.name };
    state.tags.push(tag.clone());
    Json(tag)
}

async fn delete_tag(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    state.lock().unwrap().tags.retain(|t| t.id != id);
    StatusCode::NO_CONTENT
}

async fn broken() -> &'static str {
    "{\"id\": \"not a number\""
}
