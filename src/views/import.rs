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

//! Bulk import: a debounced live preview of the pasted text, and the import
//! itself.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use lessonbook_core::text::parser::ImportBlock;
use lessonbook_core::text::parser::ImportRow;
use lessonbook_core::text::parser::RowKind;
use lessonbook_core::text::parser::parse_import;
use lessonbook_core::types::aliases::LessonId;
use lessonbook_core::types::aliases::WordId;
use lessonbook_core::types::example::NewExample;
use lessonbook_core::types::word::NewWord;
use log::info;
use log::warn;
use tokio::spawn;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::error::ApiResult;
use crate::sources::Sources;
use crate::sources::batch::BatchReport;

pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Re-parses the import text once edits have paused for the debounce delay.
/// An edit made while a parse is pending cancels it.
pub struct ImportPreview {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    blocks: Arc<watch::Sender<Vec<ImportBlock>>>,
    parses: Arc<AtomicUsize>,
}

impl ImportPreview {
    pub fn new(delay: Duration) -> Self {
        let (blocks, _) = watch::channel(Vec::new());
        Self {
            delay,
            pending: None,
            blocks: Arc::new(blocks),
            parses: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let text = text.into();
        let delay = self.delay;
        let blocks = self.blocks.clone();
        let parses = self.parses.clone();
        self.pending = Some(spawn(async move {
            sleep(delay).await;
            let parsed = parse_import(&text);
            parses.fetch_add(1, Ordering::SeqCst);
            blocks.send_replace(parsed);
        }));
    }

    /// Wait for the pending parse, if any.
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            if let Err(e) = pending.await {
                if !e.is_cancelled() {
                    warn!("import preview failed: {e}");
                }
            }
        }
    }

    /// The blocks of the latest completed parse.
    pub fn blocks(&self) -> Vec<ImportBlock> {
        self.blocks.borrow().clone()
    }

    /// How many parses have completed.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }
}

impl Drop for ImportPreview {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Creates the parsed rows on the server. An example row is linked to the
/// word row that precedes it in the file.
pub struct BulkImport<'a> {
    sources: &'a Sources,
    language: String,
    lesson_id: Option<LessonId>,
}

impl<'a> BulkImport<'a> {
    pub fn new(sources: &'a Sources, language: &str, lesson_id: Option<LessonId>) -> Self {
        Self {
            sources,
            language: language.to_string(),
            lesson_id,
        }
    }

    pub async fn run(&self, blocks: &[ImportBlock]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut last_word: Option<WordId> = None;
        for block in blocks {
            match block {
                ImportBlock::Skipped { line_num, reason } => {
                    info!("line {}: skipped: {reason}", line_num + 1);
                    report.skip();
                }
                ImportBlock::Row(row) => {
                    let label = format!("line {}: {}", row.line_num + 1, row.text);
                    match row.kind {
                        RowKind::Word => {
                            let result = self.import_word(row).await;
                            last_word = result.as_ref().ok().copied();
                            report.record(label, &result);
                        }
                        RowKind::Example => {
                            let result = self.import_example(row, last_word).await;
                            report.record(label, &result);
                        }
                    }
                }
            }
        }
        info!("import: {}", report.summary());
        report
    }

    async fn import_word(&self, row: &ImportRow) -> ApiResult<WordId> {
        let word = NewWord {
            text: row.text.clone(),
            lemma: row.lemma.clone(),
            language: self.language.clone(),
            part_of_speech: row.part_of_speech.clone(),
            level: row.level,
            translations: row.translations.clone(),
        };
        let created = self.sources.words.create(&word).await?;
        if let Some(lesson) = self.lesson_id {
            self.sources.lessons.attach_word(lesson, created.id).await?;
        }
        Ok(created.id)
    }

    async fn import_example(&self, row: &ImportRow, word_id: Option<WordId>) -> ApiResult<()> {
        let example = NewExample {
            text: row.text.clone(),
            language: self.language.clone(),
            translations: row.translations.clone(),
            word_id,
            lesson_id: self.lesson_id,
        };
        self.sources.examples.create(&example).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::task::yield_now;
    use tokio::time::advance;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::FakeServer;

    const TEXT: &str = "word: umbrella
es: paraguas

example: Take an umbrella.
es: Lleva un paraguas.

word: raincoat
level: many

lemma: sky
";

    #[tokio::test(start_paused = true)]
    async fn test_parse_waits_for_pause() {
        let mut preview = ImportPreview::new(DEBOUNCE);
        preview.edit("word: cat");
        advance(Duration::from_millis(200)).await;
        yield_now().await;
        assert_eq!(preview.parse_count(), 0);
        assert!(preview.blocks().is_empty());
        preview.settle().await;
        assert_eq!(preview.parse_count(), 1);
        assert_eq!(preview.blocks().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_edit_cancels_pending_parse() {
        let mut preview = ImportPreview::new(DEBOUNCE);
        preview.edit("word: cat");
        advance(Duration::from_millis(100)).await;
        preview.edit("word: cat\nes: gato\n\nword: dog");
        advance(Duration::from_millis(200)).await;
        yield_now().await;
        assert_eq!(preview.parse_count(), 0);
        preview.settle().await;
        assert_eq!(preview.parse_count(), 1);
        assert_eq!(preview.blocks().len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_import() -> Fallible<()> {
        let server = FakeServer::start().await?;
        let sources = Sources::new(&server.client()?);
        let blocks = parse_import(TEXT);
        let report = BulkImport::new(&sources, "en", Some(3)).run(&blocks).await;
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.skipped, 2);
        assert!(report.is_complete());
        let umbrella = server
            .words()
            .into_iter()
            .find(|w| w.text == "umbrella")
            .unwrap();
        assert_eq!(umbrella.lesson_ids, vec![3]);
        let example = server
            .examples()
            .into_iter()
            .find(|e| e.text == "Take an umbrella.")
            .unwrap();
        assert_eq!(example.word_id, Some(umbrella.id));
        assert_eq!(example.lesson_id, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_import() -> Fallible<()> {
        let server = FakeServer::start().await?;
        server.break_lesson(3);
        let sources = Sources::new(&server.client()?);
        let blocks = parse_import("word: fog\n\nexample: What fog!\n");
        let report = BulkImport::new(&sources, "en", Some(3)).run(&blocks).await;
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "line 1: fog");
        // The example of a failed word is not linked to it.
        let example = server
            .examples()
            .into_iter()
            .find(|e| e.text == "What fog!")
            .unwrap();
        assert_eq!(example.word_id, None);
        Ok(())
    }
}
