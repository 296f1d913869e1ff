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
use std::path::Path;

use lessonbook_core::text::parser::ImportBlock;
use lessonbook_core::text::parser::RowKind;
use lessonbook_core::text::parser::parse_import;
use lessonbook_core::types::aliases::LessonId;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::stdin;
use walkdir::WalkDir;

use crate::cmd::Session;
use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::sources::batch::BatchReport;
use crate::views::import::BulkImport;
use crate::views::import::DEBOUNCE;
use crate::views::import::ImportPreview;

/// Read the files to import: `path` itself, or every `.txt` file under it
/// when it is a directory, in name order.
pub fn read_import_files(path: &Path) -> Fallible<Vec<(String, String)>> {
    if !path.exists() {
        return fail(format!("no such file or directory: {}", path.display()));
    }
    if path.is_file() {
        let text = std::fs::read_to_string(path)?;
        return Ok(vec![(path.display().to_string(), text)]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| ErrorReport::new(format!("cannot read directory: {e}")))?;
        let is_txt = entry.path().extension().is_some_and(|ext| ext == "txt");
        if entry.file_type().is_file() && is_txt {
            let text = std::fs::read_to_string(entry.path())?;
            files.push((entry.path().display().to_string(), text));
        }
    }
    if files.is_empty() {
        return fail(format!("no .txt files under {}", path.display()));
    }
    Ok(files)
}

/// Read pasted text from standard input, re-parsing it as it arrives.
async fn read_stdin() -> Fallible<Vec<ImportBlock>> {
    let mut preview = ImportPreview::new(DEBOUNCE);
    let mut lines = BufReader::new(stdin()).lines();
    let mut text = String::new();
    while let Some(line) = lines.next_line().await? {
        text.push_str(&line);
        text.push('\n');
        preview.edit(text.clone());
    }
    preview.edit(text);
    preview.settle().await;
    Ok(preview.blocks())
}

/// One line per block: what will be created, or why it is skipped.
pub fn format_blocks(source: &str, blocks: &[ImportBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            ImportBlock::Row(row) => {
                let kind = match row.kind {
                    RowKind::Word => "word",
                    RowKind::Example => "example",
                };
                let _ = writeln!(
                    out,
                    "{source}:{}: {kind} \"{}\" ({} translations)",
                    row.line_num + 1,
                    row.text,
                    row.translations.len()
                );
            }
            ImportBlock::Skipped { line_num, reason } => {
                let _ = writeln!(out, "{source}:{}: skipped: {reason}", line_num + 1);
            }
        }
    }
    out
}

pub async fn import(
    config: Config,
    path: &str,
    lesson: Option<LessonId>,
    dry_run: bool,
) -> Fallible<()> {
    let files: Vec<(String, Vec<ImportBlock>)> = if path == "-" {
        vec![("<stdin>".to_string(), read_stdin().await?)]
    } else {
        read_import_files(Path::new(path))?
            .into_iter()
            .map(|(name, text)| {
                let blocks = parse_import(&text);
                (name, blocks)
            })
            .collect()
    };
    for (name, blocks) in &files {
        print!("{}", format_blocks(name, blocks));
    }
    if dry_run {
        return Ok(());
    }
    let language = config.language().to_string();
    let session = Session::open(config)?;
    let importer = BulkImport::new(&session.sources, &language, lesson);
    let mut report = BatchReport::default();
    for (_, blocks) in &files {
        report.merge(importer.run(blocks).await);
    }
    for (label, reason) in &report.failed {
        eprintln!("{label}: {reason}");
    }
    println!("Import: {}.", report.summary());
    if !report.is_complete() {
        return fail(format!("{} entries could not be imported", report.failed.len()));
    }
    Ok(())
}
