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

use lessonbook_core::Casing;
use lessonbook_core::TokenKind;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::views::draft::DraftPreview;
use crate::views::draft::ExerciseDraft;
use crate::views::draft::recompute;

fn kind_label(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Word => "word",
        TokenKind::Number => "number",
        TokenKind::TimeAbbreviation => "time",
        TokenKind::Punctuation => "punct",
        TokenKind::Phrase => "phrase",
        TokenKind::Symbol => "symbol",
    }
}

/// The numbered token list, the prompt, and the options of a draft.
pub fn format_preview(preview: &DraftPreview) -> String {
    let mut out = String::new();
    for (i, token) in preview.tokens.iter().enumerate() {
        let _ = writeln!(out, "{i:>3}  {:<7} {}", kind_label(token.kind), token.text);
    }
    if let Some(error) = &preview.error {
        let _ = writeln!(out, "\n{error}");
        return out;
    }
    let _ = writeln!(out, "\nPrompt: {}", preview.prompt);
    for (i, option) in preview.options.iter().enumerate() {
        let mark = if preview.correct.contains(&i) { '*' } else { ' ' };
        let _ = writeln!(out, "  {mark} {option}");
    }
    out
}

/// Preview an exercise without talking to the server.
pub fn preview(config: &Config, mut draft: ExerciseDraft) -> Fallible<()> {
    if let Some(count) = config.distractor_count {
        draft.distractor_count = count;
    }
    let rules = config.case_rules();
    let tagger = config.tagger();
    let result = recompute(&draft, &Casing::new(&rules, &tagger));
    print!("{}", format_preview(&result));
    match &result.error {
        Some(error) => fail(error.clone()),
        None => Ok(()),
    }
}
