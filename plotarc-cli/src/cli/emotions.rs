//! Emotions command - NRC emotion totals per sentence

use anyhow::{bail, Result};
use plotarc_fast::lexicon::Lexicon;
use std::path::Path;

use super::context::RunContext;
use crate::lexicon::{builtin, load_custom_lexicon, BuiltinTable};
use crate::models::Report;
use crate::pipeline::{self, Document};

pub(super) fn run(ctx: &RunContext, file: &Path, lang: Option<&str>, lexicon: Option<&Path>) -> Result<()> {
    let language = ctx.language(lang);

    let custom: Lexicon;
    let table = match lexicon {
        Some(path) => {
            custom = load_custom_lexicon(path)?;
            &custom
        }
        None => builtin(BuiltinTable::Nrc),
    };
    let subset = table.for_language(&language);
    if subset.is_empty() {
        bail!(
            "No emotion entries for language '{}'. Available: {}",
            language,
            table.languages().join(", ")
        );
    }

    let doc = Document::read(file)?;
    let report = pipeline::emotions(&doc, &subset, &language, &ctx.executor)?;
    ctx.emit(Report::Emotions(report))
}
