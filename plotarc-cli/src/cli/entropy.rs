//! Entropy command - mixed-message entropy of the whole text

use anyhow::Result;
use std::path::Path;

use super::context::RunContext;
use super::ScoringArgs;
use crate::models::Report;
use crate::pipeline::{self, Document};
use crate::sentiment::Scoring;

pub(super) fn run(ctx: &RunContext, file: &Path, args: &ScoringArgs, remove_neutral: bool) -> Result<()> {
    let scoring = Scoring::resolve(&ctx.scoring_settings(args)?)?;
    let doc = Document::read(file)?;
    let report = pipeline::entropy(&doc, &scoring, remove_neutral)?;
    ctx.emit(Report::Entropy(report))
}
