//! Sentiment command - per-sentence scores

use anyhow::Result;
use std::path::Path;

use super::context::RunContext;
use super::ScoringArgs;
use crate::models::Report;
use crate::pipeline::{self, Document};
use crate::sentiment::Scoring;

pub(super) fn run(ctx: &RunContext, file: &Path, args: &ScoringArgs, narrative_time: bool) -> Result<()> {
    let scoring = Scoring::resolve(&ctx.scoring_settings(args)?)?;
    let doc = Document::read(file)?;
    let report = pipeline::sentiment(&doc, &scoring, &ctx.executor, narrative_time)?;
    ctx.emit(Report::Sentiment(report))
}
