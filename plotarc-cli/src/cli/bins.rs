//! Bins command - mean score per percentage chunk

use anyhow::Result;
use std::path::Path;

use super::context::RunContext;
use super::ScoringArgs;
use crate::models::Report;
use crate::pipeline::{self, Document};
use crate::sentiment::Scoring;

pub(crate) const DEFAULT_BINS: usize = 100;

pub(super) fn run(ctx: &RunContext, file: &Path, args: &ScoringArgs, bins: Option<usize>) -> Result<()> {
    let bins = bins.or(ctx.project.transform.bins).unwrap_or(DEFAULT_BINS);
    let scoring = Scoring::resolve(&ctx.scoring_settings(args)?)?;
    let doc = Document::read(file)?;
    let report = pipeline::bins(&doc, &scoring, &ctx.executor, bins)?;
    ctx.emit(Report::Bins(report))
}
