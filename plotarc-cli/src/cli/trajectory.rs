//! Trajectory command - smoothed, length-normalized arc

use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::context::RunContext;
use super::ScoringArgs;
use crate::models::Report;
use crate::pipeline::{self, Document, Transform, TrajectoryParams};
use crate::sentiment::Scoring;

/// Trajectory flags as given on the command line
pub(super) struct TrajectoryArgs {
    pub transform: Transform,
    pub low_pass: Option<usize>,
    pub out_len: Option<usize>,
    pub padding_factor: Option<usize>,
    pub scale_range: bool,
    pub scale_vals: bool,
}

pub(super) fn run(ctx: &RunContext, file: &Path, scoring_args: &ScoringArgs, args: &TrajectoryArgs) -> Result<()> {
    let params = params(ctx, args);
    if args.padding_factor.is_some() && args.transform == Transform::Dct {
        info!("--padding-factor only affects the fft transform; ignored for dct");
    }

    let scoring = Scoring::resolve(&ctx.scoring_settings(scoring_args)?)?;
    let doc = Document::read(file)?;
    let report = pipeline::trajectory(&doc, &scoring, &ctx.executor, &params)?;
    ctx.emit(Report::Trajectory(report))
}

/// Layer flags over `[transform]` in plotarc.toml.
///
/// The configured low-pass size is a DCT setting; the legacy FFT keeps its
/// own default unless the flag is given.
fn params(ctx: &RunContext, args: &TrajectoryArgs) -> TrajectoryParams {
    let config = &ctx.project.transform;
    let configured_low_pass = match args.transform {
        Transform::Dct => config.low_pass_size,
        Transform::Fft => None,
    };
    TrajectoryParams {
        transform: args.transform,
        low_pass_size: args.low_pass.or(configured_low_pass),
        out_len: args.out_len.or(config.out_len),
        padding_factor: args.padding_factor.or(config.padding_factor),
        scale_range: args.scale_range,
        scale_vals: args.scale_vals,
    }
}
