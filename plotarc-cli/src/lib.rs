//! plotarc - sentiment arcs for narrative text
//!
//! Library side of the `plotarc` binary: built-in lexicons, scoring
//! strategies, the external tagger boundary, configuration and reporters.
//! The numeric work lives in `plotarc_fast`.

pub mod cli;
pub mod config;
pub mod executor;
pub mod lexicon;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod sentiment;
pub mod tagger;
