//! Python bindings (`--features python`).
//!
//! Thin wrappers: arguments are converted, the GIL is released for the
//! numeric work, and `ArcError` surfaces as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::errors::ArcError;
use crate::{binning, dct, entropy, fft, lexicon, rescale, tokenize};

impl From<ArcError> for PyErr {
    fn from(err: ArcError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pyfunction]
#[pyo3(signature = (raw_values, low_pass_size=5, x_reverse_len=100, scale_vals=false, scale_range=false))]
fn get_dct_transform(
    py: Python<'_>,
    raw_values: Vec<f64>,
    low_pass_size: usize,
    x_reverse_len: usize,
    scale_vals: bool,
    scale_range: bool,
) -> PyResult<Vec<f64>> {
    let options = dct::DctOptions {
        low_pass_size,
        out_len: x_reverse_len,
        scale_range,
        scale_vals,
    };
    Ok(py.detach(|| dct::dct_transform(&raw_values, &options))?)
}

#[pyfunction]
#[pyo3(signature = (raw_values, low_pass_size=2, x_reverse_len=100, padding_factor=2, scale_vals=false, scale_range=false))]
fn get_transformed_values(
    py: Python<'_>,
    raw_values: Vec<f64>,
    low_pass_size: usize,
    x_reverse_len: usize,
    padding_factor: usize,
    scale_vals: bool,
    scale_range: bool,
) -> PyResult<Vec<f64>> {
    let options = fft::FftOptions {
        low_pass_size,
        out_len: x_reverse_len,
        padding_factor,
        scale_range,
        scale_vals,
    };
    Ok(py.detach(|| fft::fft_transform(&raw_values, &options))?)
}

#[pyfunction]
#[pyo3(name = "rescale")]
fn rescale_values(values: Vec<f64>) -> PyResult<Vec<f64>> {
    Ok(rescale::rescale_linear(&values)?)
}

/// Returns (x, y, z) like the three plotting views.
#[pyfunction]
fn rescale_x_2(values: Vec<f64>) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let nt = rescale::narrative_time(&values)?;
    Ok((nt.x, nt.y, nt.z))
}

#[pyfunction]
#[pyo3(signature = (raw_values, bins=100))]
fn get_percentage_values(raw_values: Vec<f64>, bins: usize) -> PyResult<Vec<(usize, f64)>> {
    Ok(binning::bin_means(&raw_values, bins)?)
}

/// Score tokens against a `{word: value}` table (valence semantics).
#[pyfunction]
fn get_sentiment(tokens: Vec<String>, table: HashMap<String, f64>) -> PyResult<f64> {
    let lex = valence_lexicon(table);
    Ok(lexicon::score(&tokens, &lex, &lexicon::Category::POLARITY)?)
}

/// Returns (entropy, metric_entropy).
#[pyfunction]
#[pyo3(signature = (text, table, remove_neutral=true))]
fn mixed_messages(text: String, table: HashMap<String, f64>, remove_neutral: bool) -> PyResult<(f64, f64)> {
    let tokens = tokenize::get_tokens(&text);
    let result = entropy::mixed_message_entropy(
        &tokens,
        |t| table.get(t).copied().unwrap_or(0.0),
        remove_neutral,
    );
    Ok((result.entropy, result.metric_entropy))
}

#[pyfunction]
fn get_tokens(text: String) -> Vec<String> {
    tokenize::get_tokens(&text)
}

#[pyfunction]
fn get_sentences(text: String) -> Vec<String> {
    tokenize::get_sentences(&text)
}

fn valence_lexicon(table: HashMap<String, f64>) -> lexicon::Lexicon {
    lexicon::Lexicon::from_entries(table.into_iter().map(|(word, value)| lexicon::LexiconEntry {
        word,
        category: lexicon::Category::from_valence(value),
        value,
        language: "custom".to_string(),
    }))
}

#[pymodule]
fn plotarc_fast(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(get_dct_transform, m)?)?;
    m.add_function(wrap_pyfunction!(get_transformed_values, m)?)?;
    m.add_function(wrap_pyfunction!(rescale_values, m)?)?;
    m.add_function(wrap_pyfunction!(rescale_x_2, m)?)?;
    m.add_function(wrap_pyfunction!(get_percentage_values, m)?)?;
    m.add_function(wrap_pyfunction!(get_sentiment, m)?)?;
    m.add_function(wrap_pyfunction!(mixed_messages, m)?)?;
    m.add_function(wrap_pyfunction!(get_tokens, m)?)?;
    m.add_function(wrap_pyfunction!(get_sentences, m)?)?;
    Ok(())
}
