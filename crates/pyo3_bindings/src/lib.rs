//! PyO3 bindings for the pick aggregation core.
//!
//! Exposes the Rust pipeline to the Python bot:
//! - Feed aggregation and digest rendering
//! - Single-record classification and formatting
//! - Sportsbook normalization, validation and prioritization
//! - Presets and single best deep link

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

use picks_books::{deeplink, registry, BookRegistry};
use picks_core::{
    config::Config as RustConfig,
    Error as RustError,
    FormattedPick as RustFormattedPick,
    FormattedSection as RustFormattedSection,
    PickCategory,
    PickRecord,
};
use picks_ingestion::classify as rust_classify;
use picks_presentation::{
    render_digest as rust_render_digest,
    Aggregation as RustAggregation,
    Aggregator,
    LineFormatter,
};

fn to_py_err(e: RustError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Build a configuration from an optional JSON document plus call-site overrides.
fn build_config(config_json: Option<&str>, max_per_group: i64, state: &str) -> PyResult<RustConfig> {
    if max_per_group < 1 {
        return Err(to_py_err(RustError::config(format!(
            "max_per_group must be at least 1, got {max_per_group}"
        ))));
    }
    let mut config = match config_json {
        Some(raw) => RustConfig::from_json_str(raw).map_err(to_py_err)?,
        None => RustConfig::default(),
    };
    config.aggregation.max_per_group = max_per_group as usize;
    config.aggregation.jurisdiction = state.to_lowercase();
    config.validate().map_err(to_py_err)?;
    Ok(config)
}

fn parse_record(record_json: &str) -> PyResult<PickRecord> {
    let value: Value = serde_json::from_str(record_json).map_err(|e| to_py_err(e.into()))?;
    if !value.is_object() {
        return Err(to_py_err(RustError::data("pick record must be a JSON object")));
    }
    serde_json::from_value(value).map_err(|e| to_py_err(e.into()))
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// One rendered pick.
#[pyclass]
#[derive(Clone)]
pub struct FormattedPick {
    #[pyo3(get)]
    pub header: String,
    #[pyo3(get)]
    pub details: Option<String>,
    #[pyo3(get)]
    pub deep_links: Option<String>,
}

#[pymethods]
impl FormattedPick {
    /// All present lines joined with newlines.
    fn text(&self) -> String {
        RustFormattedPick::from(self.clone()).text()
    }

    fn __str__(&self) -> String {
        self.text()
    }

    fn __repr__(&self) -> String {
        format!("FormattedPick(header={:?})", self.header)
    }
}

impl From<RustFormattedPick> for FormattedPick {
    fn from(p: RustFormattedPick) -> Self {
        FormattedPick {
            header: p.header,
            details: p.details,
            deep_links: p.deep_links,
        }
    }
}

impl From<FormattedPick> for RustFormattedPick {
    fn from(p: FormattedPick) -> Self {
        RustFormattedPick {
            header: p.header,
            details: p.details,
            deep_links: p.deep_links,
        }
    }
}

/// A labelled, coloured group of picks for one category.
#[pyclass]
#[derive(Clone)]
pub struct Section {
    #[pyo3(get)]
    pub category: String,
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub colour: u32,
    #[pyo3(get)]
    pub colour_name: String,
    #[pyo3(get)]
    pub picks: Vec<FormattedPick>,
}

#[pymethods]
impl Section {
    fn __len__(&self) -> usize {
        self.picks.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Section(category={}, label={:?}, picks={})",
            self.category,
            self.label,
            self.picks.len()
        )
    }
}

impl From<&RustFormattedSection> for Section {
    fn from(s: &RustFormattedSection) -> Self {
        Section {
            category: s.category.key().to_string(),
            label: s.label.to_string(),
            colour: s.style.colour,
            colour_name: s.style.name.to_string(),
            picks: s.picks.iter().cloned().map(FormattedPick::from).collect(),
        }
    }
}

/// Result of aggregating one feed.
#[pyclass]
#[derive(Clone)]
pub struct Aggregation {
    inner: RustAggregation,
}

#[pymethods]
impl Aggregation {
    /// Non-empty sections in display order.
    #[getter]
    fn sections(&self) -> Vec<Section> {
        self.inner.sections.iter().map(Section::from).collect()
    }

    #[getter]
    fn feed_size(&self) -> usize {
        self.inner.feed_size
    }

    #[getter]
    fn unique_picks(&self) -> usize {
        self.inner.unique_picks
    }

    /// True when the feed carried no picks at all.
    fn is_empty_feed(&self) -> bool {
        self.inner.is_empty_feed()
    }

    /// Serialize to a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| to_py_err(e.into()))
    }

    fn __len__(&self) -> usize {
        self.inner.sections.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Aggregation(sections={}, picks={}, feed_size={})",
            self.inner.sections.len(),
            self.inner.pick_count(),
            self.inner.feed_size
        )
    }
}

// ============================================================================
// Pipeline Functions
// ============================================================================

/// Aggregate a raw feed (JSON text) into ordered sections.
///
/// Text that is not JSON degrades to an empty feed. A cap below 1 or an
/// invalid configuration raises `ValueError`.
#[pyfunction]
#[pyo3(signature = (feed_json, max_per_group=3, state="ny", config_json=None))]
fn aggregate(feed_json: &str, max_per_group: i64, state: &str, config_json: Option<&str>) -> PyResult<Aggregation> {
    let config = build_config(config_json, max_per_group, state)?;
    let aggregator = Aggregator::new(&config).map_err(to_py_err)?;
    let feed: Value = serde_json::from_str(feed_json).unwrap_or(Value::Null);
    Ok(Aggregation {
        inner: aggregator.aggregate(&feed),
    })
}

/// Category key for one pick record (JSON object text).
#[pyfunction]
fn classify(record_json: &str) -> PyResult<&'static str> {
    let record = parse_record(record_json)?;
    Ok(rust_classify(&record).key())
}

/// Render one pick record (JSON object text).
#[pyfunction]
#[pyo3(signature = (record_json, state="ny", config_json=None))]
fn format_pick(record_json: &str, state: &str, config_json: Option<&str>) -> PyResult<FormattedPick> {
    let config = build_config(config_json, 3, state)?;
    let record = parse_record(record_json)?;
    Ok(FormattedPick::from(LineFormatter::new(&config).format(&record)))
}

/// Render an aggregation as one chat message.
#[pyfunction]
fn render_digest(title: &str, aggregation: PyRef<'_, Aggregation>) -> String {
    rust_render_digest(title, &aggregation.inner)
}

/// Display label, colour name and RGB value for a category key.
#[pyfunction]
fn category_style(key: &str) -> PyResult<(&'static str, &'static str, u32)> {
    let category = PickCategory::from_key(key)
        .ok_or_else(|| to_py_err(RustError::data(format!("unknown category {key:?}"))))?;
    let style = category.style();
    Ok((category.label(), style.name, style.colour))
}

// ============================================================================
// Sportsbook Functions
// ============================================================================

/// Canonical book id, or "" when unrecognized.
#[pyfunction]
fn normalize_book(name: &str) -> &'static str {
    registry::normalize(name)
}

/// Recognized books from `selected`; never empty.
#[pyfunction]
#[pyo3(signature = (selected, fallback=None))]
fn validate_books(selected: Vec<String>, fallback: Option<Vec<String>>) -> Vec<String> {
    registry::validate(&selected, fallback.as_deref())
}

/// Deep-linkable books first, optionally capped.
#[pyfunction]
#[pyo3(signature = (books, max_n=None))]
fn prioritize_books(books: Vec<String>, max_n: Option<i64>) -> PyResult<Vec<String>> {
    let max_n = match max_n {
        Some(n) if n < 0 => {
            return Err(to_py_err(RustError::config(format!("max_n must not be negative, got {n}"))));
        }
        Some(n) => Some(n as usize),
        None => None,
    };
    Ok(registry::prioritize(&books, max_n))
}

/// The US regional book preset.
#[pyfunction]
fn us_books() -> Vec<String> {
    BookRegistry::standard().us_books()
}

/// Default display priority for deep links.
#[pyfunction]
fn deep_link_priority() -> Vec<&'static str> {
    BookRegistry::standard().deep_link_priority().to_vec()
}

/// Single best `(book, url)` from a deep-link payload, for one-button
/// surfaces. `None` when the payload has no usable links.
#[pyfunction]
#[pyo3(signature = (payload, state="ny", wager_amount=None))]
fn best_link(payload: Option<&str>, state: &str, wager_amount: Option<u32>) -> Option<(String, String)> {
    let links = deeplink::parse(payload);
    let priority = BookRegistry::standard().deep_link_priority();
    deeplink::best_link(&links, priority).map(|(book, url)| {
        (
            deeplink::title_case(book),
            deeplink::substitute(url, &state.to_lowercase(), wager_amount),
        )
    })
}

// ============================================================================
// Module Definition
// ============================================================================

/// Pick aggregation core for the Python bot.
#[pymodule]
fn pick_aggregator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<FormattedPick>()?;
    m.add_class::<Section>()?;
    m.add_class::<Aggregation>()?;

    // Pipeline
    m.add_function(wrap_pyfunction!(aggregate, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(format_pick, m)?)?;
    m.add_function(wrap_pyfunction!(render_digest, m)?)?;
    m.add_function(wrap_pyfunction!(category_style, m)?)?;

    // Sportsbooks
    m.add_function(wrap_pyfunction!(normalize_book, m)?)?;
    m.add_function(wrap_pyfunction!(validate_books, m)?)?;
    m.add_function(wrap_pyfunction!(prioritize_books, m)?)?;
    m.add_function(wrap_pyfunction!(us_books, m)?)?;
    m.add_function(wrap_pyfunction!(deep_link_priority, m)?)?;
    m.add_function(wrap_pyfunction!(best_link, m)?)?;

    Ok(())
}
