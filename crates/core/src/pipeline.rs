//! Filter/derivation pipeline
//!
//! [`Dashboard`] owns the source-of-truth state (raw records, filter
//! selections, visible-series set) and every derived value: the unique-value
//! index, the filtered subset, the prompt-processing/generation split, the
//! color context, and the annotated series list. Each mutation recomputes
//! the derivations eagerly and synchronously in dependency order, so no
//! consumer can ever observe a half-updated value.
//!
//! The struct is explicitly constructed and explicitly owned; there is no
//! process-wide instance. Create one at application start and pass it to
//! whatever consumes it.

use crate::color::{build_color_context, color_for, ColorContext};
use crate::data::{ColorKey, Record};
use crate::group::group_by_series;
use std::collections::BTreeSet;
use tracing::debug;

/// The active filter selections
///
/// Multi-select lists hold the values a record must match; a list emptied by
/// explicit deselection matches nothing. On first data load every list is
/// initialized to all observed values, and [`Dashboard::reset_filters`] is
/// the only other path back to "everything selected". The scalar batch
/// filters use `None` for "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub gpus: Vec<String>,
    pub models: Vec<String>,
    pub backends: Vec<String>,
    pub cache_types: Vec<String>,
    pub depths: Vec<u32>,
    pub versions: Vec<String>,
    /// Exact batch size, `None` for no constraint
    pub batch: Option<u32>,
    /// Exact micro-batch size, `None` for no constraint
    pub ubatch: Option<u32>,
    /// Display toggle: logarithmic value axis
    pub log_scale: bool,
}

impl FilterState {
    /// Build a state with every observed value selected and the scalar
    /// filters unconstrained
    pub fn select_all(unique: &UniqueValues) -> Self {
        Self {
            gpus: unique.gpus.clone(),
            models: unique.models.clone(),
            backends: unique.backends.clone(),
            cache_types: unique.cache_types.clone(),
            depths: unique.depths.clone(),
            versions: unique.versions.clone(),
            batch: None,
            ubatch: None,
            log_scale: false,
        }
    }

    /// Whether a record passes every active filter
    pub fn matches(&self, record: &Record) -> bool {
        self.gpus.contains(&record.gpu_info)
            && self.models.contains(&record.model_type)
            && self.backends.contains(&record.backends)
            && self.cache_types.contains(&record.cache_type())
            && self.depths.contains(&record.n_depth)
            && self.versions.contains(&record.version())
            && self.batch.map_or(true, |b| b == record.n_batch)
            && self.ubatch.map_or(true, |u| u == record.n_ubatch)
    }
}

/// Distinct values per dimension, for populating filter controls
///
/// Numeric dimensions sort ascending, strings lexicographically, versions
/// descending by build number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueValues {
    pub gpus: Vec<String>,
    pub models: Vec<String>,
    pub backends: Vec<String>,
    pub batches: Vec<u32>,
    pub ubatches: Vec<u32>,
    pub cache_types: Vec<String>,
    pub depths: Vec<u32>,
    pub versions: Vec<String>,
}

/// Collect the unique-value index from raw records
pub fn unique_values(records: &[Record]) -> UniqueValues {
    let mut gpus = BTreeSet::new();
    let mut models = BTreeSet::new();
    let mut backends = BTreeSet::new();
    let mut batches = BTreeSet::new();
    let mut ubatches = BTreeSet::new();
    let mut cache_types = BTreeSet::new();
    let mut depths = BTreeSet::new();
    // Keyed by (build, string) so builds sharing a number but differing in
    // commit stay distinct entries
    let mut versions: BTreeSet<(u64, String)> = BTreeSet::new();

    for record in records {
        gpus.insert(record.gpu_info.clone());
        models.insert(record.model_type.clone());
        backends.insert(record.backends.clone());
        batches.insert(record.n_batch);
        ubatches.insert(record.n_ubatch);
        cache_types.insert(record.cache_type());
        depths.insert(record.n_depth);
        versions.insert((record.build_number, record.version()));
    }

    UniqueValues {
        gpus: gpus.into_iter().collect(),
        models: models.into_iter().collect(),
        backends: backends.into_iter().collect(),
        batches: batches.into_iter().collect(),
        ubatches: ubatches.into_iter().collect(),
        cache_types: cache_types.into_iter().collect(),
        depths: depths.into_iter().collect(),
        versions: versions.into_iter().rev().map(|(_, v)| v).collect(),
    }
}

/// Apply the filter selections to a record collection
pub fn filter_records(records: &[Record], filters: &FilterState) -> Vec<Record> {
    records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}

/// Display-oriented projection of one series group
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInfo {
    /// The series key (also usable as a legend label)
    pub key: String,
    pub gpu: String,
    pub backend: String,
    pub cache_type: String,
    pub depth: u32,
    /// Model of the group's first record
    pub model: String,
    /// Batch size of the group's first record
    pub n_batch: u32,
    /// Micro-batch size of the group's first record
    pub n_ubatch: u32,
    /// Assigned display color, `#rrggbb`
    pub color: String,
    /// Distinct member versions joined with `", "` in insertion order
    pub version: String,
}

/// Group records into series and annotate each with its color and version
/// summary
pub fn build_series_infos(records: &[Record], ctx: &ColorContext) -> Vec<SeriesInfo> {
    let groups = group_by_series(records);
    let mut infos = Vec::with_capacity(groups.len());

    for group in &groups {
        let first = &group.records[0];

        let mut versions: Vec<String> = Vec::new();
        for record in &group.records {
            let v = record.version();
            if !versions.contains(&v) {
                versions.push(v);
            }
        }

        infos.push(SeriesInfo {
            key: group.key.clone(),
            gpu: first.gpu_info.clone(),
            backend: first.backends.clone(),
            cache_type: first.cache_type(),
            depth: first.n_depth,
            model: first.model_type.clone(),
            n_batch: first.n_batch,
            n_ubatch: first.n_ubatch,
            color: color_for(&ColorKey::from_record(first), ctx),
            version: versions.join(", "),
        });
    }

    infos
}

/// Source state and derived state for one dashboard instance
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    // Source of truth
    records: Vec<Record>,
    filters: FilterState,
    filters_initialized: bool,
    visible: BTreeSet<String>,
    visible_seeded: bool,

    // Derived, recomputed in dependency order on every mutation
    unique: UniqueValues,
    filtered: Vec<Record>,
    prompt_records: Vec<Record>,
    gen_records: Vec<Record>,
    color_context: ColorContext,
    series: Vec<SeriesInfo>,
}

impl Dashboard {
    /// Create an empty dashboard with no data and no selections
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw record collection
    ///
    /// The first time a non-empty collection arrives, every multi-select
    /// filter is initialized to "all observed values". Later loads keep the
    /// user's selections untouched.
    pub fn load_records(&mut self, records: Vec<Record>) {
        self.records = records;
        if !self.filters_initialized && !self.records.is_empty() {
            let unique = unique_values(&self.records);
            let log_scale = self.filters.log_scale;
            self.filters = FilterState::select_all(&unique);
            self.filters.log_scale = log_scale;
            self.filters_initialized = true;
        }
        self.recompute();
    }

    /// Restore every multi-select to all values from the current
    /// unique-value index and clear the scalar constraints
    pub fn reset_filters(&mut self) {
        let log_scale = self.filters.log_scale;
        self.filters = FilterState::select_all(&self.unique);
        self.filters.log_scale = log_scale;
        self.recompute();
    }

    pub fn set_gpus(&mut self, gpus: Vec<String>) {
        self.filters.gpus = gpus;
        self.recompute();
    }

    pub fn set_models(&mut self, models: Vec<String>) {
        self.filters.models = models;
        self.recompute();
    }

    pub fn set_backends(&mut self, backends: Vec<String>) {
        self.filters.backends = backends;
        self.recompute();
    }

    pub fn set_cache_types(&mut self, cache_types: Vec<String>) {
        self.filters.cache_types = cache_types;
        self.recompute();
    }

    pub fn set_depths(&mut self, depths: Vec<u32>) {
        self.filters.depths = depths;
        self.recompute();
    }

    pub fn set_versions(&mut self, versions: Vec<String>) {
        self.filters.versions = versions;
        self.recompute();
    }

    pub fn set_batch(&mut self, batch: Option<u32>) {
        self.filters.batch = batch;
        self.recompute();
    }

    pub fn set_ubatch(&mut self, ubatch: Option<u32>) {
        self.filters.ubatch = ubatch;
        self.recompute();
    }

    pub fn set_log_scale(&mut self, log_scale: bool) {
        self.filters.log_scale = log_scale;
        self.recompute();
    }

    /// Toggle one series in or out of the visible set
    ///
    /// Visibility is independent of filtering: hidden series stay hidden
    /// across filter changes, and series keys that no longer exist are
    /// simply absent from rendering rather than being pruned here.
    pub fn toggle_series(&mut self, key: &str) {
        if !self.visible.remove(key) {
            self.visible.insert(key.to_string());
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn unique_values(&self) -> &UniqueValues {
        &self.unique
    }

    pub fn filtered_records(&self) -> &[Record] {
        &self.filtered
    }

    /// Records measuring prompt processing, post-filter
    pub fn prompt_records(&self) -> &[Record] {
        &self.prompt_records
    }

    /// Records measuring token generation, post-filter
    pub fn gen_records(&self) -> &[Record] {
        &self.gen_records
    }

    pub fn color_context(&self) -> &ColorContext {
        &self.color_context
    }

    /// All current series in first-seen order, with colors assigned
    pub fn series(&self) -> &[SeriesInfo] {
        &self.series
    }

    /// The current series restricted to the visible set
    pub fn visible_series(&self) -> Vec<&SeriesInfo> {
        self.series
            .iter()
            .filter(|s| self.visible.contains(&s.key))
            .collect()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn log_scale(&self) -> bool {
        self.filters.log_scale
    }

    /// Recompute all derived state in dependency order:
    /// unique index → filtered records → pp/tg split → color context →
    /// series infos → visible-set seeding
    fn recompute(&mut self) {
        self.unique = unique_values(&self.records);
        self.filtered = filter_records(&self.records, &self.filters);
        self.prompt_records = self.filtered.iter().filter(|r| r.is_prompt()).cloned().collect();
        self.gen_records = self.filtered.iter().filter(|r| r.is_gen()).cloned().collect();
        self.color_context = build_color_context(&self.filtered, &self.filters);

        let mut chart_records =
            Vec::with_capacity(self.prompt_records.len() + self.gen_records.len());
        chart_records.extend_from_slice(&self.prompt_records);
        chart_records.extend_from_slice(&self.gen_records);
        self.series = build_series_infos(&chart_records, &self.color_context);

        // Seed visibility exactly once, on the first transition to a
        // non-empty series list; afterwards only user toggles touch it
        if !self.visible_seeded && !self.series.is_empty() {
            if self.visible.is_empty() {
                self.visible = self.series.iter().map(|s| s.key.clone()).collect();
            }
            self.visible_seeded = true;
        }

        debug!(
            total = self.records.len(),
            filtered = self.filtered.len(),
            series = self.series.len(),
            "recomputed derived state"
        );
    }
}
