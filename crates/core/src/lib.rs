//! bench-viz-core - Series grouping, coloring, and filtering for llama-bench results
//!
//! This crate contains WASM-compatible code shared between native tools and
//! the dashboard frontend.
//!
//! # Features
//!
//! - Parse llama-bench result collections (JSON array or JSONL)
//! - Partition records into series by GPU / backend / KV cache type / depth
//! - Deterministic hierarchical color assignment (golden-angle hue spacing)
//! - A filter/derivation pipeline that keeps filtered subsets, color
//!   contexts, and series metadata consistent as selections change

pub mod color;
pub mod data;
pub mod error;
pub mod format;
pub mod group;
pub mod loader;
pub mod pipeline;

pub use color::{build_color_context, color_for, stable_hash, ColorContext, GOLDEN_ANGLE};
pub use data::{ColorKey, Record};
pub use error::{Error, Result};
pub use format::{format_axis_value, format_model_size, format_params, format_throughput};
pub use group::{group_by_series, series_key, SeriesGroup, SeriesGroups};
pub use loader::{load_from_file, parse_records};
pub use pipeline::{
    build_series_infos, filter_records, unique_values, Dashboard, FilterState, SeriesInfo,
    UniqueValues,
};
