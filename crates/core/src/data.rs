//! Data structures for llama-bench measurement records
//!
//! One [`Record`] corresponds to one line of `llama-bench -o jsonl` output
//! (or one element of the JSON array the runner script saves). Records are
//! never mutated by the core; the loader hands them over wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single benchmark measurement for one run configuration
///
/// Categorical fields default to `""`/`0` when absent so that missing values
/// are normalized to a canonical placeholder rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    /// Model identifier (e.g. "llama 7B Q4_K")
    #[serde(default)]
    pub model_type: String,
    /// Model file size in bytes
    #[serde(default)]
    pub model_size: u64,
    /// Number of model parameters
    #[serde(default)]
    pub model_n_params: u64,
    /// GPU identifier (e.g. "NVIDIA GeForce RTX 4090")
    #[serde(default)]
    pub gpu_info: String,
    /// Backend identifier (e.g. "CUDA")
    #[serde(default)]
    pub backends: String,
    /// KV cache key element type (e.g. "f16", "q8_0")
    #[serde(default)]
    pub type_k: String,
    /// KV cache value element type
    #[serde(default)]
    pub type_v: String,
    /// Logical batch size
    #[serde(default)]
    pub n_batch: u32,
    /// Physical (micro) batch size
    #[serde(default)]
    pub n_ubatch: u32,
    /// Context depth at which the test ran
    #[serde(default)]
    pub n_depth: u32,
    /// Prompt tokens processed (0 for generation tests)
    #[serde(default)]
    pub n_prompt: u32,
    /// Tokens generated (0 for prompt-processing tests)
    #[serde(default)]
    pub n_gen: u32,
    /// Build number of the software under test
    #[serde(default)]
    pub build_number: u64,
    /// Short commit hash of the build
    #[serde(default)]
    pub build_commit: String,
    /// When the test ran, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_time: Option<DateTime<Utc>>,
    /// Mean throughput in tokens per second
    #[serde(default)]
    pub avg_ts: f64,
    /// Throughput standard deviation in tokens per second
    #[serde(default)]
    pub stddev_ts: f64,
    /// Mean run time in nanoseconds
    #[serde(default)]
    pub avg_ns: f64,
    /// Run time standard deviation in nanoseconds
    #[serde(default)]
    pub stddev_ns: f64,
}

impl Record {
    /// The `model|gpu|backend` triple used as the top-level color dimension
    pub fn primary_key(&self) -> String {
        format!("{}|{}|{}", self.model_type, self.gpu_info, self.backends)
    }

    /// The paired KV cache format, encoded as `"{type_k}/{type_v}"`
    pub fn cache_type(&self) -> String {
        format!("{}/{}", self.type_k, self.type_v)
    }

    /// Human-readable build identifier, e.g. `"3620 (abcd1234)"`
    pub fn version(&self) -> String {
        format!("{} ({})", self.build_number, self.build_commit)
    }

    /// Whether this record measures prompt processing
    pub fn is_prompt(&self) -> bool {
        self.n_prompt > 0 && self.n_gen == 0
    }

    /// Whether this record measures token generation
    pub fn is_gen(&self) -> bool {
        self.n_gen > 0 && self.n_prompt == 0
    }
}

/// Fixed-shape identity of a series for color assignment
///
/// These five fields are everything the color assigner looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorKey {
    pub model: String,
    pub gpu: String,
    pub backend: String,
    pub depth: u32,
    pub cache_type: String,
}

impl ColorKey {
    /// Build the color identity of a record
    pub fn from_record(record: &Record) -> Self {
        Self {
            model: record.model_type.clone(),
            gpu: record.gpu_info.clone(),
            backend: record.backends.clone(),
            depth: record.n_depth,
            cache_type: record.cache_type(),
        }
    }

    /// The `model|gpu|backend` triple
    pub fn primary_key(&self) -> String {
        format!("{}|{}|{}", self.model, self.gpu, self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            model_type: "llama 7B Q4_K".to_string(),
            gpu_info: "RTX 4090".to_string(),
            backends: "CUDA".to_string(),
            type_k: "q8_0".to_string(),
            type_v: "q8_0".to_string(),
            n_depth: 1024,
            n_prompt: 512,
            build_number: 3620,
            build_commit: "abcd1234".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_projections() {
        let r = sample_record();
        assert_eq!(r.primary_key(), "llama 7B Q4_K|RTX 4090|CUDA");
        assert_eq!(r.cache_type(), "q8_0/q8_0");
        assert_eq!(r.version(), "3620 (abcd1234)");
    }

    #[test]
    fn test_workload_predicates() {
        let pp = sample_record();
        assert!(pp.is_prompt());
        assert!(!pp.is_gen());

        let tg = Record {
            n_prompt: 0,
            n_gen: 128,
            ..sample_record()
        };
        assert!(tg.is_gen());
        assert!(!tg.is_prompt());

        // Mixed tests (pp+tg) belong to neither subset
        let mixed = Record {
            n_prompt: 512,
            n_gen: 128,
            ..sample_record()
        };
        assert!(!mixed.is_prompt());
        assert!(!mixed.is_gen());
    }

    #[test]
    fn test_missing_fields_normalize_to_defaults() {
        let record: Record = serde_json::from_str(r#"{"avg_ts": 123.5}"#).unwrap();
        assert_eq!(record.gpu_info, "");
        assert_eq!(record.n_depth, 0);
        assert_eq!(record.avg_ts, 123.5);
        assert!(record.test_time.is_none());
    }

    #[test]
    fn test_color_key_from_record() {
        let r = sample_record();
        let key = ColorKey::from_record(&r);
        assert_eq!(key.primary_key(), r.primary_key());
        assert_eq!(key.cache_type, "q8_0/q8_0");
        assert_eq!(key.depth, 1024);
    }
}
