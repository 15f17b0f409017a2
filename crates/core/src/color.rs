//! Hierarchical series coloring
//!
//! Colors must stay deterministic across re-renders while keeping visually
//! distant hues for whatever dimension currently carries the contrast. The
//! strategy adapts to the active filters: while several `model|gpu|backend`
//! combinations are visible they get golden-angle spaced hues; once filters
//! collapse the primaries to one value, contrast moves down to depth, and
//! once depth is fixed too, down to the KV cache type.

use crate::data::{ColorKey, Record};
use crate::pipeline::FilterState;
use std::collections::BTreeSet;

/// Golden angle in degrees, used to spread hues of incrementally added
/// categories as far apart as possible
pub const GOLDEN_ANGLE: f64 = 137.5077640500378;

const LIGHTNESS_MIN: f64 = 45.0;
const LIGHTNESS_MAX: f64 = 70.0;
const SATURATION_MIN: f64 = 50.0;
const SATURATION_MAX: f64 = 85.0;

/// Read-only snapshot of the color-relevant shape of the filtered data
///
/// Rebuilt whenever the filtered records or the selections change, never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorContext {
    /// Distinct `model|gpu|backend` triples, sorted lexicographically
    pub primaries: Vec<String>,
    /// Distinct context depths, sorted ascending
    pub depths: Vec<u32>,
    /// Distinct `type_k/type_v` pairs, sorted lexicographically
    pub cache_types: Vec<String>,
    /// Whether exactly one distinct model is in play
    pub model_fixed: bool,
    /// Whether exactly one distinct GPU is in play
    pub gpu_fixed: bool,
    /// Whether exactly one distinct backend is in play
    pub backend_fixed: bool,
    /// Whether exactly one distinct depth is in play
    pub depth_fixed: bool,
}

impl ColorContext {
    /// Whether the whole `model|gpu|backend` level is reduced to one value
    pub fn primaries_fixed(&self) -> bool {
        self.model_fixed && self.gpu_fixed && self.backend_fixed
    }
}

/// Build the color context from the currently filtered records and the
/// active selections
///
/// The scan must run over the filtered data, not the full dataset: an upper
/// dimension collapsing to one value because of a filter is exactly what
/// hands the contrast over to the next level. A dimension also counts as
/// fixed when its multi-select holds exactly one value. Empty input yields
/// empty sets and all flags false.
pub fn build_color_context(records: &[Record], selections: &FilterState) -> ColorContext {
    let mut primaries = BTreeSet::new();
    let mut depths = BTreeSet::new();
    let mut cache_types = BTreeSet::new();
    let mut models = BTreeSet::new();
    let mut gpus = BTreeSet::new();
    let mut backends = BTreeSet::new();

    for record in records {
        primaries.insert(record.primary_key());
        depths.insert(record.n_depth);
        cache_types.insert(record.cache_type());
        models.insert(record.model_type.clone());
        gpus.insert(record.gpu_info.clone());
        backends.insert(record.backends.clone());
    }

    let fixed = |distinct: usize, selected: usize| -> bool {
        !records.is_empty() && (distinct == 1 || selected == 1)
    };

    ColorContext {
        model_fixed: fixed(models.len(), selections.models.len()),
        gpu_fixed: fixed(gpus.len(), selections.gpus.len()),
        backend_fixed: fixed(backends.len(), selections.backends.len()),
        depth_fixed: fixed(depths.len(), selections.depths.len()),
        primaries: primaries.into_iter().collect(),
        depths: depths.into_iter().collect(),
        cache_types: cache_types.into_iter().collect(),
    }
}

/// Assign a display color to a series identity
///
/// Pure and total: the same key and context always yield the same hex
/// string, independent of call order, process, or container iteration.
pub fn color_for(key: &ColorKey, ctx: &ColorContext) -> String {
    let (hue, saturation, lightness) = if !ctx.primaries_fixed() {
        primary_spread(key, ctx)
    } else if !ctx.depth_fixed {
        depth_spread(key, ctx)
    } else {
        cache_spread(key, ctx)
    };

    // Keep every outcome visible against a dark background
    let lightness = lightness.clamp(LIGHTNESS_MIN, LIGHTNESS_MAX);
    let saturation = saturation.clamp(SATURATION_MIN, SATURATION_MAX);
    hsl_to_hex(hue.rem_euclid(360.0), saturation, lightness)
}

/// More than one primary visible: hue by golden-angle position of the
/// primary, depth perturbs lightness, cache type perturbs saturation
fn primary_spread(key: &ColorKey, ctx: &ColorContext) -> (f64, f64, f64) {
    let index = position_of(&ctx.primaries, &key.primary_key());
    let hue = (index as f64 * GOLDEN_ANGLE) % 360.0;

    let lightness = 58.0 + rank_offset(&ctx.depths, &key.depth, 8.0);
    let saturation = 65.0 + rank_offset(&ctx.cache_types, &key.cache_type, 5.0);
    (hue, saturation, lightness)
}

/// One primary left: anchor a hue family on its hash and fan depths out
/// within a bounded window around the anchor
fn depth_spread(key: &ColorKey, ctx: &ColorContext) -> (f64, f64, f64) {
    let anchor = hash_hue(&key.primary_key());
    let window = (ctx.depths.len() as f64 * 25.0).min(120.0);
    let hue = anchor + window_offset(&ctx.depths, &key.depth, window);

    let lightness = 55.0 + rank_offset(&ctx.cache_types, &key.cache_type, 6.0);
    (hue, 70.0, lightness)
}

/// Primary and depth both fixed: anchor on the pair and fan cache types
fn cache_spread(key: &ColorKey, ctx: &ColorContext) -> (f64, f64, f64) {
    let anchor = hash_hue(&format!("{}|{}", key.primary_key(), key.depth));
    let window = (ctx.cache_types.len() as f64 * 30.0).min(90.0);
    let hue = anchor + window_offset(&ctx.cache_types, &key.cache_type, window);

    (hue, 75.0, 55.0)
}

/// Deterministic 32-bit rolling hash (`h = h*31 + char`, wrapped, abs)
pub fn stable_hash(s: &str) -> u32 {
    let mut h: i32 = 0;
    for c in s.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as i32);
    }
    h.unsigned_abs()
}

/// Map a string hash onto the hue circle via the golden angle
fn hash_hue(s: &str) -> f64 {
    (stable_hash(s) as f64 * GOLDEN_ANGLE) % 360.0
}

fn position_of<T: Ord>(sorted: &[T], value: &T) -> usize {
    sorted.binary_search(value).unwrap_or(0)
}

/// Symmetric perturbation of up to ±`amplitude`, linear in the value's rank
/// among the distinct values; a singleton dimension gets no offset
fn rank_offset<T: Ord>(sorted: &[T], value: &T, amplitude: f64) -> f64 {
    if sorted.len() < 2 {
        return 0.0;
    }
    let rank = position_of(sorted, value);
    let t = rank as f64 / (sorted.len() - 1) as f64;
    (t - 0.5) * 2.0 * amplitude
}

/// Spread within a window of `width` degrees centered on the anchor
fn window_offset<T: Ord>(sorted: &[T], value: &T, width: f64) -> f64 {
    if sorted.len() < 2 {
        return 0.0;
    }
    let rank = position_of(sorted, value);
    let t = rank as f64 / (sorted.len() - 1) as f64;
    (t - 0.5) * width
}

/// Standard HSL to `#rrggbb` conversion; hue in degrees, saturation and
/// lightness in percent
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8
    )
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn record(model: &str, gpu: &str, backend: &str, cache: &str, depth: u32) -> Record {
        Record {
            model_type: model.to_string(),
            gpu_info: gpu.to_string(),
            backends: backend.to_string(),
            type_k: cache.to_string(),
            type_v: cache.to_string(),
            n_depth: depth,
            ..Default::default()
        }
    }

    fn key(model: &str, gpu: &str, backend: &str, cache: &str, depth: u32) -> ColorKey {
        ColorKey {
            model: model.to_string(),
            gpu: gpu.to_string(),
            backend: backend.to_string(),
            depth,
            cache_type: format!("{}/{}", cache, cache),
        }
    }

    fn context(records: &[Record]) -> ColorContext {
        build_color_context(records, &FilterState::default())
    }

    #[test]
    fn test_context_sets_are_sorted() {
        let records = vec![
            record("7B", "B", "cuda", "q8_0", 512),
            record("7B", "A", "cuda", "f16", 0),
            record("13B", "A", "metal", "f16", 4096),
        ];
        let ctx = context(&records);

        assert_eq!(
            ctx.primaries,
            vec!["13B|A|metal", "7B|A|cuda", "7B|B|cuda"]
        );
        assert_eq!(ctx.depths, vec![0, 512, 4096]);
        assert_eq!(ctx.cache_types, vec!["f16/f16", "q8_0/q8_0"]);
        assert!(!ctx.model_fixed);
        assert!(!ctx.gpu_fixed);
        assert!(!ctx.backend_fixed);
        assert!(!ctx.depth_fixed);
    }

    #[test]
    fn test_fixed_flags_single_value() {
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("7B", "A", "cuda", "q8_0", 512),
        ];
        let ctx = context(&records);
        assert!(ctx.model_fixed);
        assert!(ctx.gpu_fixed);
        assert!(ctx.backend_fixed);
        assert!(!ctx.depth_fixed);
        assert!(ctx.primaries_fixed());
    }

    #[test]
    fn test_fixed_flags_via_selection() {
        // A multi-select narrowed to one value counts as fixed even while
        // stale records for other values are still in the scan
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("7B", "B", "cuda", "f16", 0),
        ];
        let mut selections = FilterState::default();
        selections.gpus = vec!["A".to_string()];
        let ctx = build_color_context(&records, &selections);
        assert!(ctx.gpu_fixed);
        assert!(!build_color_context(&records, &FilterState::default()).gpu_fixed);
    }

    #[test]
    fn test_empty_input_yields_unfixed_context() {
        let ctx = context(&[]);
        assert!(ctx.primaries.is_empty());
        assert!(ctx.depths.is_empty());
        assert!(ctx.cache_types.is_empty());
        assert!(!ctx.model_fixed);
        assert!(!ctx.depth_fixed);
        assert!(!ctx.primaries_fixed());
    }

    #[test]
    fn test_color_is_deterministic() {
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("13B", "B", "metal", "q8_0", 512),
        ];
        let ctx = context(&records);
        let k = key("7B", "A", "cuda", "f16", 0);

        let first = color_for(&k, &ctx);
        let second = color_for(&k, &ctx);
        assert_eq!(first, second);
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn test_golden_angle_hue_spacing() {
        // Ten primaries, none fixed: consecutive golden-angle hues must not
        // land within 10 degrees of each other (circular distance)
        let records: Vec<Record> = (0..10)
            .map(|i| record(&format!("m{}", i), &format!("g{}", i), "cuda", "f16", 0))
            .collect();
        let ctx = context(&records);
        assert_eq!(ctx.primaries.len(), 10);

        let hues: Vec<f64> = (0..10).map(|i| (i as f64 * GOLDEN_ANGLE) % 360.0).collect();
        for i in 0..hues.len() {
            for j in (i + 1)..hues.len() {
                let d = (hues[i] - hues[j]).abs();
                let circular = d.min(360.0 - d);
                assert!(
                    circular > 10.0,
                    "hues {} and {} too close: {:.2}°",
                    i,
                    j,
                    circular
                );
            }
        }
    }

    #[test]
    fn test_distinct_primaries_get_distinct_colors() {
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("7B", "B", "cuda", "f16", 0),
            record("13B", "A", "cuda", "f16", 0),
        ];
        let ctx = context(&records);

        let a = color_for(&key("7B", "A", "cuda", "f16", 0), &ctx);
        let b = color_for(&key("7B", "B", "cuda", "f16", 0), &ctx);
        let c = color_for(&key("13B", "A", "cuda", "f16", 0), &ctx);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_depth_strategy_when_primary_fixed() {
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("7B", "A", "cuda", "f16", 512),
            record("7B", "A", "cuda", "f16", 4096),
        ];
        let ctx = context(&records);
        assert!(ctx.primaries_fixed());
        assert!(!ctx.depth_fixed);

        let colors: Vec<String> = [0u32, 512, 4096]
            .iter()
            .map(|&d| color_for(&key("7B", "A", "cuda", "f16", d), &ctx))
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_cache_strategy_when_primary_and_depth_fixed() {
        let records = vec![
            record("7B", "A", "cuda", "f16", 512),
            record("7B", "A", "cuda", "q8_0", 512),
            record("7B", "A", "cuda", "q4_0", 512),
        ];
        let ctx = context(&records);
        assert!(ctx.primaries_fixed());
        assert!(ctx.depth_fixed);

        let colors: Vec<String> = ["f16", "q8_0", "q4_0"]
            .iter()
            .map(|c| color_for(&key("7B", "A", "cuda", c, 512), &ctx))
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_singleton_dimension_gets_no_offset() {
        // One depth and one cache type: strategy (a) must emit the base
        // saturation/lightness with zero perturbation, not divide by zero
        let records = vec![
            record("7B", "A", "cuda", "f16", 512),
            record("13B", "A", "cuda", "f16", 512),
        ];
        let ctx = context(&records);
        let k = key("7B", "A", "cuda", "f16", 512);
        let idx = ctx.primaries.binary_search(&k.primary_key()).unwrap();
        let expected = hsl_to_hex((idx as f64 * GOLDEN_ANGLE) % 360.0, 65.0, 58.0);
        assert_eq!(color_for(&k, &ctx), expected);
    }

    #[test]
    fn test_clamp_bounds() {
        // Extreme ranks in strategy (a): lightness 58±8 and saturation 65±5
        // stay inside [45,70] / [50,85] by construction, so the clamp must
        // be an identity here; verify via the expected unclamped values
        let records = vec![
            record("7B", "A", "cuda", "f16", 0),
            record("7B", "B", "cuda", "q8_0", 8192),
        ];
        let ctx = context(&records);
        let low = key("7B", "A", "cuda", "f16", 0);
        let expected = hsl_to_hex(0.0, 60.0, 50.0);
        assert_eq!(color_for(&low, &ctx), expected);
    }

    #[test]
    fn test_stable_hash_is_deterministic_and_spread() {
        assert_eq!(stable_hash("7B|A|cuda"), stable_hash("7B|A|cuda"));
        assert_ne!(stable_hash("7B|A|cuda"), stable_hash("7B|B|cuda"));
        assert_eq!(stable_hash(""), 0);
    }

    #[test]
    fn test_hsl_to_hex_known_values() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
        // Negative hues wrap
        assert_eq!(hsl_to_hex(-120.0, 100.0, 50.0), hsl_to_hex(240.0, 100.0, 50.0));
    }
}
