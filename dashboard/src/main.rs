//! Dioxus-based llama-bench results dashboard
//!
//! A pure Rust frontend that compiles to WebAssembly. All grouping,
//! filtering, and color assignment happens in bench-viz-core; this crate
//! only renders the derived series and forwards user input back into the
//! pipeline.

use bench_viz_core::{
    format_axis_value, format_model_size, series_key, Dashboard, Record, SeriesInfo,
};
use dioxus::prelude::*;
use gloo_net::http::Request;

mod styles;

use styles::*;

/// Global theme context - true = dark mode
#[derive(Clone, Copy)]
struct ThemeCtx(Signal<bool>);

const DATA_URL: &str = "data.json";

fn main() {
    tracing_wasm::set_as_global_default();
    launch(App);
}

#[component]
fn App() -> Element {
    // Theme state - default to dark mode
    let dark_mode = use_signal(|| true);
    use_context_provider(|| ThemeCtx(dark_mode));

    let mut dash = use_signal(Dashboard::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| true);

    use_effect(move || {
        spawn(async move {
            match fetch_records().await {
                Ok(records) => {
                    dash.write().load_records(records);
                    loading.set(false);
                }
                Err(e) => {
                    error.set(Some(e));
                    loading.set(false);
                }
            }
        });
    });

    let dark = *dark_mode.read();
    let has_data = dash.read().total_count() > 0;

    rsx! {
        div { style: "{app_style(dark)}",
            Header {}

            if *loading.read() {
                div { style: "{loading_style(dark)}", "Loading..." }
            } else if let Some(err) = error.read().as_ref() {
                div { style: "{error_style(dark)}",
                    strong { "Error: " }
                    "{err}"
                }
            } else if !has_data {
                div { style: "{empty_style(dark)}",
                    p { "No benchmark results." }
                    code { style: "{code_style(dark)}", "llama-bench -o jsonl > data.json" }
                }
            } else {
                div { style: "{layout_style(dark)}",
                    FilterPanel { dash }

                    div { style: "{content_style(dark)}",
                        SummaryBar { dash }
                        ThroughputChart {
                            dash,
                            title: "Prompt processing".to_string(),
                            prompt_side: true
                        }
                        ThroughputChart {
                            dash,
                            title: "Token generation".to_string(),
                            prompt_side: false
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ThemeCtx(mut dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        header { style: "{header_style(dark)}",
            h1 { style: "{title_style(dark)}", "bench-viz" }
            button {
                style: "{toggle_btn_style(dark)}",
                onclick: move |_| {
                    let current = *dark_mode.read();
                    dark_mode.set(!current);
                },
                if dark { "☀ light" } else { "☾ dark" }
            }
        }
    }
}

#[component]
fn SummaryBar(dash: Signal<Dashboard>) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    let d = dash.read();
    let filtered = d.filtered_count();
    let total = d.total_count();
    let series_count = d.series().len();
    let model_size = d
        .filtered_records()
        .first()
        .map(|r: &Record| format_model_size(r.model_size))
        .unwrap_or_default();

    rsx! {
        div { style: "{summary_style(dark)}",
            span { "{filtered} of {total} results" }
            span { "{series_count} series" }
            if !model_size.is_empty() {
                span { "model {model_size}" }
            }
        }
    }
}

#[component]
fn FilterPanel(dash: Signal<Dashboard>) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    let d = dash.read();
    let unique = d.unique_values().clone();
    let filters = d.filters().clone();
    drop(d);

    let depth_values: Vec<String> = unique.depths.iter().map(|d| d.to_string()).collect();
    let depth_selected: Vec<String> = filters.depths.iter().map(|d| d.to_string()).collect();

    rsx! {
        div { style: "{sidebar_style(dark)}",
            CheckboxGroup {
                label: "GPU".to_string(),
                values: unique.gpus.clone(),
                selected: filters.gpus.clone(),
                on_toggle: move |value: String| {
                    let current = dash.read().filters().gpus.clone();
                    dash.write().set_gpus(toggled(&current, &value));
                }
            }
            CheckboxGroup {
                label: "Model".to_string(),
                values: unique.models.clone(),
                selected: filters.models.clone(),
                on_toggle: move |value: String| {
                    let current = dash.read().filters().models.clone();
                    dash.write().set_models(toggled(&current, &value));
                }
            }
            CheckboxGroup {
                label: "Backend".to_string(),
                values: unique.backends.clone(),
                selected: filters.backends.clone(),
                on_toggle: move |value: String| {
                    let current = dash.read().filters().backends.clone();
                    dash.write().set_backends(toggled(&current, &value));
                }
            }
            CheckboxGroup {
                label: "KV cache".to_string(),
                values: unique.cache_types.clone(),
                selected: filters.cache_types.clone(),
                on_toggle: move |value: String| {
                    let current = dash.read().filters().cache_types.clone();
                    dash.write().set_cache_types(toggled(&current, &value));
                }
            }
            CheckboxGroup {
                label: "Depth".to_string(),
                values: depth_values,
                selected: depth_selected,
                on_toggle: move |value: String| {
                    if let Ok(depth) = value.parse::<u32>() {
                        let mut current = dash.read().filters().depths.clone();
                        match current.iter().position(|d| *d == depth) {
                            Some(i) => {
                                current.remove(i);
                            }
                            None => current.push(depth),
                        }
                        dash.write().set_depths(current);
                    }
                }
            }
            CheckboxGroup {
                label: "Version".to_string(),
                values: unique.versions.clone(),
                selected: filters.versions.clone(),
                on_toggle: move |value: String| {
                    let current = dash.read().filters().versions.clone();
                    dash.write().set_versions(toggled(&current, &value));
                }
            }
            ChipRow {
                label: "Batch".to_string(),
                values: unique.batches.clone(),
                selected: filters.batch,
                on_select: move |value: Option<u32>| dash.write().set_batch(value)
            }
            ChipRow {
                label: "µbatch".to_string(),
                values: unique.ubatches.clone(),
                selected: filters.ubatch,
                on_select: move |value: Option<u32>| dash.write().set_ubatch(value)
            }

            label { style: "{checkbox_row_style(dark)}",
                input {
                    r#type: "checkbox",
                    checked: filters.log_scale,
                    onchange: move |_| {
                        let current = dash.read().log_scale();
                        dash.write().set_log_scale(!current);
                    }
                }
                span { "log scale" }
            }

            button {
                style: "{reset_btn_style(dark)}",
                onclick: move |_| dash.write().reset_filters(),
                "Reset filters"
            }
        }
    }
}

/// Flip one value's membership in a selection list
fn toggled(selected: &[String], value: &str) -> Vec<String> {
    let mut next: Vec<String> = selected.to_vec();
    match next.iter().position(|v| v == value) {
        Some(i) => {
            next.remove(i);
        }
        None => next.push(value.to_string()),
    }
    next
}

#[component]
fn CheckboxGroup(
    label: String,
    values: Vec<String>,
    selected: Vec<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{filter_group_style(dark)}",
            span { style: "{filter_label_style(dark)}", "{label}" }
            for value in values.iter() {
                label {
                    key: "{value}",
                    style: "{checkbox_row_style(dark)}",
                    input {
                        r#type: "checkbox",
                        checked: selected.contains(value),
                        onchange: {
                            let value = value.clone();
                            move |_| on_toggle.call(value.clone())
                        }
                    }
                    span { "{value}" }
                }
            }
        }
    }
}

#[component]
fn ChipRow(
    label: String,
    values: Vec<u32>,
    selected: Option<u32>,
    on_select: EventHandler<Option<u32>>,
) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{filter_group_style(dark)}",
            span { style: "{filter_label_style(dark)}", "{label}" }
            div { style: "display: flex; flex-wrap: wrap; gap: 0.25rem;",
                button {
                    style: "{chip_style(dark, selected.is_none())}",
                    onclick: move |_| on_select.call(None),
                    "all"
                }
                for value in values.iter() {
                    button {
                        key: "{value}",
                        style: "{chip_style(dark, selected == Some(*value))}",
                        onclick: {
                            let value = *value;
                            move |_| on_select.call(Some(value))
                        },
                        "{value}"
                    }
                }
            }
        }
    }
}

/// One chart: throughput over prompt length (pp) or generation length (tg),
/// one line per visible series, colored by the core assigner
#[component]
fn ThroughputChart(dash: Signal<Dashboard>, title: String, prompt_side: bool) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    let d = dash.read();
    let log_scale = d.log_scale();
    let records: Vec<Record> = if prompt_side {
        d.prompt_records().to_vec()
    } else {
        d.gen_records().to_vec()
    };
    let all_series: Vec<SeriesInfo> = d.series().to_vec();
    let visible: Vec<String> = d
        .visible_series()
        .iter()
        .map(|s| s.key.clone())
        .collect();
    drop(d);

    // One point per record: x = workload size, y = mean throughput
    let lines: Vec<(SeriesInfo, Vec<(f64, f64)>)> = all_series
        .iter()
        .filter(|info| visible.contains(&info.key))
        .map(|info| {
            let mut points: Vec<(f64, f64)> = records
                .iter()
                .filter(|r| series_key(r) == info.key)
                .map(|r| {
                    let x = if prompt_side { r.n_prompt } else { r.n_gen };
                    (x as f64, r.avg_ts)
                })
                .collect();
            points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            (info.clone(), points)
        })
        .filter(|(_, points)| !points.is_empty())
        .collect();

    let max_x = lines
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(x, _)| *x))
        .fold(0.0f64, f64::max);
    let max_y = lines
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(_, y)| *y))
        .fold(0.0f64, f64::max);

    let chart_width = 640.0;
    let chart_height = 240.0;
    let padding = 45.0;
    let grid_c = grid_color(dark);
    let axis_c = axis_color(dark);

    rsx! {
        div { style: "{chart_style(dark)}",
            div { style: "{chart_header_style(dark)}",
                span { style: "{chart_title_style(dark)}", "{title}" }
                span { style: "{unit_badge_style(dark)}", "t/s" }
                if log_scale {
                    span { style: "{unit_badge_style(dark)}", "log" }
                }
            }

            if lines.is_empty() {
                div { style: "{empty_style(dark)}", "No data for the current filters." }
            } else {
                div { style: "padding: 0.5rem;",
                    svg {
                        style: "width: 100%; height: auto; max-height: 260px;",
                        view_box: "0 0 {chart_width} {chart_height}",
                        "preserveAspectRatio": "xMidYMid meet",

                        for i in 0..5 {
                            line {
                                x1: "{padding}",
                                y1: "{padding + (chart_height - 2.0 * padding) * (i as f64 / 4.0)}",
                                x2: "{chart_width - padding}",
                                y2: "{padding + (chart_height - 2.0 * padding) * (i as f64 / 4.0)}",
                                stroke: "{grid_c}",
                                "stroke-width": "1"
                            }
                        }

                        for i in 0..5 {
                            text {
                                x: "{padding - 4.0}",
                                y: "{padding + (chart_height - 2.0 * padding) * (i as f64 / 4.0) + 3.0}",
                                fill: "{axis_c}",
                                "font-size": "8",
                                "text-anchor": "end",
                                "{axis_label(max_y, i, log_scale)}"
                            }
                        }

                        for (info, points) in lines.iter() {
                            {
                                let path = line_path(points, max_x, max_y, log_scale, chart_width, chart_height, padding);
                                rsx! {
                                    path {
                                        key: "{info.key}-line",
                                        d: "{path}",
                                        fill: "none",
                                        stroke: "{info.color}",
                                        "stroke-width": "1.5"
                                    }
                                    for (i, (x, y)) in points.iter().enumerate() {
                                        {
                                            let (cx, cy) = scale_point(*x, *y, max_x, max_y, log_scale, chart_width, chart_height, padding);
                                            rsx! {
                                                circle {
                                                    key: "{info.key}-point-{i}",
                                                    cx: "{cx}",
                                                    cy: "{cy}",
                                                    r: "3",
                                                    fill: "{info.color}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Legend { dash, all_series: all_series.clone(), visible: visible.clone() }
        }
    }
}

#[component]
fn Legend(dash: Signal<Dashboard>, all_series: Vec<SeriesInfo>, visible: Vec<String>) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{legend_style(dark)}",
            for info in all_series.iter() {
                div {
                    key: "{info.key}",
                    style: "{legend_item_style(dark, visible.contains(&info.key))}",
                    title: "{info.model} · {info.version}",
                    onclick: {
                        let key = info.key.clone();
                        move |_| dash.write().toggle_series(&key)
                    },
                    span { style: "width: 8px; height: 8px; background: {info.color}; flex-shrink: 0;" }
                    span { "{info.key}" }
                }
            }
        }
    }
}

/// Map a data point into SVG coordinates
fn scale_point(
    x: f64,
    y: f64,
    max_x: f64,
    max_y: f64,
    log_scale: bool,
    width: f64,
    height: f64,
    padding: f64,
) -> (f64, f64) {
    let tx = x / max_x.max(1.0);
    let ty = if log_scale {
        (1.0 + y).log10() / (1.0 + max_y.max(1.0)).log10()
    } else {
        y / max_y.max(1.0)
    };
    let sx = padding + (width - 2.0 * padding) * tx;
    let sy = padding + (height - 2.0 * padding) * (1.0 - ty);
    (sx, sy)
}

fn line_path(
    points: &[(f64, f64)],
    max_x: f64,
    max_y: f64,
    log_scale: bool,
    width: f64,
    height: f64,
    padding: f64,
) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let (sx, sy) = scale_point(*x, *y, max_x, max_y, log_scale, width, height, padding);
        if i == 0 {
            path.push_str(&format!("M {:.1} {:.1}", sx, sy));
        } else {
            path.push_str(&format!(" L {:.1} {:.1}", sx, sy));
        }
    }
    path
}

/// Y-axis label for grid line `i` (0 = top)
fn axis_label(max_y: f64, i: usize, log_scale: bool) -> String {
    let t = 1.0 - i as f64 / 4.0;
    let value = if log_scale {
        (1.0 + max_y.max(1.0)).powf(t) - 1.0
    } else {
        max_y * t
    };
    format_axis_value(value)
}

async fn fetch_records() -> Result<Vec<Record>, String> {
    let response = Request::get(DATA_URL)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch data: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "HTTP error: {} {}",
            response.status(),
            response.status_text()
        ));
    }

    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    bench_viz_core::parse_records(&text).map_err(|e| format!("Failed to parse records: {}", e))
}
