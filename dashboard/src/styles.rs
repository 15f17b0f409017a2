//! Minimalistic inline styles - no external CSS files
//!
//! Clean, practical design with light/dark theme support. Series colors are
//! not defined here; they come from the core's color assigner.

/// Generate app style based on theme
pub fn app_style(dark: bool) -> String {
    let (bg, fg) = if dark {
        ("#0d1117", "#c9d1d9")
    } else {
        ("#ffffff", "#1a1a1a")
    };
    format!(
        "min-height: 100vh; \
         display: flex; \
         flex-direction: column; \
         font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif; \
         font-size: 14px; \
         background: {bg}; \
         color: {fg}; \
         line-height: 1.5; \
         margin: 0; \
         padding: 0;"
    )
}

/// Generate header style
pub fn header_style(dark: bool) -> String {
    let (bg, border) = if dark {
        ("#161b22", "#30363d")
    } else {
        ("#f6f8fa", "#d0d7de")
    };
    format!(
        "display: flex; \
         justify-content: space-between; \
         align-items: center; \
         padding: 0.75rem 1rem; \
         background: {bg}; \
         border-bottom: 1px solid {border};"
    )
}

/// Generate title style
pub fn title_style(_dark: bool) -> &'static str {
    "font-size: 1.1rem; \
     font-weight: 600; \
     margin: 0;"
}

/// Generate theme toggle button style
pub fn toggle_btn_style(dark: bool) -> String {
    let (bg, fg, border) = if dark {
        ("#21262d", "#c9d1d9", "#30363d")
    } else {
        ("#f6f8fa", "#1a1a1a", "#d0d7de")
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         padding: 0.35rem 0.75rem; \
         font-family: inherit; \
         font-size: 0.8rem; \
         border-radius: 6px; \
         cursor: pointer;"
    )
}

/// Main layout: filter sidebar + chart area
pub fn layout_style(_dark: bool) -> &'static str {
    "display: flex; \
     flex: 1; \
     align-items: flex-start; \
     gap: 1rem; \
     padding: 1rem; \
     max-width: 1400px; \
     margin: 0 auto; \
     width: 100%; \
     box-sizing: border-box;"
}

/// Filter sidebar style
pub fn sidebar_style(dark: bool) -> String {
    let (bg, border) = if dark {
        ("#161b22", "#30363d")
    } else {
        ("#f6f8fa", "#d0d7de")
    };
    format!(
        "width: 260px; \
         min-width: 260px; \
         background: {bg}; \
         border: 1px solid {border}; \
         border-radius: 6px; \
         padding: 0.75rem; \
         display: flex; \
         flex-direction: column; \
         gap: 0.75rem;"
    )
}

/// One filter group (label + value checkboxes)
pub fn filter_group_style(dark: bool) -> String {
    let border = if dark { "#21262d" } else { "#eaeef2" };
    format!(
        "display: flex; \
         flex-direction: column; \
         gap: 0.2rem; \
         padding-bottom: 0.5rem; \
         border-bottom: 1px solid {border};"
    )
}

/// Filter group label
pub fn filter_label_style(dark: bool) -> String {
    let fg = if dark { "#8b949e" } else { "#57606a" };
    format!(
        "font-size: 0.7rem; \
         font-weight: 600; \
         text-transform: uppercase; \
         letter-spacing: 0.04em; \
         color: {fg};"
    )
}

/// A single checkbox row in a filter group
pub fn checkbox_row_style(_dark: bool) -> &'static str {
    "display: flex; \
     align-items: center; \
     gap: 0.35rem; \
     font-size: 0.8rem; \
     cursor: pointer; \
     user-select: none;"
}

/// Selectable chip (batch/ubatch scalar filters)
pub fn chip_style(dark: bool, selected: bool) -> String {
    let (bg, fg, border) = match (dark, selected) {
        (true, true) => ("#1f6feb", "#ffffff", "#1f6feb"),
        (true, false) => ("#21262d", "#c9d1d9", "#30363d"),
        (false, true) => ("#0969da", "#ffffff", "#0969da"),
        (false, false) => ("#f6f8fa", "#1a1a1a", "#d0d7de"),
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         padding: 0.15rem 0.5rem; \
         font-size: 0.75rem; \
         border-radius: 999px; \
         cursor: pointer;"
    )
}

/// Reset button style
pub fn reset_btn_style(dark: bool) -> String {
    let (bg, fg, border) = if dark {
        ("#21262d", "#c9d1d9", "#30363d")
    } else {
        ("#f6f8fa", "#1a1a1a", "#d0d7de")
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         padding: 0.35rem 0.5rem; \
         font-family: inherit; \
         font-size: 0.8rem; \
         border-radius: 6px; \
         cursor: pointer; \
         width: 100%;"
    )
}

/// Chart column (right of the sidebar)
pub fn content_style(_dark: bool) -> &'static str {
    "flex: 1; \
     min-width: 0; \
     display: flex; \
     flex-direction: column; \
     gap: 1rem;"
}

/// Summary bar above the charts
pub fn summary_style(dark: bool) -> String {
    let fg = if dark { "#8b949e" } else { "#57606a" };
    format!(
        "display: flex; \
         gap: 0.75rem; \
         align-items: center; \
         font-size: 0.8rem; \
         color: {fg};"
    )
}

/// Chart card style
pub fn chart_style(dark: bool) -> String {
    let (bg, border) = if dark {
        ("#161b22", "#30363d")
    } else {
        ("#ffffff", "#d0d7de")
    };
    format!(
        "background: {bg}; \
         border: 1px solid {border}; \
         border-radius: 6px; \
         overflow: hidden;"
    )
}

/// Chart card header
pub fn chart_header_style(dark: bool) -> String {
    let border = if dark { "#30363d" } else { "#d0d7de" };
    format!(
        "display: flex; \
         align-items: center; \
         gap: 0.5rem; \
         padding: 0.5rem 0.75rem; \
         border-bottom: 1px solid {border};"
    )
}

/// Chart title
pub fn chart_title_style(_dark: bool) -> &'static str {
    "font-size: 0.9rem; \
     font-weight: 600;"
}

/// Unit badge next to the chart title
pub fn unit_badge_style(dark: bool) -> String {
    let (bg, fg) = if dark {
        ("#21262d", "#8b949e")
    } else {
        ("#eaeef2", "#57606a")
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         padding: 0.05rem 0.4rem; \
         border-radius: 4px; \
         font-size: 0.7rem;"
    )
}

/// Legend below a chart
pub fn legend_style(_dark: bool) -> &'static str {
    "display: flex; \
     flex-wrap: wrap; \
     gap: 0.5rem 1rem; \
     padding: 0.5rem 0.75rem;"
}

/// One legend entry; hidden series render dimmed
pub fn legend_item_style(_dark: bool, visible: bool) -> String {
    let opacity = if visible { "1.0" } else { "0.35" };
    format!(
        "display: flex; \
         align-items: center; \
         gap: 0.35rem; \
         font-size: 0.75rem; \
         cursor: pointer; \
         user-select: none; \
         opacity: {opacity};"
    )
}

/// Grid line color for the SVG chart
pub fn grid_color(dark: bool) -> &'static str {
    if dark {
        "#21262d"
    } else {
        "#eaeef2"
    }
}

/// Axis label color for the SVG chart
pub fn axis_color(dark: bool) -> &'static str {
    if dark {
        "#8b949e"
    } else {
        "#57606a"
    }
}

/// Loading state style
pub fn loading_style(dark: bool) -> String {
    let fg = if dark { "#8b949e" } else { "#57606a" };
    format!(
        "padding: 3rem; \
         text-align: center; \
         color: {fg};"
    )
}

/// Error state style
pub fn error_style(dark: bool) -> String {
    let (bg, fg, border) = if dark {
        ("#2d1214", "#ff7b72", "#6e2c2f")
    } else {
        ("#fff1f0", "#cf222e", "#ffc1bc")
    };
    format!(
        "margin: 1rem; \
         padding: 1rem; \
         background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         border-radius: 6px;"
    )
}

/// Empty state style
pub fn empty_style(dark: bool) -> String {
    let fg = if dark { "#8b949e" } else { "#57606a" };
    format!(
        "padding: 3rem; \
         text-align: center; \
         color: {fg};"
    )
}

/// Inline code style
pub fn code_style(dark: bool) -> String {
    let bg = if dark { "#21262d" } else { "#eaeef2" };
    format!(
        "background: {bg}; \
         padding: 0.1rem 0.35rem; \
         border-radius: 4px; \
         font-size: 0.85em;"
    )
}
