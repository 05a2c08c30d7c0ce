//! Display formatting for KPI values, sizes and chart labels.

/// Placeholder for any missing value.
pub const PLACEHOLDER: &str = "—";

/// Asset size in millions: `1.2B` once it rounds to 1000 or more, `320M`
/// below.
pub fn format_aum(aum: Option<f64>) -> String {
    match aum {
        Some(v) if v.round() >= 1000.0 => format!("{:.1}B", v / 1000.0),
        Some(v) => format!("{v:.0}M"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Fixed-decimal value or the placeholder.
pub fn format_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.decimals$}"))
}

/// Similarity index, two decimals.
pub fn format_psi(psi: Option<f64>) -> String {
    format_opt(psi, 2)
}

/// Percentage with no decimals, e.g. `34%`.
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.0}%"))
}

/// Direction of the 30-day crowding momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumTrend {
    Rising,
    Falling,
}

/// `↑ +5.2` / `↓ -2.1`. Zero counts as rising.
pub fn format_momentum(value: Option<f64>) -> Option<(String, MomentumTrend)> {
    let v = value?;
    if v >= 0.0 {
        Some((format!("↑ +{:.1}", v.abs()), MomentumTrend::Rising))
    } else {
        Some((format!("↓ -{:.1}", v.abs()), MomentumTrend::Falling))
    }
}

/// Tick-label precision derived from a series range.
pub fn tick_decimals(range: f64) -> usize {
    if range < 0.1 {
        2
    } else if range < 1.0 {
        1
    } else {
        0
    }
}

/// `T` for the newest of `len` samples, `T-k` for k samples earlier.
pub fn relative_day_label(index: usize, len: usize) -> String {
    let back = len.saturating_sub(1).saturating_sub(index);
    if back == 0 {
        "T".to_string()
    } else {
        format!("T-{back}")
    }
}
