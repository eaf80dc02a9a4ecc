pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let s = format!("{value:.decimals$}");
    // Avoid "-0" / "-0.00" for values that round to zero.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Default axis tick label: integers without decimals, otherwise the
/// shortest of up to six decimals.
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    if value.fract() == 0.0 {
        return format_fixed(value, 0);
    }
    trim_trailing_zeroes(format_fixed(value, 6))
}

/// Tooltip item value: two decimals, `-` when missing.
pub fn format_tooltip_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format_fixed(v, 2),
        None => "-".to_string(),
    }
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
