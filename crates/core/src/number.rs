const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Shortest decimal text for a decoded numeric value. Integral values in the
/// exactly-representable range drop the fraction; everything else relies on
/// the shortest round-trip formatting of `f64`.
pub fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}
