//! Short human-readable rendering of large amounts.

const SUFFIXES: [&str; 14] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc", "Ud", "Dd",
];

/// Format an amount with two decimals and a thousands suffix, e.g.
/// `1.50K`, `12.00Qa`. Magnitudes past the suffix ladder use scientific
/// notation (`4.20e45`).
pub fn format_number(num: f64) -> String {
    if num == 0.0 {
        return "0".to_string();
    }
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = num.abs();
    if abs < 1000.0 {
        return format!("{num:.2}");
    }

    let exp = abs.log10().floor() as usize;
    let tier = exp / 3;
    match SUFFIXES.get(tier) {
        Some(suffix) => {
            let short = num / 10f64.powi((tier * 3) as i32);
            format!("{short:.2}{suffix}")
        }
        None => format!("{num:.2e}"),
    }
}
