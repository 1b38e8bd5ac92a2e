/// Human readable size, 1024-based: `0 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut scaled = bytes as f64;
    let mut i = 0;
    while scaled >= 1024.0 && i < UNITS.len() - 1 {
        scaled /= 1024.0;
        i += 1;
    }
    format!("{} {}", trim_decimals(scaled, 2), UNITS[i])
}

/// Upload-area size label, always two decimals of a megabyte.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Round to `places` and drop trailing zeros, like `parseFloat(x.toFixed(n))`.
pub fn trim_decimals(value: f64, places: usize) -> String {
    let s = format!("{value:.places$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Integer with `,` thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Leading integer of a displayed counter, ignoring separators (`"1,234 items"` -> 1234).
pub fn parse_counter_text(text: &str) -> Option<i64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let mut end = 0;
    for (i, ch) in cleaned.char_indices() {
        if ch.is_ascii_digit() || (i == 0 && (ch == '-' || ch == '+')) {
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    cleaned[..end].parse().ok()
}

/// Share of `total`, 0 when there is nothing to divide by.
pub fn percentage(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value * 100.0 / total
    } else {
        0.0
    }
}

/// Tooltip percentage: one decimal, or a bare `0` for an empty total.
pub fn format_percentage(value: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}", percentage(value, total))
    } else {
        "0".to_string()
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
        assert_eq!(format_megabytes(1_572_864), "1.50 MB");
        assert_eq!(format_megabytes(0), "0.00 MB");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_000), "-45,000");
    }

    #[test]
    fn counter_text_parsing() {
        assert_eq!(parse_counter_text("1,234"), Some(1234));
        assert_eq!(parse_counter_text(" 42 analyses"), Some(42));
        assert_eq!(parse_counter_text("-7"), Some(-7));
        assert_eq!(parse_counter_text("n/a"), None);
        assert_eq!(parse_counter_text(""), None);
    }

    #[test]
    fn percentages_never_divide_by_zero() {
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(format_percentage(0.0, 0.0), "0");
        assert_eq!(format_percentage(1.0, 3.0), "33.3");
        assert_eq!(format_percentage(2.0, 2.0), "100.0");
    }

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("warning"), "Warning");
        assert_eq!(capitalize(""), "");
    }
}
