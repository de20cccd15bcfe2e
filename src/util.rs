const MAGNITUDES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Formats a byte count as a human readable magnitude (`10B`, `39.1KB`, `2MB`).
///
/// Magnitudes step by 1024. The value is rounded to `precision` fractional
/// digits, and an all-zero fraction is dropped so `313` renders as `313B`
/// even at precision 1.
pub fn to_si_size(bytes: u64, precision: usize) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut value = bytes as f64;
    let mut magnitude = 0;
    while value >= 1024.0 && magnitude < MAGNITUDES.len() - 1 {
        value /= 1024.0;
        magnitude += 1;
    }

    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;
    let mut out = format!("{rounded:.precision$}");
    if let Some(dot) = out.find('.') {
        if out[dot + 1..].bytes().all(|b| b == b'0') {
            out.truncate(dot);
        }
    }

    out.push_str(MAGNITUDES[magnitude]);
    out.push('B');
    out
}
