/// True when the line holds nothing but spaces, tabs, CR or LF.
pub fn is_blank_line(line: &[u8]) -> bool {
    line.iter()
        .all(|c| matches!(c, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Split raw line bytes on `delimiter`, honouring `quote`.
///
/// A quote toggles literal mode, in which the delimiter is ordinary text.
/// Quote bytes are dropped from the output and there is no escaping, so
/// `"a""b"` reads as `ab`. Fields stay raw bytes; the result always has at
/// least one field.
pub fn split_delimited(line: &[u8], delimiter: u8, quote: u8) -> Vec<Vec<u8>> {
    let mut out = Vec::with_capacity(32);
    let mut cur = Vec::with_capacity(64);
    let mut in_quotes = false;

    for &c in line {
        if c == quote {
            in_quotes = !in_quotes;
            continue;
        }
        if c == delimiter && !in_quotes {
            out.push(std::mem::take(&mut cur));
        } else {
            cur.push(c);
        }
    }
    out.push(cur);
    out
}

/// Parse the leading integer of `s`, C `stoi` style.
///
/// Leading whitespace is skipped and parsing stops at the first character
/// that cannot continue the number, so `"2.0"` gives 2. Empty input, input
/// without digits and values outside `i32` give 0.
pub fn leading_int(s: &str) -> i32 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    t[..end].parse().unwrap_or(0)
}

/// Parse the leading floating-point number of `s`, C `stod` style.
///
/// Accepts everything `f64::from_str` accepts (after leading whitespace),
/// otherwise the longest `[sign] digits [. digits] [exponent]` prefix.
/// Anything without a numeric prefix gives 0.0.
pub fn leading_float(s: &str) -> f64 {
    let t = s.trim_start();
    if let Ok(v) = t.parse::<f64>() {
        return v;
    }
    let end = float_prefix_len(t.as_bytes());
    if end == 0 {
        return 0.0;
    }
    t[..end].parse().unwrap_or(0.0)
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}
