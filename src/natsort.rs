//! Human-friendly ordering: `"frame2" < "frame10"`.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut in_digits: Option<bool> = None;

    for (idx, ch) in s.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_run(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_run(&s[start..], prev));
    }
    out
}

fn make_run(chunk: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Digits(chunk)
    } else {
        Run::Text(chunk)
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    // Arbitrary-length numeric compare: more significant digits wins, then lexical.
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

fn cmp_run(a: &Run<'_>, b: &Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Digits(x), Run::Digits(y)) => cmp_digits(x, y),
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
        (Run::Digits(_), Run::Text(_)) => Ordering::Less,
        (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
    }
}

/// Compare two strings by alternating digit / non-digit runs. Digit runs are
/// compared numerically, text runs lexically. The result is a total order:
/// strings that only differ in leading zeros fall back to byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ra = runs(a);
    let rb = runs(b);
    for (x, y) in ra.iter().zip(rb.iter()) {
        let ord = cmp_run(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len()).then_with(|| a.cmp(b))
}

/// Sort a slice of strings in natural order.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
#[path = "../tests/src_inline/natsort.rs"]
mod tests;
