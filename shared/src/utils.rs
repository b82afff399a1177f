// String and date helpers shared by the engine and its callers.
use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use std::fmt::Display;
use std::time::Duration;

/// Index of `needle` in `haystack`. A single-element haystack containing
/// `delim` is split on `delim` first, so `"a,b,c"` behaves like `["a", "b", "c"]`.
pub fn position(needle: &str, delim: &str, haystack: &[&str]) -> Option<usize> {
    if let [single] = haystack {
        if !delim.is_empty() && single.contains(delim) {
            return single.split(delim).position(|straw| straw == needle);
        }
    }

    haystack.iter().position(|straw| *straw == needle)
}

pub fn has(needle: &str, delim: &str, haystack: &[&str]) -> bool {
    position(needle, delim, haystack).is_some()
}

// Keeps the first occurrence of each entry
pub fn dedupe(values: &[String], sort: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }

    if sort {
        out.sort();
    }
    out
}

/// Returns the text between the outermost balanced `open`/`close` pair.
/// Text without `open` yields an empty string; an unclosed `open` is an error.
pub fn matched(text: &str, open: char, close: char) -> Result<String> {
    let mut start: Option<usize> = None;
    let mut depth = 0usize;

    for (idx, ch) in text.char_indices() {
        if ch == open {
            if start.is_none() {
                start = Some(idx + ch.len_utf8());
            }
            depth += 1;
        } else if ch == close && depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some(begin) = start {
                    return Ok(text[begin..idx].to_string());
                }
            }
        }
    }

    match start {
        None => Ok(String::new()),
        Some(_) => Err(anyhow!("unmatched '{}' in '{}'", open, text)),
    }
}

// "yes" is true; "no" and "" are false
pub fn yes_no(text: &str) -> Result<bool> {
    match text {
        "yes" => Ok(true),
        "no" | "" => Ok(false),
        other => Err(anyhow!("expected yes/no, got '{}'", other)),
    }
}

/// Replaces `old` with `new` everywhere except between `delim` characters.
pub fn replace_smart(source: &str, old: char, new: char, delim: char) -> String {
    let mut inside = false;
    source
        .chars()
        .map(|ch| {
            if ch == delim {
                inside = !inside;
                ch
            } else if ch == old && !inside {
                new
            } else {
                ch
            }
        })
        .collect()
}

// Last day of dt's month at midnight UTC
pub fn to_last_day(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let (year, month) = match dt.month() {
        12 => (dt.year() + 1, 1),
        m => (dt.year(), m + 1),
    };

    let last = NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()?;
    Some(DateTime::from_naive_utc_and_offset(last.and_time(NaiveTime::MIN), Utc))
}

pub fn slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Joins two columns line by line, padding the left one to its widest
/// entry plus `pad` spaces. `None` when the columns differ in length.
pub fn aligner<L: Display, R: Display>(left: &[L], right: &[R], pad: usize) -> Option<Vec<String>> {
    if left.len() != right.len() {
        return None;
    }

    let left: Vec<String> = left.iter().map(ToString::to_string).collect();
    let width = left.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    Some(
        left.iter()
            .zip(right)
            .map(|(l, r)| format!("{}{}{}", l, " ".repeat(width - l.chars().count() + pad), r))
            .collect(),
    )
}

/// Whole seconds of `elapsed`, as minutes and seconds once past a minute.
pub fn pretty_dur(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        return format!("{} seconds", secs);
    }
    format!("{} minutes {} seconds", secs / 60, secs % 60)
}
