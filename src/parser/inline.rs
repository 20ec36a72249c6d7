//! Inline link extraction.
//!
//! A span of text is split into alternating [`Run::Text`] and [`Run::Link`]
//! runs. Only `[label](url)` spans are recognized; bold markers (`**`) and
//! backticks are dropped from the visible text rather than modeled.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Run;

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

// A cell is a whole-cell link only when the full trimmed text matches. The
// greedy groups are kept as-is: "[a](x) and [b](y)" still matches.
static RE_WHOLE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.*)\]\((.*)\)$").unwrap());

/// Remove inline markup that is not modeled as a run.
pub fn strip_inline_markup(text: &str) -> String {
    text.replace("**", "").replace('`', "")
}

/// Split a span of text into text and link runs, left to right.
///
/// Text between links becomes a text run; empty gaps produce no run. Input
/// with no links yields exactly one text run, even when it is empty.
pub fn extract_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in RE_LINK.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        push_text(&mut runs, &text[last..whole.start()]);
        runs.push(Run::link(
            strip_inline_markup(label.as_str()),
            url.as_str().trim(),
        ));
        last = whole.end();
    }
    push_text(&mut runs, &text[last..]);

    if runs.is_empty() {
        runs.push(Run::text(strip_inline_markup(text)));
    }
    runs
}

fn push_text(runs: &mut Vec<Run>, segment: &str) {
    let cleaned = strip_inline_markup(segment);
    if !cleaned.is_empty() {
        runs.push(Run::text(cleaned));
    }
}

/// Match a cell's trimmed text against the whole-cell link pattern.
pub fn whole_cell_link(text: &str) -> Option<(String, String)> {
    let caps = RE_WHOLE_LINK.captures(text.trim())?;
    Some((
        strip_inline_markup(caps.get(1)?.as_str()),
        caps.get(2)?.as_str().trim().to_string(),
    ))
}
