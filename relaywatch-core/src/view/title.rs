use crate::entry::{ENGINE_PREFIX, Runlevel};
use std::collections::BTreeSet;

const ELLIPSIS: &str = "...";

/// Label for the daemon's own runlevels when merged with the engine's.
const DAEMON_LABEL: &str = "DAEMON";

/// Panel title such as `Events (DAEMON/WATCH NOTICE - ERR, BW - filter: circ):`.
///
/// Runs of three or more consecutive runlevels collapse into a range, and equal
/// ranges for the daemon and the engine merge into one.
pub fn panel_title(events: &BTreeSet<String>, filter: Option<&str>, width: usize) -> String {
    if events.is_empty() {
        return match filter {
            Some(pattern) => format!("Events (filter: {}):", crop(pattern, width.saturating_sub(18))),
            None => "Events:".to_string(),
        };
    }

    let mut ranges: Vec<(&str, Runlevel, Runlevel)> = Vec::new();
    let mut singles: Vec<String> = Vec::new();
    let mut claimed: BTreeSet<String> = BTreeSet::new();

    for prefix in ["", ENGINE_PREFIX] {
        let mut run: Vec<Runlevel> = Vec::new();

        for slot in Runlevel::ALL.iter().map(Some).chain(std::iter::once(None)) {
            let present = slot.filter(|r| events.contains(&format!("{prefix}{}", r.as_str())));

            if let Some(runlevel) = present {
                claimed.insert(format!("{prefix}{}", runlevel.as_str()));
                run.push(*runlevel);
                continue;
            }

            match run.as_slice() {
                [] => {}
                [low, .., high] if run.len() >= 3 => ranges.push((prefix, *low, *high)),
                levels => singles.extend(levels.iter().map(|r| format!("{prefix}{}", r.as_str()))),
            }
            run.clear();
        }
    }

    let mut attributes = range_labels(&ranges);
    attributes.extend(singles);
    attributes.extend(events.iter().filter(|e| !claimed.contains(*e)).cloned());

    let mut label = attributes.join(", ");
    if let Some(pattern) = filter {
        label.push_str(" - filter: ");
        label.push_str(pattern);
    }

    let label = crop(&label, width.saturating_sub(10));
    if label.is_empty() {
        "Events:".to_string()
    } else {
        format!("Events ({label}):")
    }
}

fn range_labels(ranges: &[(&str, Runlevel, Runlevel)]) -> Vec<String> {
    match ranges {
        [(daemon, low_a, high_a), (engine, low_b, high_b)]
            if low_a == low_b && high_a == high_b && daemon.is_empty() =>
        {
            let engine = engine.trim_end_matches('_');
            vec![format!("{DAEMON_LABEL}/{engine} {low_a} - {high_a}")]
        }
        _ => ranges
            .iter()
            .map(|(prefix, low, high)| format!("{prefix}{low} - {high}"))
            .collect(),
    }
}

/// Shortens `text` to at most `max_width` characters, ending in `...`. Cuts at a
/// word boundary when one is available.
pub fn crop(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    if budget == 0 {
        return String::new();
    }

    let cut: String = text.chars().take(budget).collect();
    let next_is_break = text.chars().nth(budget).is_some_and(char::is_whitespace);

    let kept = if next_is_break {
        cut.as_str()
    } else {
        match cut.rfind(' ') {
            Some(idx) if idx > 0 => &cut[..idx],
            _ => cut.as_str(),
        }
    };

    format!("{}{ELLIPSIS}", kept.trim_end_matches([' ', ',']))
}

/// The last title built, keyed by everything that went into it.
#[derive(Debug, Default)]
pub struct TitleCache {
    key: Option<(BTreeSet<String>, Option<String>, usize)>,
    title: String,
}

impl TitleCache {
    pub fn get(&mut self, events: &BTreeSet<String>, filter: Option<&str>, width: usize) -> &str {
        let fresh = match &self.key {
            Some((cached_events, cached_filter, cached_width)) => {
                cached_events == events
                    && cached_filter.as_deref() == filter
                    && *cached_width == width
            }
            None => false,
        };

        if !fresh {
            self.title = panel_title(events, filter, width);
            self.key = Some((events.clone(), filter.map(str::to_string), width));
        }

        &self.title
    }
}
