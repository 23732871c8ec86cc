use relaywatch_core::entry::{Color, LogEntry, local_datetime};
use relaywatch_core::view::{Frame, duplicate_label};

/// One row of panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: Color,
}

/// Every content row of `frame`, including those scrolled out of view.
///
/// Entries are wrapped to the panel width and cut off after
/// `max_lines_per_entry` rows. Daybreak markers become a dated divider.
pub fn layout(frame: &Frame) -> Vec<Line> {
    let width = frame.width.max(1);
    let mut lines = Vec::new();

    for item in &frame.entries {
        let entry = &item.entry;
        if entry.is_daybreak() {
            lines.push(Line {
                text: divider(entry, width),
                color: Color::White,
            });
            continue;
        }

        let mut text = entry.display_lines().collect::<Vec<_>>().join("\n");
        if item.duplicates > 0 {
            text.push_str(&duplicate_label(item.duplicates));
        }

        let mut rows: Vec<String> = text.split('\n').flat_map(|l| wrap(l, width)).collect();
        if rows.len() > frame.max_lines_per_entry {
            rows.truncate(frame.max_lines_per_entry);
            if let Some(last) = rows.last_mut() {
                let kept: String = last.chars().take(width.saturating_sub(3)).collect();
                *last = format!("{}...", kept.trim_end());
            }
        }

        lines.extend(rows.into_iter().map(|text| Line {
            text,
            color: entry.color(),
        }));
    }

    lines
}

fn divider(entry: &LogEntry, width: usize) -> String {
    let label = format!("── {} ", local_datetime(entry.timestamp()).format("%m/%d/%Y"));
    let used = label.chars().count();
    format!("{label}{}", "─".repeat(width.saturating_sub(used)))
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }

    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
