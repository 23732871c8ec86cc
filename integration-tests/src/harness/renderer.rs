use parking_lot::Mutex;
use relaywatch_core::view::{Frame, Renderer};
use std::thread;
use std::time::{Duration, Instant};

/// What one `draw` call was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub title: String,
    /// Category and message per entry, newest first. Daybreaks show up as `DAYBREAK`.
    pub entries: Vec<(String, String)>,
    pub duplicates: Vec<usize>,
    pub scroll: usize,
}

impl RecordedFrame {
    pub fn messages(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(category, _)| category != "DAYBREAK")
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

/// Renderer keeping every frame. Each entry takes `lines_per_entry` rows.
pub struct RecordingRenderer {
    size: (usize, usize),
    lines_per_entry: usize,
    frames: Mutex<Vec<RecordedFrame>>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(120, 30)
    }
}

impl RecordingRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: (width, height),
            lines_per_entry: 1,
            frames: Mutex::new(Vec::new()),
        }
    }

    pub fn with_lines_per_entry(mut self, lines: usize) -> Self {
        self.lines_per_entry = lines;
        self
    }

    pub fn count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn last(&self) -> Option<RecordedFrame> {
        self.frames.lock().last().cloned()
    }

    pub fn last_messages(&self) -> Vec<String> {
        self.last()
            .map(|f| f.messages().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Polls until the latest frame satisfies `check`, for up to two seconds.
    pub fn wait_for(&self, check: impl Fn(&RecordedFrame) -> bool) -> Option<RecordedFrame> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(frame) = self.last().filter(|f| check(f)) {
                return Some(frame);
            }
            if Instant::now() >= deadline {
                return None;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    pub fn wait_for_messages(&self, expected: &[&str]) -> bool {
        self.wait_for(|f| f.messages() == expected).is_some()
    }
}

impl Renderer for RecordingRenderer {
    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn draw(&self, frame: &Frame) -> usize {
        let recorded = RecordedFrame {
            title: frame.title.clone(),
            entries: frame
                .entries
                .iter()
                .map(|e| (e.entry.category().to_string(), e.entry.message().to_string()))
                .collect(),
            duplicates: frame.entries.iter().map(|e| e.duplicates).collect(),
            scroll: frame.scroll,
        };
        let height = recorded.entries.len() * self.lines_per_entry;
        self.frames.lock().push(recorded);
        height
    }
}
