use std::mem;

/// One server-sent event: the `event:` name and the joined `data:` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

/// Frame-buffering parser for `text/event-stream` bodies.
///
/// Network chunks do not line up with event boundaries, so raw bytes are kept
/// until a full line is available and fields are accumulated until the blank
/// line that dispatches the event.
#[derive(Debug, Default)]
pub struct SseFrameBuffer {
    pending: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseFrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every frame it completes.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseFrame> {
        self.pending.extend_from_slice(bytes);

        let mut frames = Vec::new();
        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.trim_end_matches('\r');

            if line.is_empty() {
                if let Some(frame) = self.dispatch() {
                    frames.push(frame);
                }
                continue;
            }

            self.read_field(line);
        }

        frames
    }

    /// Dispatches whatever is buffered when the body ends without a blank line.
    pub fn flush(&mut self) -> Option<SseFrame> {
        let rest = mem::take(&mut self.pending);
        let rest = String::from_utf8_lossy(&rest);
        let rest = rest.trim_end_matches('\r');
        if !rest.is_empty() {
            self.read_field(rest);
        }

        self.dispatch()
    }

    fn read_field(&mut self, line: &str) {
        // Comment line
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let data = mem::take(&mut self.data);

        if event.is_none() && data.is_empty() {
            return None;
        }

        Some(SseFrame {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
        })
    }
}
