use anyhow::anyhow;
use tokio::task::JoinHandle;

use crate::backend::AdvisorClient;
use crate::chat::{Message, SYSTEM_PROMPT};
use crate::exchange::Exchange;
use crate::theme::Theme;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    pub should_quit: bool,
    pub theme: Theme,

    // Pending input field
    pub input: String,
    pub input_cursor: usize, // cursor position in input, in chars

    // Conversation and exchange state
    pub exchange: Exchange,
    client: AdvisorClient,
    task: Option<JoinHandle<anyhow::Result<Message>>>,

    // Thread viewport
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height of the thread panel, set during render
    pub chat_width: u16,  // inner width of the thread panel, for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for the Pensando ellipsis
}

impl App {
    pub fn new(client: AdvisorClient, theme: Theme) -> Self {
        Self {
            should_quit: false,
            theme,
            input: String::new(),
            input_cursor: 0,
            exchange: Exchange::new(SYSTEM_PROMPT),
            client,
            task: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
        }
    }

    /// Send the pending input as one exchange.
    ///
    /// Blank input and overlapping sends are rejected by the exchange; the
    /// input field is only cleared once the turn is accepted.
    pub fn submit(&mut self) {
        let Some(payload) = self.exchange.begin(&self.input) else {
            return;
        };
        self.input.clear();
        self.input_cursor = 0;
        self.scroll_to_latest();

        let client = self.client.clone();
        self.task = Some(tokio::spawn(async move { client.send(&payload).await }));
    }

    /// Observe the outstanding request, applying its outcome once finished.
    ///
    /// Called on every tick; does nothing while the request is still running
    /// so the UI never blocks on the network.
    pub async fn poll_exchange(&mut self) {
        if !self.task.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        if let Some(task) = self.task.take() {
            let outcome = match task.await {
                Ok(result) => result,
                Err(err) => Err(anyhow!("la petición terminó de forma inesperada: {err}")),
            };
            self.exchange.complete(outcome);
            self.scroll_to_latest();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub fn dismiss_error(&mut self) {
        self.exchange.dismiss_error();
    }

    /// Tick animation frame (called by the tick event)
    pub fn tick_animation(&mut self) {
        if self.exchange.busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Input editing, cursor addressed in chars

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
        self.input.insert(byte_pos, c);
        self.input_cursor += 1;
    }

    pub fn delete_back(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete_forward(&mut self) {
        let char_count = self.input.chars().count();
        if self.input_cursor < char_count {
            let byte_pos = char_to_byte_index(&self.input, self.input_cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        self.input_cursor = (self.input_cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor = self.input.chars().count();
    }

    // Thread scrolling

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max_scroll = self.thread_line_count().saturating_sub(self.chat_height);
        self.chat_scroll = (self.chat_scroll.saturating_add(lines)).min(max_scroll);
    }

    /// Scroll the thread so the latest entry (or the Pensando row) is visible.
    pub fn scroll_to_latest(&mut self) {
        let total_lines = self.thread_line_count();
        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines - visible_height;
        } else {
            self.chat_scroll = 0;
        }
    }

    /// Total rendered lines of the thread, mirroring the layout in `ui`:
    /// one label line per turn, wrapped content, one blank separator.
    fn thread_line_count(&self) -> u16 {
        // Width is unknown before the first draw; assume a sane default.
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.exchange.conversation().visible() {
            total_lines += 1; // label line
            for line in msg.content.lines() {
                // Count chars, not bytes, so accents don't inflate the wrap
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // blank separator
        }

        if self.exchange.busy() {
            total_lines += 2; // label + Pensando row
        }

        total_lines
    }
}
