// src/progress.rs
/// Lightweight progress reporting used by long-running operations (extract/parse).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One round (or page) parsed and kept.
    fn item_done(&mut self, _index: usize, _label: &str) {}

    /// One round (or page) routed to the error channel.
    fn item_failed(&mut self, _index: usize, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Counts calls. Handy for tests and for a final tally line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingProgress {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub finished: bool,
    pub messages: Vec<String>,
}

impl Progress for CountingProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { self.messages.push(s!(msg)); }
    fn item_done(&mut self, _index: usize, _label: &str) { self.done += 1; }
    fn item_failed(&mut self, _index: usize, _label: &str) { self.failed += 1; }
    fn finish(&mut self) { self.finished = true; }
}
