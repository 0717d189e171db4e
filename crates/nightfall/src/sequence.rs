//! Scoped class-name sequence.

/// Monotonic counter behind generated class names.
///
/// Each scheduler owns its own sequences, so independent schedulers (and
/// tests) never share state. A sequence never hands out the same index twice
/// unless [`reset`](Self::reset) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSequence {
    next: u64,
}

impl ClassSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence whose first index is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Returns the next index and advances.
    pub fn next_index(&mut self) -> u64 {
        let index = self.next;
        self.next += 1;
        index
    }

    /// The index the next call to [`next_index`](Self::next_index) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Mints `{prefix}{index}`.
    pub fn next_name(&mut self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_index())
    }
}
