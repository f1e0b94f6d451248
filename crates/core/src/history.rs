
/// Linear undo history of whole document snapshots.
///
/// The first entry is the initial state and is never removed, so there is
/// always a current snapshot to return.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    current: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

impl History {
    pub fn new() -> History {
        History::with_initial(String::new())
    }

    pub fn with_initial(initial: impl Into<String>) -> History {
        History {
            entries: vec![initial.into()],
            current: 0,
        }
    }

    /// Record a new snapshot. Drops any redo entries, and does nothing if the
    /// text equals the current snapshot.
    pub fn add(&mut self, text: impl Into<String> + AsRef<str>) {
        self.entries.truncate(self.current + 1);

        if self.entries[self.current] == text.as_ref() {
            return;
        }

        self.entries.push(text.into());
        self.current = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot now current and whether a step was
    /// taken. At the first entry nothing changes.
    pub fn undo(&mut self) -> (&str, bool) {
        if self.current > 0 {
            self.current -= 1;
            (&self.entries[self.current], true)
        } else {
            (&self.entries[0], false)
        }
    }

    /// Step forward. Returns the snapshot now current and whether a step was
    /// taken. At the last entry nothing changes.
    pub fn redo(&mut self) -> (&str, bool) {
        if self.can_redo() {
            self.current += 1;
            (&self.entries[self.current], true)
        } else {
            (&self.entries[self.current], false)
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.current]
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, the initial entry persists
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
