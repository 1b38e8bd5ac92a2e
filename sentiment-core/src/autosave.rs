use log::warn;

use crate::storage::{load_json, save_json, KeyValueStore};

/// Draft persistence for a single text field.
///
/// The page reports every edit and arms a timer of `debounce_ms`, re-armed on
/// each edit; when it fires the latest value is written.
pub struct AutoSave<S> {
    store: S,
    key: String,
    debounce_ms: u32,
    pending: Option<String>,
}

impl<S: KeyValueStore> AutoSave<S> {
    pub fn new(store: S, key: impl Into<String>, debounce_ms: u32) -> Self {
        Self {
            store,
            key: key.into(),
            debounce_ms,
            pending: None,
        }
    }

    /// Quiet period the page waits after the last edit before flushing.
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Saved draft to put back into an empty field.
    pub fn restore(&self, current_value: &str) -> Option<String> {
        if !current_value.is_empty() {
            return None;
        }
        match load_json::<_, String>(&self.store, &self.key) {
            Ok(Some(text)) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                warn!("auto-save restore skipped: {err}");
                None
            }
        }
    }

    /// Remember the latest value; only the last one before a flush is written.
    pub fn on_input(&mut self, value: impl Into<String>) {
        self.pending = Some(value.into());
    }

    /// Write the pending value. Returns true if something was stored.
    pub fn flush(&mut self) -> bool {
        let Some(value) = self.pending.take() else {
            return false;
        };
        match save_json(&self.store, &self.key, &value) {
            Ok(()) => true,
            Err(err) => {
                warn!("auto-save failed: {err}");
                false
            }
        }
    }

    /// Form submitted: drop both the pending edit and the stored draft.
    pub fn on_submit(&mut self) {
        self.pending = None;
        if let Err(err) = self.store.remove_item(&self.key) {
            warn!("unable to clear auto-saved text: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn autosave(store: &Rc<MemoryStore>) -> AutoSave<Rc<MemoryStore>> {
        AutoSave::new(store.clone(), "auto_saved_text", 1000)
    }

    #[test]
    fn draft_survives_reload_after_quiet_period() {
        let store = Rc::new(MemoryStore::new());
        let mut saver = autosave(&store);
        assert_eq!(saver.debounce_ms(), 1000);
        saver.on_input("I love");
        saver.on_input("I love this");
        // nothing is written until the timer fires
        assert!(store.is_empty());
        assert!(saver.flush());
        assert!(!saver.flush());

        // fresh page, empty field
        let reloaded = autosave(&store);
        assert_eq!(reloaded.restore("").as_deref(), Some("I love this"));
    }

    #[test]
    fn restore_leaves_filled_field_alone() {
        let store = Rc::new(MemoryStore::new());
        let mut saver = autosave(&store);
        saver.on_input("draft");
        saver.flush();
        assert_eq!(saver.restore("typed by server"), None);
    }

    #[test]
    fn submit_clears_draft() {
        let store = Rc::new(MemoryStore::new());
        let mut saver = autosave(&store);
        saver.on_input("draft");
        assert!(saver.flush());
        saver.on_input("draft plus");
        saver.on_submit();
        // a timer firing after submit has nothing left to write
        assert!(!saver.flush());
        assert!(store.is_empty());
        assert_eq!(autosave(&store).restore(""), None);
    }

    #[test]
    fn empty_draft_is_not_restored() {
        let store = Rc::new(MemoryStore::new());
        let mut saver = autosave(&store);
        saver.on_input("");
        assert!(saver.flush());
        assert_eq!(saver.restore(""), None);
    }

    #[test]
    fn unavailable_storage_degrades_quietly() {
        let mut saver = AutoSave::new(MemoryStore::unavailable(), "auto_saved_text", 10);
        saver.on_input("text");
        assert!(!saver.flush());
        assert_eq!(saver.restore(""), None);
        saver.on_submit();
    }
}
