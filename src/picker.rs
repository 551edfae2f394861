//! The single-selection list UI the menus are drawn with.

use std::cell::RefCell;
use std::fmt;

use anyhow::Result;

use crate::menu::Label;

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedPicker;
pub use terminal::{ConsolePrompt, Prompt, SelectRequest, TerminalPicker};

/// One list to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub labels: Vec<Label>,
    pub highlight: usize,
    /// Leave the list visible after it was answered.
    pub stay_open: bool,
}

impl Presentation {
    pub fn titles(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.title.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Selected(usize),
    Cancelled,
}

impl From<Option<usize>> for Choice {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Choice::Cancelled, Choice::Selected)
    }
}

pub type OnChoice = Box<dyn FnOnce(Choice) -> Result<()>>;

/// Shows a list and later reports exactly one [`Choice`] through `on_choice`.
///
/// `show` must not block: it registers the callback and returns. Callers only
/// issue a new presentation from inside the previous one's callback.
pub trait Picker {
    fn show(&self, presentation: Presentation, on_choice: OnChoice);
}

/// Holds the one presentation that is waiting for a choice.
#[derive(Default)]
pub struct PendingSlot {
    slot: RefCell<Option<(Presentation, OnChoice)>>,
}

impl PendingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, presentation: Presentation, on_choice: OnChoice) {
        let replaced = self.slot.borrow_mut().replace((presentation, on_choice));
        if replaced.is_some() {
            tracing::warn!("presentation replaced while another was still waiting for a choice");
        }
    }

    pub fn take(&self) -> Option<(Presentation, OnChoice)> {
        self.slot.borrow_mut().take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl fmt::Debug for PendingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSlot")
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_index_is_cancel() {
        assert_eq!(Choice::from(None), Choice::Cancelled);
        assert_eq!(Choice::from(Some(0)), Choice::Selected(0));
        assert_eq!(Choice::from(Some(3)), Choice::Selected(3));
    }

    #[test]
    fn slot_holds_one_presentation() {
        let slot = PendingSlot::new();
        assert!(!slot.is_pending());
        let p = Presentation {
            labels: vec![Label::new("a")],
            highlight: 0,
            stay_open: false,
        };
        slot.put(p.clone(), Box::new(|_| Ok(())));
        slot.put(p, Box::new(|_| Ok(())));
        assert!(slot.is_pending());
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }
}
