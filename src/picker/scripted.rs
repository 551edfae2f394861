use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::Result;

use super::{Choice, OnChoice, PendingSlot, Picker, Presentation};

/// Headless picker that answers from a script and records what it was shown.
///
/// Once the script runs out every further presentation is cancelled, so
/// [`ScriptedPicker::run`] always terminates.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    pending: PendingSlot,
    script: RefCell<VecDeque<Choice>>,
    shown: RefCell<Vec<Presentation>>,
}

impl ScriptedPicker {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Choice>,
    {
        Self {
            pending: PendingSlot::new(),
            script: RefCell::new(script.into_iter().collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    /// Script made of selected row indices only.
    pub fn selecting<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(indices.into_iter().map(Choice::Selected))
    }

    /// Answers pending presentations until none is left.
    pub fn run(&self) -> Result<()> {
        while let Some((presentation, on_choice)) = self.pending.take() {
            let choice = self
                .script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Choice::Cancelled);
            self.shown.borrow_mut().push(presentation);
            on_choice(choice)?;
        }
        Ok(())
    }

    /// Every presentation answered so far, oldest first.
    pub fn shown(&self) -> Vec<Presentation> {
        self.shown.borrow().clone()
    }

    pub fn last_shown(&self) -> Option<Presentation> {
        self.shown.borrow().last().cloned()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }
}

impl Picker for ScriptedPicker {
    fn show(&self, presentation: Presentation, on_choice: OnChoice) {
        self.pending.put(presentation, on_choice);
    }
}
