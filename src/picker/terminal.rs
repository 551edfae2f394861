use anyhow::{Context, Result};
use console::Term;
use dialoguer::Select;

use super::{Choice, OnChoice, PendingSlot, Picker, Presentation};

/// One blocking list selection.
pub trait Prompt {
    /// `Ok(None)` when the user dismissed the list.
    fn select(&self, request: &SelectRequest) -> Result<Option<usize>>;
}

/// A presentation flattened into what a prompt draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    pub items: Vec<String>,
    pub default: usize,
    /// Leave the answered list on screen instead of erasing it.
    pub keep_on_screen: bool,
}

impl From<&Presentation> for SelectRequest {
    fn from(p: &Presentation) -> Self {
        Self {
            items: p.labels.iter().map(ToString::to_string).collect(),
            default: p.highlight,
            keep_on_screen: p.stay_open,
        }
    }
}

/// Arrow-key list on stdout. Enter picks, Esc or `q` dismisses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn select(&self, request: &SelectRequest) -> Result<Option<usize>> {
        Select::new()
            .items(request.items.as_slice())
            .default(request.default)
            .clear(!request.keep_on_screen)
            .interact_on_opt(&Term::stdout())
            .context("Failed to read menu selection")
    }
}

/// Picker that asks a [`Prompt`] for each pending presentation.
#[derive(Debug)]
pub struct TerminalPicker<P = ConsolePrompt> {
    pending: PendingSlot,
    prompt: P,
}

impl TerminalPicker<ConsolePrompt> {
    pub fn interactive() -> Self {
        Self::new(ConsolePrompt)
    }
}

impl<P: Prompt> TerminalPicker<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            pending: PendingSlot::new(),
            prompt,
        }
    }

    /// Shows pending presentations and dispatches the answers until navigation
    /// stops asking.
    pub fn run(&self) -> Result<()> {
        while let Some((presentation, on_choice)) = self.pending.take() {
            let choice = self.ask(&presentation)?;
            on_choice(choice)?;
        }
        Ok(())
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    fn ask(&self, presentation: &Presentation) -> Result<Choice> {
        if presentation.labels.is_empty() {
            tracing::warn!("menu has no rows, closing it");
            return Ok(Choice::Cancelled);
        }
        let request = SelectRequest::from(presentation);
        self.prompt.select(&request).map(Choice::from)
    }
}

impl<P: Prompt> Picker for TerminalPicker<P> {
    fn show(&self, presentation: Presentation, on_choice: OnChoice) {
        tracing::trace!(
            rows = presentation.labels.len(),
            highlight = presentation.highlight,
            "queue presentation"
        );
        self.pending.put(presentation, on_choice);
    }
}
