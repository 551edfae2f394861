use std::cell::Cell;
use std::fmt;

use anyhow::Result;

use super::{Continuation, Effect, Nav};

const CHECKED: &str = "[x] ";
const UNCHECKED: &str = "[ ] ";

/// Row text: a flat title, or a title with a subtitle for two-line pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub title: String,
    pub detail: Option<String>,
}

impl Label {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn is_multi_segment(&self) -> bool {
        self.detail.is_some()
    }

    fn prefixed(&self, prefix: &str) -> Self {
        Self {
            title: format!("{prefix}{}", self.title),
            detail: self.detail.clone(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) if !detail.is_empty() => write!(f, "{}  {detail}", self.title),
            _ => f.write_str(&self.title),
        }
    }
}

impl From<&str> for Label {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for Label {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Label {
    fn from((title, detail): (A, B)) -> Self {
        Self::with_detail(title, detail)
    }
}

enum Kind {
    Plain(Effect),
    Checkbox(Cell<bool>),
    Back(Continuation),
}

/// One selectable row.
pub struct Action {
    label: Label,
    id: String,
    kind: Kind,
}

impl Action {
    pub fn new(label: impl Into<Label>, effect: Effect) -> Self {
        let label = label.into();
        Self {
            id: label.title.clone(),
            label,
            kind: Kind::Plain(effect),
        }
    }

    /// A toggle row. Choosing it flips the state and redisplays the same menu.
    pub fn checkbox(label: impl Into<Label>, checked: bool) -> Self {
        let label = label.into();
        Self {
            id: label.title.clone(),
            label,
            kind: Kind::Checkbox(Cell::new(checked)),
        }
    }

    pub(crate) fn back(label: Label, parent: Continuation) -> Self {
        Self {
            id: label.title.clone(),
            label,
            kind: Kind::Back(parent),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label as shown, including the checkbox marker.
    pub fn label(&self) -> Label {
        match &self.kind {
            Kind::Checkbox(checked) if checked.get() => self.label.prefixed(CHECKED),
            Kind::Checkbox(_) => self.label.prefixed(UNCHECKED),
            Kind::Plain(_) | Kind::Back(_) => self.label.clone(),
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, Kind::Checkbox(_))
    }

    /// `Some(state)` for checkboxes, `None` otherwise.
    pub fn is_checked(&self) -> Option<bool> {
        match &self.kind {
            Kind::Checkbox(checked) => Some(checked.get()),
            _ => None,
        }
    }

    /// Runs the row's effect. For a checkbox `nav.parent` is the redisplay
    /// continuation and is always invoked after the toggle.
    pub fn activate(&self, nav: Nav) -> Result<()> {
        match &self.kind {
            Kind::Plain(effect) => effect.invoke(nav),
            Kind::Checkbox(checked) => {
                checked.set(!checked.get());
                tracing::debug!(id = %self.id, checked = checked.get(), "checkbox toggled");
                match nav.parent {
                    Some(redisplay) => redisplay.invoke(),
                    None => Ok(()),
                }
            }
            Kind::Back(parent) => parent.invoke(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            Kind::Plain(_) => "plain",
            Kind::Checkbox(_) => "checkbox",
            Kind::Back(_) => "back",
        };
        f.debug_struct("Action")
            .field("label", &self.label())
            .field("id", &self.id)
            .field("kind", &kind)
            .finish()
    }
}

impl<L: Into<Label>> From<(L, Effect)> for Action {
    fn from((label, effect): (L, Effect)) -> Self {
        Self::new(label, effect)
    }
}

/// What a producer yields: the rows plus an optional row to highlight.
#[derive(Debug, Default)]
pub struct Entries {
    pub actions: Vec<Action>,
    pub default_id: Option<String>,
}

impl Entries {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            default_id: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, id: impl Into<String>) -> Self {
        self.default_id = Some(id.into());
        self
    }
}

impl From<Vec<Action>> for Entries {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

impl<S: Into<String>> From<(Vec<Action>, S)> for Entries {
    fn from((actions, default_id): (Vec<Action>, S)) -> Self {
        Self::new(actions).with_default(default_id)
    }
}
