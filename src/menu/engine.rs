use std::fmt;
use std::rc::Rc;

use anyhow::{bail, Result};

use super::{Action, Continuation, Effect, Entries, Label, Nav, Options};
use crate::picker::{Choice, Picker, Presentation};

const BACK_LABEL: &str = "..";

/// How a menu behaves after one of its actions ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuFlags {
    /// Call the producer again and keep the chosen row highlighted.
    pub refresh: bool,
    /// Hand control back to the parent instead of this menu.
    pub temporary: bool,
}

/// Builds menu instances that present through one picker.
#[derive(Clone)]
pub struct Navigator {
    picker: Rc<dyn Picker>,
    stay_open: bool,
    back_label: String,
}

impl Navigator {
    pub fn new(picker: Rc<dyn Picker>) -> Self {
        Self {
            picker,
            stay_open: false,
            back_label: BACK_LABEL.to_string(),
        }
    }

    #[must_use]
    pub fn stay_open(mut self, stay_open: bool) -> Self {
        self.stay_open = stay_open;
        self
    }

    #[must_use]
    pub fn back_label(mut self, label: impl Into<String>) -> Self {
        self.back_label = label.into();
        self
    }

    /// Binds a producer into a menu instance.
    ///
    /// Nothing is shown until the returned effect is invoked; the [`Nav`] it
    /// is invoked with decides where "back" goes and what gets highlighted.
    pub fn menu<P, E>(&self, producer: P, flags: MenuFlags) -> Effect
    where
        P: Fn() -> Result<E> + 'static,
        E: Into<Entries>,
    {
        let menu = Rc::new(Menu {
            navigator: self.clone(),
            producer: Box::new(move || producer().map(Into::into)),
            flags,
        });
        Effect::new(move |nav| menu.open(nav))
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("stay_open", &self.stay_open)
            .field("back_label", &self.back_label)
            .finish_non_exhaustive()
    }
}

struct Menu {
    navigator: Navigator,
    producer: Box<dyn Fn() -> Result<Entries>>,
    flags: MenuFlags,
}

impl Menu {
    fn open(self: &Rc<Self>, nav: Nav) -> Result<()> {
        let Entries {
            mut actions,
            default_id,
        } = (self.producer)()?;
        let Nav {
            parent,
            selected_id,
            ..
        } = nav;

        let mut highlight = 0;
        if let Some(parent) = &parent {
            highlight = 1;
            let title = self.navigator.back_label.clone();
            let label = match actions.first() {
                Some(first) if first.label().is_multi_segment() => Label::with_detail(title, ""),
                _ => Label::new(title),
            };
            actions.insert(0, Action::back(label, parent.clone()));
        }

        // An empty preselect counts as none.
        let selected_id = selected_id.filter(|id| !id.is_empty());
        if let Some(id) = selected_id.or(default_id) {
            match actions.iter().position(|a| a.id() == id) {
                Some(i) => highlight = i,
                None => tracing::debug!(%id, "preselected row not found, using default"),
            }
        }
        highlight = highlight.min(actions.len().saturating_sub(1));

        let level = Rc::new(Level {
            menu: Rc::clone(self),
            actions,
            parent,
        });
        level.show(highlight);
        Ok(())
    }
}

/// One resolved action list on screen. Redisplays reuse it as is.
struct Level {
    menu: Rc<Menu>,
    actions: Vec<Action>,
    parent: Option<Continuation>,
}

impl Level {
    fn show(self: &Rc<Self>, highlight: usize) {
        let presentation = Presentation {
            labels: self.actions.iter().map(Action::label).collect(),
            highlight,
            stay_open: self.menu.navigator.stay_open,
        };
        tracing::debug!(rows = presentation.labels.len(), highlight, "present menu");

        let level = Rc::clone(self);
        self.menu
            .navigator
            .picker
            .show(presentation, Box::new(move |choice| level.on_choice(choice)));
    }

    fn on_choice(self: Rc<Self>, choice: Choice) -> Result<()> {
        let index = match choice {
            Choice::Selected(index) => index,
            Choice::Cancelled => {
                tracing::debug!("menu dismissed");
                return Ok(());
            }
        };

        let Some(action) = self.actions.get(index) else {
            bail!(
                "picker selected row {index} of a menu with {} rows",
                self.actions.len()
            );
        };

        if index == 0 {
            if let Some(parent) = &self.parent {
                tracing::debug!("back");
                return parent.invoke();
            }
        }

        tracing::debug!(id = action.id(), index, "selected");
        let nav = Nav {
            parent: self.continuation_for(index, action),
            selected_id: None,
            options: self.options(),
        };
        action.activate(nav)
    }

    /// Where control goes once the chosen action is done.
    fn continuation_for(self: &Rc<Self>, index: usize, action: &Action) -> Option<Continuation> {
        let MenuFlags { refresh, temporary } = self.menu.flags;

        if temporary && !action.is_checkbox() {
            return self.parent.clone();
        }

        if action.is_checkbox() || !refresh {
            let level = Rc::clone(self);
            return Some(Continuation::new(move || {
                level.show(index);
                Ok(())
            }));
        }

        let menu = Rc::clone(&self.menu);
        let parent = self.parent.clone();
        let id = action.id().to_string();
        Some(Continuation::new(move || {
            tracing::debug!(%id, "refresh menu");
            menu.open(Nav {
                parent: parent.clone(),
                selected_id: Some(id.clone()),
                options: None,
            })
        }))
    }

    fn options(&self) -> Option<Options> {
        let mut boxes = self.actions.iter().filter(|a| a.is_checkbox()).peekable();
        boxes.peek()?;
        Some(Options::new(
            boxes
                .filter(|a| a.is_checked() == Some(true))
                .map(|a| a.id().to_string())
                .collect(),
        ))
    }
}
