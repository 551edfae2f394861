//! Recursive menu navigation on top of a single-selection picker.
//!
//! There is no menu stack object. Every level is a fresh invocation of a menu
//! [`Effect`]; the way back is the chain of [`Continuation`]s handed down as
//! [`Nav::parent`].

use std::fmt;
use std::rc::Rc;

use anyhow::Result;

pub mod action;
pub mod engine;
pub mod runner;

pub use action::{Action, Entries, Label};
pub use engine::{MenuFlags, Navigator};
pub use runner::{action, action_with_options, ActionFlags};

/// "What to display next". Invoking it resumes navigation at that point.
#[derive(Clone)]
pub struct Continuation(Rc<dyn Fn() -> Result<()>>);

impl Continuation {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn invoke(&self) -> Result<()> {
        (self.0)()
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}

/// Something an action does when chosen. Menu instances are effects too, which
/// is how a submenu becomes a row of its parent.
#[derive(Clone)]
pub struct Effect(Rc<dyn Fn(Nav) -> Result<()>>);

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Nav) -> Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn invoke(&self, nav: Nav) -> Result<()> {
        (self.0)(nav)
    }

    /// Starts a navigation chain: no parent, nothing preselected, no options.
    pub fn start(&self) -> Result<()> {
        self.invoke(Nav::root())
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").finish_non_exhaustive()
    }
}

/// Navigation context passed to every effect.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    /// Where control goes once the effect is done. `None` ends navigation.
    pub parent: Option<Continuation>,
    /// Identity of the row to highlight when the effect is a menu.
    pub selected_id: Option<String>,
    /// Checked checkbox identities of the menu the effect was chosen from.
    pub options: Option<Options>,
}

impl Nav {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Continuation) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }
}

/// Identities of the checked checkboxes of one menu, in menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<String>);

impl Options {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|o| o == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
