use anyhow::Result;

use super::{Effect, Nav, Options};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFlags {
    /// Stop navigating once the action ran (e.g. it opened a file or a browser).
    pub terminate: bool,
}

/// Wraps a side effect as a menu row effect.
pub fn action<F>(f: F, flags: ActionFlags) -> Effect
where
    F: Fn() -> Result<()> + 'static,
{
    action_with_options(move |_| f(), flags)
}

/// Like [`action`], but the closure also receives the checked options of the
/// menu it was chosen from (`None` when that menu has no checkboxes).
pub fn action_with_options<F>(f: F, flags: ActionFlags) -> Effect
where
    F: Fn(Option<&Options>) -> Result<()> + 'static,
{
    Effect::new(move |nav: Nav| {
        f(nav.options.as_ref())?;

        if flags.terminate {
            tracing::debug!("action ended navigation");
            return Ok(());
        }
        match nav.parent {
            Some(parent) => parent.invoke(),
            None => Ok(()),
        }
    })
}
