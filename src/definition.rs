//! Menus described as JSON and compiled into menu instances.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::menu::{
    action, action_with_options, Action, ActionFlags, Effect, Entries, Label, MenuFlags,
    Navigator, Options,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub refresh: bool,

    #[serde(default)]
    pub temporary: bool,

    /// Identity of the row highlighted when the menu opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemDefinition {
    pub label: String,

    /// Second label segment, shown next to the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Menu(MenuDefinition),
    Run {
        command: Vec<String>,
        /// Append the checked checkbox ids of the menu as extra arguments.
        #[serde(default)]
        append_options: bool,
        #[serde(default)]
        terminate: bool,
    },
    Echo {
        message: String,
        #[serde(default)]
        terminate: bool,
    },
    Checkbox {
        #[serde(default)]
        checked: bool,
    },
}

impl ItemDefinition {
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.label)
    }

    fn label(&self) -> Label {
        match &self.detail {
            Some(detail) => Label::with_detail(self.label.clone(), detail.clone()),
            None => Label::new(self.label.clone()),
        }
    }

    fn to_action(&self, navigator: &Navigator, host: &Rc<dyn Host>) -> Action {
        let action = match &self.kind {
            ItemKind::Menu(menu) => {
                Action::new(self.label(), menu.compile(navigator, Rc::clone(host)))
            }
            ItemKind::Run {
                command,
                append_options,
                terminate,
            } => {
                let host = Rc::clone(host);
                let command = command.clone();
                let append_options = *append_options;
                let effect = action_with_options(
                    move |options| {
                        let mut args = command.clone();
                        if append_options {
                            let checked = options.into_iter().flat_map(Options::iter);
                            args.extend(checked.map(str::to_string));
                        }
                        host.run(&args)
                    },
                    ActionFlags {
                        terminate: *terminate,
                    },
                );
                Action::new(self.label(), effect)
            }
            ItemKind::Echo { message, terminate } => {
                let host = Rc::clone(host);
                let message = message.clone();
                let effect = action(
                    move || host.notify(&message),
                    ActionFlags {
                        terminate: *terminate,
                    },
                );
                Action::new(self.label(), effect)
            }
            ItemKind::Checkbox { checked } => Action::checkbox(self.label(), *checked),
        };

        match &self.id {
            Some(id) => action.with_id(id.clone()),
            None => action,
        }
    }
}

impl MenuDefinition {
    pub fn from_json(s: &str) -> Result<Self> {
        let def: Self = serde_json::from_str(s).context("parsing menu definition")?;
        def.validate()?;
        Ok(def)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading menu definition {}", path.display()))?;
        Self::from_json(&s).with_context(|| format!("loading {}", path.display()))
    }

    /// Rejects blank labels, blank commands and duplicate sibling identities.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("items")
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, item) in self.items.iter().enumerate() {
            let here = format!("{path}[{i}]");
            if item.label.trim().is_empty() {
                bail!("{here}: label must not be empty");
            }
            if !seen.insert(item.identity()) {
                bail!("{here}: duplicate identity '{}'", item.identity());
            }
            match &item.kind {
                ItemKind::Menu(menu) => menu.validate_at(&format!("{here}.items"))?,
                ItemKind::Run { command, .. } => {
                    if command.first().map_or(true, |p| p.trim().is_empty()) {
                        bail!("{here}: command must name a program");
                    }
                }
                ItemKind::Echo { .. } | ItemKind::Checkbox { .. } => {}
            }
        }
        Ok(())
    }

    pub fn flags(&self) -> MenuFlags {
        MenuFlags {
            refresh: self.refresh,
            temporary: self.temporary,
        }
    }

    /// Turns the definition into a menu instance presented through `navigator`.
    pub fn compile(&self, navigator: &Navigator, host: Rc<dyn Host>) -> Effect {
        let def = Rc::new(self.clone());
        let flags = def.flags();
        let nav = navigator.clone();
        navigator.menu(move || Ok(def.entries(&nav, &host)), flags)
    }

    fn entries(&self, navigator: &Navigator, host: &Rc<dyn Host>) -> Entries {
        let actions = self
            .items
            .iter()
            .map(|item| item.to_action(navigator, host))
            .collect();
        let entries = Entries::new(actions);
        match &self.default {
            Some(id) => entries.with_default(id.clone()),
            None => entries,
        }
    }

    /// Indented outline of the whole tree, one row per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        for item in &self.items {
            let label = item.label();
            let line = match &item.kind {
                ItemKind::Menu(menu) => {
                    let mut mods = Vec::new();
                    if menu.refresh {
                        mods.push("refresh");
                    }
                    if menu.temporary {
                        mods.push("temporary");
                    }
                    if mods.is_empty() {
                        format!("{indent}{label}/")
                    } else {
                        format!("{indent}{label}/ ({})", mods.join(", "))
                    }
                }
                ItemKind::Run {
                    command,
                    append_options,
                    terminate,
                } => {
                    let mut line = format!("{indent}{label}: $ {}", command.join(" "));
                    if *append_options {
                        line.push_str(" [options]");
                    }
                    if *terminate {
                        line.push_str(" (ends)");
                    }
                    line
                }
                ItemKind::Echo { message, .. } => format!("{indent}{label}: \"{message}\""),
                ItemKind::Checkbox { checked } => {
                    let mark = if *checked { 'x' } else { ' ' };
                    format!("{indent}[{mark}] {label}")
                }
            };
            out.push_str(&line);
            out.push('\n');
            if let ItemKind::Menu(menu) = &item.kind {
                menu.write_outline(depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::host::RecordingHost;
    use crate::picker::ScriptedPicker;

    const MERGE: &str = r#"{
        "items": [
            { "type": "menu", "label": "Merge ...", "temporary": true, "items": [
                { "type": "run", "label": "Merge", "command": ["git", "merge", "main"], "append_options": true },
                { "type": "checkbox", "label": "Deny fast-forward", "id": "--no-ff" },
                { "type": "checkbox", "label": "Squash", "id": "--squash" }
            ] },
            { "type": "echo", "label": "Say hi", "detail": "greeting", "message": "hi" },
            { "type": "run", "label": "Open", "command": ["xdg-open", "."], "terminate": true }
        ]
    }"#;

    fn setup(script: &[usize]) -> (Rc<ScriptedPicker>, Rc<RecordingHost>, Effect) {
        let picker = Rc::new(ScriptedPicker::selecting(script.iter().copied()));
        let host = Rc::new(RecordingHost::new());
        let def = MenuDefinition::from_json(MERGE).unwrap();
        let menu = def.compile(&Navigator::new(picker.clone()), host.clone());
        (picker, host, menu)
    }

    #[test]
    fn parses_all_item_kinds() {
        let def = MenuDefinition::from_json(MERGE).unwrap();
        assert_eq!(def.items.len(), 3);
        let ItemKind::Menu(merge) = &def.items[0].kind else {
            panic!("expected a submenu");
        };
        assert!(merge.temporary);
        assert_eq!(merge.items[1].identity(), "--no-ff");
        assert_eq!(
            merge.items[1].kind,
            ItemKind::Checkbox { checked: false }
        );
        assert_eq!(def.items[1].detail.as_deref(), Some("greeting"));
    }

    #[test]
    fn merge_with_checked_option() {
        // root: "Merge ..." -> toggle "--no-ff" -> "Merge" -> back in root (temporary)
        let (picker, host, menu) = setup(&[0, 2, 1]);
        menu.start().unwrap();
        picker.run().unwrap();

        assert_eq!(
            host.commands(),
            vec![vec!["git", "merge", "main", "--no-ff"]]
        );
        let titles: Vec<_> = picker.shown().iter().map(|p| p.titles()).collect();
        assert_eq!(titles.len(), 4);
        assert_eq!(titles[3], vec!["Merge ...", "Say hi", "Open"]);
    }

    #[test]
    fn echo_returns_to_menu_and_run_can_terminate() {
        let (picker, host, menu) = setup(&[1, 2]);
        menu.start().unwrap();
        picker.run().unwrap();

        assert_eq!(host.messages(), vec!["hi"]);
        assert_eq!(host.commands(), vec![vec!["xdg-open", "."]]);
        assert_eq!(picker.shown().len(), 2);
        assert_eq!(picker.shown()[1].highlight, 1);
    }

    #[test]
    fn default_row_is_highlighted() {
        let picker = Rc::new(ScriptedPicker::default());
        let def = MenuDefinition::from_json(
            r#"{ "default": "b", "items": [
                { "type": "echo", "label": "A", "message": "a" },
                { "type": "echo", "label": "B", "id": "b", "message": "b" }
            ] }"#,
        )
        .unwrap();
        def.compile(&Navigator::new(picker.clone()), Rc::new(RecordingHost::new()))
            .start()
            .unwrap();
        picker.run().unwrap();
        assert_eq!(picker.last_shown().unwrap().highlight, 1);
    }

    #[test]
    fn validation_reports_path() {
        let err = MenuDefinition::from_json(
            r#"{ "items": [
                { "type": "echo", "label": "A", "message": "a" },
                { "type": "menu", "label": "sub", "items": [
                    { "type": "run", "label": "x", "command": [] }
                ] }
            ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "items[1].items[0]: command must name a program");

        let err = MenuDefinition::from_json(
            r#"{ "items": [
                { "type": "echo", "label": "A", "message": "a" },
                { "type": "checkbox", "label": "B", "id": "A" }
            ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "items[1]: duplicate identity 'A'");

        let err = MenuDefinition::from_json(
            r#"{ "items": [ { "type": "echo", "label": "  ", "message": "a" } ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "items[0]: label must not be empty");
    }

    #[test]
    fn unknown_item_type_is_rejected() {
        let err = MenuDefinition::from_json(
            r#"{ "items": [ { "type": "explode", "label": "A" } ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "parsing menu definition");
    }

    #[test]
    fn outline_lists_the_tree() {
        let def = MenuDefinition::from_json(MERGE).unwrap();
        assert_eq!(
            def.outline(),
            "Merge .../ (temporary)\n\
             \x20 Merge: $ git merge main [options]\n\
             \x20 [ ] Deny fast-forward\n\
             \x20 [ ] Squash\n\
             Say hi  greeting: \"hi\"\n\
             Open: $ xdg-open . (ends)\n"
        );
    }

    #[test]
    fn outline_indents_nested_menus() {
        let def = MenuDefinition::from_json(
            r#"{ "items": [
                { "type": "menu", "label": "Branches", "refresh": true, "temporary": true, "items": [
                    { "type": "menu", "label": "Remote", "items": [
                        { "type": "checkbox", "label": "Prune", "checked": true }
                    ] }
                ] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(
            def.outline(),
            "Branches/ (refresh, temporary)\n\
             \x20 Remote/\n\
             \x20   [x] Prune\n"
        );
    }
}
