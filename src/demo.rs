//! Built-in sample tree that exercises every navigation policy.

use std::rc::Rc;

use crate::host::Host;
use crate::menu::{action, action_with_options, Action, ActionFlags, Effect, MenuFlags, Navigator};

const TEMPORARY: MenuFlags = MenuFlags {
    refresh: false,
    temporary: true,
};

pub fn build(navigator: &Navigator, host: Rc<dyn Host>) -> Effect {
    main_menu(navigator, host, String::new())
}

/// Recursive: "menu ..." opens the same menu one level deeper.
fn main_menu(navigator: &Navigator, host: Rc<dyn Host>, prefix: String) -> Effect {
    let nav = navigator.clone();
    navigator.menu(
        move || {
            let p = prefix.as_str();
            Ok(vec![
                Action::new(
                    format!("{p}menu ..."),
                    main_menu(&nav, Rc::clone(&host), format!("{p}menu/")),
                ),
                Action::new(format!("{p}temporary menu"), temporary_menu(&nav, &host)),
                Action::new(
                    format!("{p}action"),
                    message(&host, format!("{p}action is called"), false),
                ),
                Action::new(format!("{p}test action"), test_action(&host)),
                Action::new(format!("{p}terminated action"), terminated_action(&host)),
                Action::new(format!("{p}static menu ..."), static_menu(&nav, &host)),
                Action::new(format!("{p}Checkbox example ..."), checkbox_menu(&nav, &host)),
            ])
        },
        MenuFlags::default(),
    )
}

fn temporary_menu(navigator: &Navigator, host: &Rc<dyn Host>) -> Effect {
    let nav = navigator.clone();
    let host = Rc::clone(host);
    navigator.menu(
        move || {
            Ok(vec![
                Action::new(
                    "usual menu",
                    main_menu(&nav, Rc::clone(&host), "temp/".to_string()),
                ),
                Action::new("print", test_action(&host)),
                Action::new("print and terminate", terminated_action(&host)),
            ])
        },
        TEMPORARY,
    )
}

fn static_menu(navigator: &Navigator, host: &Rc<dyn Host>) -> Effect {
    let submenu_1 = {
        let host = Rc::clone(host);
        navigator.menu(
            move || {
                Ok(vec![
                    Action::new(
                        "submenu 1/item 1",
                        message(&host, "submenu 1/item 1".to_string(), false),
                    ),
                    Action::new(
                        "submenu 1/item 2",
                        message(&host, "submenu 1/item 2".to_string(), false),
                    ),
                ])
            },
            MenuFlags::default(),
        )
    };

    let one_more = {
        let host = Rc::clone(host);
        navigator.menu(
            move || {
                Ok(vec![
                    Action::new(
                        "make some action",
                        message(&host, "some action".to_string(), false),
                    ),
                    Action::new(
                        "make another action",
                        message(&host, "another action".to_string(), false),
                    ),
                ])
            },
            MenuFlags::default(),
        )
    };

    let submenu_2 = {
        let host = Rc::clone(host);
        let nav = navigator.clone();
        navigator.menu(
            move || {
                Ok(vec![
                    Action::new("submenu 2/one more submenu", one_more.clone()),
                    Action::new(
                        "submenu 2/item 2",
                        message(&host, "submenu 2/item 2".to_string(), false),
                    ),
                    Action::new("submenu 2/Checkbox menu", checkbox_menu(&nav, &host)),
                ])
            },
            TEMPORARY,
        )
    };

    navigator.menu(
        move || {
            Ok(vec![
                Action::new("submenu 1", submenu_1.clone()),
                Action::new("submenu 2", submenu_2.clone()),
            ])
        },
        MenuFlags::default(),
    )
}

fn checkbox_menu(navigator: &Navigator, host: &Rc<dyn Host>) -> Effect {
    let host = Rc::clone(host);
    navigator.menu(
        move || {
            let host = Rc::clone(&host);
            let show = action_with_options(
                move |options| {
                    let text = options.map_or_else(|| "[]".to_string(), ToString::to_string);
                    host.notify(&text)
                },
                ActionFlags::default(),
            );
            Ok(vec![
                Action::new("Show options", show),
                Action::checkbox("option A", false).with_id("A"),
                Action::checkbox("option B", false),
                Action::checkbox("option C", false),
            ])
        },
        TEMPORARY,
    )
}

fn test_action(host: &Rc<dyn Host>) -> Effect {
    message(host, "test action ran".to_string(), false)
}

fn terminated_action(host: &Rc<dyn Host>) -> Effect {
    message(
        host,
        "action ran, the menu should not appear again".to_string(),
        true,
    )
}

fn message(host: &Rc<dyn Host>, text: String, terminate: bool) -> Effect {
    let host = Rc::clone(host);
    action(move || host.notify(&text), ActionFlags { terminate })
}
