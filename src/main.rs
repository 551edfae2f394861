use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use menunav::definition::MenuDefinition;
use menunav::host::SystemHost;
use menunav::menu::{Effect, Navigator};
use menunav::picker::TerminalPicker;
use menunav::{config, demo, logging};

#[derive(Parser, Debug)]
#[command(name = "menunav", version, about = "Navigable menus in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Navigates a menu definition.
    Run {
        /// Menu definition (JSON). If omitted, the `menu` of the config file is used.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Leave answered lists on screen instead of erasing them.
        #[arg(long)]
        stay_open: bool,
    },
    /// Navigates the built-in sample menu.
    Demo {
        /// Leave answered lists on screen instead of erasing them.
        #[arg(long)]
        stay_open: bool,
    },
    /// Validates a menu definition and prints its outline.
    Check {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Prints the config path that would be used (if any).
    ConfigPath,
    /// Writes a config template unless one already exists.
    InitConfig,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { file, stay_open } => {
            let cfg = config::load_optional()?;
            let menu_arg = file.as_deref().map(MenuDefinition::load).transpose()?;
            let resolved = config::resolve(cfg.as_ref(), stay_open, menu_arg);
            let Some(menu) = resolved.menu.clone() else {
                bail!("No menu to run: pass --file or add a \"menu\" to the config file");
            };
            navigate(&resolved, |nav| menu.compile(nav, Rc::new(SystemHost)))?;
        }
        Command::Demo { stay_open } => {
            let cfg = config::load_optional()?;
            let resolved = config::resolve(cfg.as_ref(), stay_open, None);
            navigate(&resolved, |nav| demo::build(nav, Rc::new(SystemHost)))?;
        }
        Command::Check { file } => {
            let menu = match file {
                Some(path) => MenuDefinition::load(&path)?,
                None => config::load_optional()?
                    .and_then(|c| c.menu)
                    .context("no --file given and the config file has no menu")?,
            };
            print!("{}", menu.outline());
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path() {
                println!("{}", path.display());
            }
        }
        Command::InitConfig => {
            let path = config::ensure_config_file_exists()?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn navigate<F>(resolved: &config::ResolvedConfig, build: F) -> Result<()>
where
    F: FnOnce(&Navigator) -> Effect,
{
    let picker = Rc::new(TerminalPicker::interactive());
    let navigator = Navigator::new(picker.clone())
        .stay_open(resolved.stay_open)
        .back_label(resolved.back_label.clone());
    build(&navigator).start()?;
    picker.run()
}
