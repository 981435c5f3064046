//! # panelkit
//!
//! Command-line front end over the settings slice. It builds the built-in registry from the
//! loaded configuration, keeps preferences in memory (optionally persisted to a JSON state
//! file) and dispatches settings URIs exactly as a web front end would.

pub mod args;
pub mod handlers;
pub mod session;

use crate::args::{Cli, Command};
use crate::session::Session;
use anyhow::Result;
use panelkit_domain::config::PanelkitConfig;
use std::io::Write;

/// Executes `cli.command`, writing human or JSON output to `out`.
///
/// # Errors
/// Returns an error when the registry cannot be built, the state file cannot be read or
/// written, or the panel rejects the request.
pub fn run(cli: &Cli, config: &PanelkitConfig, out: &mut dyn Write) -> Result<()> {
    let session = Session::open(config, cli)?;

    match &cli.command {
        Command::Panels { all } => handlers::registry::list_panels(&session, *all, out)?,
        Command::Groups {} => handlers::registry::list_groups(&session, out)?,
        Command::Uri { key, user, path } => {
            handlers::panel::print_uri(&session, key, *user, path, out)?;
        },
        Command::Show { uri } => handlers::panel::show(&session, uri, out)?,
        Command::Set { uri, values } => {
            handlers::panel::set(&session, uri, values, out)?;
            session.persist()?;
        },
    }

    Ok(())
}
