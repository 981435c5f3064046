use crate::session::Session;
use anyhow::Result;
use std::io::Write;

/// Prints one row per panel: key, name, group and the enabled and administrator flags.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn list_panels(session: &Session, all: bool, out: &mut dyn Write) -> Result<()> {
    let panels: Vec<_> = if all {
        session.registry.all_panels().iter().collect()
    } else {
        session.registry.all_display_panels()
    };

    if panels.is_empty() {
        writeln!(out, "No panels to display.")?;
        return Ok(());
    }

    writeln!(out, "{:<12} {:<24} {:<12} {:<8} {:<6}", "Key", "Name", "Group", "Enabled", "Admin")?;
    writeln!(out, "{:-<66}", "")?;
    for panel in panels {
        writeln!(
            out,
            "{:<12} {:<24} {:<12} {:<8} {:<6}",
            panel.key(),
            panel.name(),
            panel.group_key(),
            yes_no(panel.is_enabled()),
            yes_no(panel.is_editable_by_administrators()),
        )?;
    }

    Ok(())
}

/// Prints each displayed group followed by its panels.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn list_groups(session: &Session, out: &mut dyn Write) -> Result<()> {
    for entry in session.registry.all_panel_groups_with_panels() {
        writeln!(out, "{} ({})", entry.group.name(), entry.group.key())?;
        for panel in entry.panels {
            writeln!(out, "  {:<12} {}", panel.key(), panel.name())?;
        }
    }
    Ok(())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
