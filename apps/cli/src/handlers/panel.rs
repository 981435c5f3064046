use crate::session::Session;
use anyhow::{Context, Result, anyhow};
use panelkit_domain::identity::Identity;
use panelkit_settings::context::PanelContext;
use panelkit_settings::instance::PanelInstance;
use panelkit_settings::request::Method;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

/// Prints the URI of panel `key` for the session viewer acting on `user`.
///
/// # Errors
/// Returns an error for unknown panel keys or when writing to `out` fails.
pub fn print_uri(
    session: &Session,
    key: &str,
    user: Option<u64>,
    path: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let panel = session.registry.panel(key).ok_or_else(|| anyhow!("No panel with key '{key}'"))?;

    let user = match user {
        Some(id) if id != session.viewer.id.0 => Identity::new(id, format!("user-{id}")),
        _ => session.viewer.clone(),
    };
    let context = PanelContext::builder().user(user).viewer(session.viewer.clone()).build();
    let instance = PanelInstance::new(Arc::clone(panel), context);

    writeln!(out, "{}", instance.uri(path))?;
    Ok(())
}

/// Dispatches a `GET` for `uri` and prints the response as JSON.
///
/// # Errors
/// Returns the dispatch error (not found, access denied) or a write failure.
pub fn show(session: &Session, uri: &str, out: &mut dyn Write) -> Result<()> {
    let response = session
        .dispatcher()
        .dispatch(&session.viewer, Method::Get, uri, BTreeMap::new())
        .with_context(|| format!("Rendering {uri}"))?;

    serde_json::to_writer_pretty(&mut *out, &response)?;
    writeln!(out)?;
    Ok(())
}

/// Dispatches a `POST` with `values` for `uri` and prints where the panel redirected.
///
/// # Errors
/// Returns the dispatch or validation error, or a write failure.
pub fn set(
    session: &Session,
    uri: &str,
    values: &[(String, String)],
    out: &mut dyn Write,
) -> Result<()> {
    let params: BTreeMap<String, String> = values.iter().cloned().collect();
    let response = session
        .dispatcher()
        .dispatch(&session.viewer, Method::Post, uri, params)
        .with_context(|| format!("Submitting {uri}"))?;

    match response.redirect_uri() {
        Some(target) => writeln!(out, "Saved. Continue at {target}")?,
        None => writeln!(out, "Panel answered without a redirect")?,
    }
    Ok(())
}
