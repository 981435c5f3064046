use clap::Parser;
use panelkit_cli::args::Cli;
use panelkit_domain::config::PanelkitConfig;

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::parse_from(std::iter::once("panelkit").chain(args.iter().copied()));
    let mut out = Vec::new();
    panelkit_cli::run(&cli, &PanelkitConfig::default(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn panels_lists_displayed_panels_in_order() -> anyhow::Result<()> {
    let output = run(&["panels"])?;
    let keys: Vec<&str> =
        output.lines().skip(2).filter_map(|line| line.split_whitespace().next()).collect();
    assert_eq!(keys, ["account", "language", "date-time", "display"]);

    let all = run(&["panels", "--all"])?;
    assert!(all.contains("developer"));
    Ok(())
}

#[test]
fn groups_nest_their_panels() -> anyhow::Result<()> {
    let output = run(&["groups"])?;
    let first = output.lines().next().unwrap_or_default();
    assert_eq!(first, "Account (account)");
    assert!(!output.contains("Developer"));
    Ok(())
}

#[test]
fn uri_follows_the_viewer_and_target() -> anyhow::Result<()> {
    assert_eq!(run(&["uri", "display"])?.trim(), "/settings/panel/display/");
    assert_eq!(run(&["uri", "display", "--user", "1"])?.trim(), "/settings/panel/display/");
    assert_eq!(
        run(&["uri", "date-time", "saved", "--user", "5", "--as", "9"])?.trim(),
        "/settings/5/panel/date-time/saved"
    );
    assert!(run(&["uri", "missing"]).is_err());
    Ok(())
}

#[test]
fn set_persists_through_the_state_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("state.json");
    let state = state.to_str().expect("utf-8 temp path");

    let saved = run(&["set", "/settings/panel/display/", "title-style=text", "--state", state])?;
    assert!(saved.contains("/settings/panel/display/saved"), "{saved}");

    let shown = run(&["show", "/settings/panel/display/", "--state", state])?;
    let json: serde_json::Value = serde_json::from_str(&shown)?;
    let fields = json["fields"].as_array().expect("fields");
    let title = fields.iter().find(|f| f["key"] == "title-style").expect("title-style field");
    assert_eq!(title["value"], "text");
    assert_eq!(title["is_default"], false);
    Ok(())
}

#[test]
fn administrators_reach_other_accounts_only_when_flagged() -> anyhow::Result<()> {
    let uri = "/settings/5/panel/date-time/";
    assert!(run(&["show", uri, "--as", "9"]).is_err());
    assert!(run(&["show", uri, "--as", "9", "--admin"])?.contains("\"type\": \"content\""));
    assert!(run(&["show", "/settings/5/panel/language/", "--as", "9", "--admin"]).is_err());
    Ok(())
}

#[test]
fn invalid_values_fail_the_command() {
    let err = run(&["set", "/settings/panel/date-time/", "week-start=9"]).expect_err("range");
    assert!(format!("{err:#}").contains("week-start"));
}
