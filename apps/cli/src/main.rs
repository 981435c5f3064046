use anyhow::Result;
use clap::Parser;
use panelkit_cli::args::Cli;
use panelkit_domain::config::PanelkitConfig;
use panelkit_kernel::config::load_config;
use panelkit_logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config: PanelkitConfig = load_config(cli.config.as_deref())?;
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logger)?;

    let stdout = std::io::stdout();
    panelkit_cli::run(&cli, &config, &mut stdout.lock())
}
