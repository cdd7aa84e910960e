use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use archey::cli::Cli;
use archey::color::{ColorResolver, palette_listing};
use archey::fact::{self, FactOptions};
use archey::system::get_system_info;
use archey::{Config, Renderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    if std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        config.options.no_color = true;
    }

    if cli.list_colors {
        let resolver = ColorResolver::new(!config.options.no_color);
        print!("{}", palette_listing(&resolver));
        return Ok(());
    }

    let fact_options = FactOptions::from_config(&config)?;
    let info = get_system_info(&config)
        .await
        .context("failed to gather system information")?;
    let facts = fact::collect(&info, &fact_options);

    let output = Renderer::default().render(&facts, &config.render_options())?;
    print!("{}", output);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
