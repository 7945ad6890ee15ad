use clap::Parser;
use commands::Command;
use settings::Settings;
use store::JsonFileStore;

mod commands;
mod error;
mod settings;
mod store;

#[derive(Parser, Debug)]
#[command(name = "panier")]
#[command(about = "Shopping list that merges what you add with what is already on it")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the list file.
    #[arg(long)]
    list: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(list) = cli.list {
        settings.list_path = list;
    }
    if let Some(level) = cli.level {
        settings.level = level;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "panier={level},engine={level}",
            level = settings.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .config(settings.engine)
        .build()?;
    let store = JsonFileStore::new(&settings.list_path);
    tracing::debug!("using list {}", store.path().display());

    commands::run(cli.command, &engine, &store, &mut std::io::stdout().lock())
}
