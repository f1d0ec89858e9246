use clap::{ArgGroup, Args, Parser, Subcommand};
use folio::app::editor;
use folio::app::{self, AppConfig};
use folio::config;
#[cfg(feature = "harness")]
use folio::harness;
use folio::logging::{LoggingMode, init_logging};
use folio::ui::theme;
use std::path::PathBuf;

/// Terminal client for book communities, reading lists, and post discussions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON snapshot to browse. Built-in demo data is used when omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Act as this reader id instead of the snapshot's viewer.
    #[arg(long)]
    viewer_id: Option<u64>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LoggingMode::File)]
    log_mode: LoggingMode,

    /// Enable debug-level logging.
    #[arg(long, default_value_t = false)]
    debug: bool,

    #[cfg(feature = "harness")]
    /// Render deterministic frames to stdout without entering interactive mode.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 120)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 36)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit folio configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_mode, cli.debug)?;

    if let Some(Command::Config(command)) = cli.command {
        return handle_config_command(command);
    }

    let config = config::load_or_create()?;
    theme::apply(config.theme);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_demo_dump(cli.harness_width, cli.harness_height)?;
        println!("{dump}");
        return Ok(());
    }

    let result = app::run(AppConfig {
        data: cli.data,
        page_sizes: config.paging,
        viewer_id: cli.viewer_id.or(config.viewer_id),
    })
    .await;

    if let Err(error) = &result {
        log::error!("folio exited with error: {error:#}");
    }
    result
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}
