use crate::prelude::*;
use clap::Parser;

mod browse;
mod error;
mod group;
mod prelude;
mod read;
mod render;
mod settings;
mod source;
mod window;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Group, paginate and browse article content records"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "FOLIO_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Compute the pagination window for a list
    Window(crate::window::WindowOptions),

    /// Group content records into pages, blocks and columns
    Group(crate::group::GroupOptions),

    /// Render one page of an article
    Read(crate::read::ReadOptions),

    /// Page through an article interactively
    Browse(crate::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Window(options) => crate::window::run(options, app.global).await,
        SubCommands::Group(options) => crate::group::run(options, app.global).await,
        SubCommands::Read(options) => crate::read::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
