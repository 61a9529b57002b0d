use crate::prelude::{eprintln, print, println, *};
use crate::render::{format_page_bar, format_page_content, RULE_WIDTH};
use crate::settings::ViewOptions;
use crate::source::{load_records, RecordSource};
use colored::Colorize;
use folio_core::pagination::Pagination;
use folio_core::sync::{ArticleView, Viewport};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, clap::Args, Clone)]
pub struct BrowseOptions {
    /// Records file or content API URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    #[clap(flatten)]
    pub view: ViewOptions,
}

/// A single line of input in the browse loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    Help,
    Quit,
}

/// Parse a browse command. Returns `None` for unrecognized input.
pub fn parse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim().to_lowercase();

    let command = match line.as_str() {
        "n" | "next" | "" => BrowseCommand::Next,
        "p" | "prev" | "previous" => BrowseCommand::Previous,
        "f" | "first" => BrowseCommand::First,
        "l" | "last" => BrowseCommand::Last,
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => {
            let target = other.strip_prefix("g ").unwrap_or(other).trim();
            BrowseCommand::GoTo(target.parse::<usize>().ok()?)
        }
    };

    Some(command)
}

/// Send a navigation command to the view. Returns whether the page changed.
pub fn apply_command<V: Viewport>(view: &mut ArticleView<'_, V>, command: BrowseCommand) -> bool {
    match command {
        BrowseCommand::Next => view.next_page(),
        BrowseCommand::Previous => view.previous_page(),
        BrowseCommand::First => view.go_to_first(),
        BrowseCommand::Last => view.go_to_last(),
        BrowseCommand::GoTo(page) => view.go_to_page(page),
        BrowseCommand::Help | BrowseCommand::Quit => false,
    }
}

/// Clears the terminal so each page starts at the top
#[derive(Debug, Default)]
struct TerminalViewport;

impl Viewport for TerminalViewport {
    fn scroll_to_top(&mut self) {
        print!("\x1b[2J\x1b[H");
    }
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let source = RecordSource::parse(&options.source)?;
    if source == RecordSource::Stdin {
        return Err(Error::InvalidSource(
            "browse reads commands from stdin, so records must come from a file or URL"
                .to_string(),
        )
        .into());
    }

    let config = options.view.resolve()?;
    let records = load_records(&source).await?;

    let mut authority = Pagination::from_config(&config);
    let mut view = ArticleView::with_viewport(&mut authority, config, TerminalViewport);
    view.on_page_change(|page| log::info!("navigated to page {}", page));
    view.set_records(&records);

    if global.verbose {
        println!("Loaded {} records into {} pages", records.len(), view.content().len());
    }

    render(&view, &source);
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command from stdin")?
    {
        match parse_command(&line) {
            Some(BrowseCommand::Quit) => break,
            Some(BrowseCommand::Help) => println!("{}", help_text()),
            Some(command) => {
                if apply_command(&mut view, command) {
                    render(&view, &source);
                } else {
                    println!("{}", "Page unchanged.".yellow());
                }
            }
            None => eprintln!("{} {}", "Unknown command:".red(), line.trim()),
        }
        prompt()?;
    }

    view.close();
    Ok(())
}

fn render<V: Viewport>(view: &ArticleView<'_, V>, source: &RecordSource) {
    let snapshot = view.snapshot();

    println!("{}", "=".repeat(RULE_WIDTH).bright_cyan());
    println!(
        "{}",
        format!(
            "{} (Page {} of {})",
            source,
            view.current_page(),
            snapshot.total_pages
        )
        .bright_cyan()
        .bold()
    );
    println!("{}", "=".repeat(RULE_WIDTH).bright_cyan());
    print!("{}", format_page_content(view.current_content()));

    if snapshot.show_pagination {
        println!();
        println!("{}", format_page_bar(&snapshot));
    }
}

fn prompt() -> Result<()> {
    print!("\n{} ", "[n]ext [p]rev [f]irst [l]ast <page> [q]uit >".bright_black());
    std::io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

fn help_text() -> String {
    [
        "  n, next       next page (also Enter)",
        "  p, prev       previous page",
        "  f, first      first page",
        "  l, last       last page",
        "  <number>      jump to page",
        "  q, quit       leave",
    ]
    .join("\n")
}
