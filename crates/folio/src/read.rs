use crate::prelude::{print, println, *};
use crate::render::{format_page_bar, format_page_content, RULE_WIDTH};
use crate::settings::ViewOptions;
use crate::source::{load_records, RecordSource};
use colored::Colorize;
use folio_core::content::PagedContent;
use folio_core::pagination::{Pagination, PagingSnapshot};
use folio_core::sync::ArticleView;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct ReadOptions {
    /// Records file, `-` for stdin, or a content API URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    #[clap(flatten)]
    pub view: ViewOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One rendered article page with its pagination state
#[derive(Debug, Serialize)]
pub struct ReadOutput {
    pub source: String,
    pub requested_page: usize,
    pub content: Option<PagedContent>,
    pub pagination: PagingSnapshot,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    let source = RecordSource::parse(&options.source)?;
    let config = options.view.resolve()?;

    if global.verbose {
        println!("Loading records from {}", source);
    }

    let records = load_records(&source).await?;

    let mut authority = Pagination::from_config(&config);
    let mut view = ArticleView::mount(&mut authority, config);
    view.set_records(&records);

    if options.page != view.current_page() && !view.go_to_page(options.page) {
        log::warn!(
            "page {} is out of range, showing page {} of {}",
            options.page,
            view.current_page(),
            view.snapshot().total_pages
        );
    }

    let output = build_read_output(
        &options.source,
        options.page,
        view.current_content().cloned(),
        view.snapshot(),
    );
    view.close();

    if options.json {
        println!("{}", format_read_json(&output)?);
    } else {
        print!("{}", format_read_text(&output));
    }

    Ok(())
}

/// Assemble the read output and its navigation commands
pub fn build_read_output(
    source: &str,
    requested_page: usize,
    content: Option<PagedContent>,
    pagination: PagingSnapshot,
) -> ReadOutput {
    let next_page_command = if pagination.is_next_disabled {
        None
    } else {
        Some(format!(
            "folio read {} --page {}",
            source,
            pagination.current_page + 1
        ))
    };

    let prev_page_command = if pagination.is_previous_disabled || pagination.total_pages == 0 {
        None
    } else {
        Some(format!(
            "folio read {} --page {}",
            source,
            pagination.current_page - 1
        ))
    };

    ReadOutput {
        source: source.to_string(),
        requested_page,
        content,
        pagination,
        next_page_command,
        prev_page_command,
    }
}

fn format_read_json(output: &ReadOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_read_text(output: &ReadOutput) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "{} (Page {} of {})",
            output.source, pagination.current_page, pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH).bright_cyan()));

    result.push_str(&format_page_content(output.content.as_ref()));

    if !pagination.show_pagination {
        result.push('\n');
        return result;
    }

    result.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH).bright_yellow()));
    result.push_str(&format!("\n{}\n", format_page_bar(pagination)));

    result.push_str(&format!("\n{}:\n", "To navigate".bright_white().bold()));
    if let Some(next) = &output.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &output.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }
    result.push_str(&format!(
        "  {}: {}\n",
        "Browse interactively".green(),
        format!("folio browse {}", output.source).cyan()
    ));

    result.push('\n');
    result
}
