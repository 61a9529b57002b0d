use crate::prelude::{println, *};
use crate::render::format_page_bar;
use crate::settings::ViewOptions;
use folio_core::pagination::{Pagination, PagingSnapshot};
use prettytable::row;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct WindowOptions {
    /// Total number of items in the list
    #[arg(short, long)]
    pub total_items: usize,

    /// Current page (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub current: usize,

    #[clap(flatten)]
    pub view: ViewOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Paging state for a list, plus the item range of the current page
#[derive(Debug, Serialize)]
pub struct WindowOutput {
    pub total_items: usize,
    pub items_per_page: usize,
    pub first_item: Option<usize>,
    pub last_item: Option<usize>,
    pub pagination: PagingSnapshot,
}

pub async fn run(options: WindowOptions, global: crate::Global) -> Result<()> {
    let config = options.view.resolve()?;

    if global.verbose {
        println!(
            "Items per page: {}, max visible pages: {}",
            config.items_per_page, config.max_visible_pages
        );
    }

    let output = compute_window(options.total_items, options.current, &config);

    let snapshot = &output.pagination;
    if snapshot.total_pages > 0 && snapshot.current_page > snapshot.total_pages {
        log::warn!(
            "page {} is beyond the last page ({})",
            options.current,
            snapshot.total_pages
        );
    }

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        output_table(&output);
    }

    Ok(())
}

fn compute_window(
    total_items: usize,
    current: usize,
    config: &folio_core::config::ViewConfig,
) -> WindowOutput {
    let mut pagination = Pagination::from_config(config);
    pagination.initialize(total_items, config.items_per_page, current);

    let range = pagination.item_range();
    let (first_item, last_item) = if range.is_empty() {
        (None, None)
    } else {
        (Some(range.start + 1), Some(range.end))
    };

    WindowOutput {
        total_items,
        items_per_page: pagination.items_per_page(),
        first_item,
        last_item,
        pagination: pagination.snapshot(),
    }
}

fn output_table(output: &WindowOutput) {
    let snapshot = &output.pagination;
    let mut table = new_table();

    table.add_row(row!["Current page", snapshot.current_page]);
    table.add_row(row!["Total pages", snapshot.total_pages]);
    table.add_row(row!["Total items", output.total_items]);
    table.add_row(row!["Items per page", output.items_per_page]);
    table.add_row(row![
        "Showing items",
        match (output.first_item, output.last_item) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "none".to_string(),
        }
    ]);
    table.add_row(row!["Previous disabled", snapshot.is_previous_disabled]);
    table.add_row(row!["Next disabled", snapshot.is_next_disabled]);
    table.add_row(row!["Show pagination", snapshot.show_pagination]);

    table.printstd();
    println!();
    println!("{}", format_page_bar(snapshot));
}
