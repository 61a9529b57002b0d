use colored::Colorize;
use folio_core::content::{GroupedBlock, PagedContent};
use folio_core::pagination::{PageEntry, PagingSnapshot};

/// Width of the section rules
pub const RULE_WIDTH: usize = 80;

/// Render the pagination bar, e.g. `‹ 1 … 4 [5] 6 … 10 ›`
pub fn format_page_bar(snapshot: &PagingSnapshot) -> String {
    if snapshot.entries.is_empty() {
        return "(no pages)".bright_black().to_string();
    }

    let mut parts = Vec::with_capacity(snapshot.entries.len() + 2);

    parts.push(if snapshot.is_previous_disabled {
        "‹".bright_black().to_string()
    } else {
        "‹".bright_white().to_string()
    });

    for entry in &snapshot.entries {
        parts.push(match entry {
            PageEntry::Page { value, active: true } => {
                format!("[{value}]").bright_cyan().bold().to_string()
            }
            PageEntry::Page { value, active: false } => value.to_string().white().to_string(),
            PageEntry::Ellipsis => "…".bright_black().to_string(),
        });
    }

    parts.push(if snapshot.is_next_disabled {
        "›".bright_black().to_string()
    } else {
        "›".bright_white().to_string()
    });

    parts.join(" ")
}

fn format_block(block: &GroupedBlock) -> String {
    let mut result = format!(
        "\n{} {}\n",
        format!("[block {}]", block.block_id).yellow().bold(),
        format!("order {}", block.order).bright_black()
    );

    for column in &block.columns {
        if let Some(title) = &column.title_text {
            result.push_str(&format!("  {}\n", title.white().bold()));
        }
        if let Some(text) = &column.text_content {
            for line in text.lines() {
                result.push_str(&format!("  {}\n", line));
            }
        }
        if let Some(image) = &column.image_filename {
            result.push_str(&format!("  {}: {}\n", "Image".green(), image.cyan()));
        }
        if column.title_text.is_none()
            && column.text_content.is_none()
            && column.image_filename.is_none()
        {
            result.push_str(&format!(
                "  {}\n",
                format!("(empty column at position {})", column.position).bright_black()
            ));
        }
    }

    result
}

/// Render the blocks of a page, or an empty-state line
pub fn format_page_content(content: Option<&PagedContent>) -> String {
    match content {
        Some(paged) if !paged.blocks.is_empty() => {
            paged.blocks.iter().map(format_block).collect::<String>()
        }
        _ => format!("\n{}\n", "No content on this page.".yellow()),
    }
}
