use crate::prelude::{print, println, *};
use crate::render::{format_page_content, RULE_WIDTH};
use crate::source::{load_records, RecordSource};
use colored::Colorize;
use folio_core::content::{group, PagedContent};

#[derive(Debug, clap::Args, Clone)]
pub struct GroupOptions {
    /// Records file, `-` for stdin, or a content API URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: GroupOptions, global: crate::Global) -> Result<()> {
    let source = RecordSource::parse(&options.source)?;

    if global.verbose {
        println!("Loading records from {}", source);
    }

    let records = load_records(&source).await?;
    let grouped = group(&records);

    if options.json {
        println!("{}", format_group_json(&grouped)?);
    } else {
        print!("{}", format_group_text(&grouped, &source));
    }

    Ok(())
}

fn format_group_json(grouped: &[PagedContent]) -> Result<String> {
    serde_json::to_string_pretty(grouped).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_group_text(grouped: &[PagedContent], source: &RecordSource) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("GROUPED CONTENT: {} ({} pages)", source, grouped.len())
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH).bright_cyan()));

    if grouped.is_empty() {
        result.push_str(&format!("\n{}\n", "No content records.".yellow()));
    }

    for paged in grouped {
        result.push_str(&format!(
            "\n{} {}\n",
            format!("PAGE {}", paged.page).bright_yellow().bold(),
            format!(
                "({} blocks, {} columns)",
                paged.blocks.len(),
                paged.column_count()
            )
            .bright_black()
        ));
        result.push_str(&format_page_content(Some(paged)));
    }

    result.push('\n');
    result
}
