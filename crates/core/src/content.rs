//! Content records and the page/block/column grouping transform
//!
//! Article content arrives as a flat list of records, one per column, each tagged with the
//! page and block it belongs to. [`group`] folds that list into pages of ordered blocks.
//! Grouping is pure: the same input sequence always produces the same output.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for record payload parsing
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Payload(String),
}

/// Flat content record as delivered by the content API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub page: i64,
    pub block_id: i64,
    pub block_order: i64,
    pub column_position: i64,
    pub column_id: Option<i64>,
    pub title_id: Option<i64>,
    pub title_text: Option<String>,
    pub text_id: Option<i64>,
    pub text_content: Option<String>,
    pub image_id: Option<i64>,
    pub image_filename: Option<String>,
}

/// Smallest content fragment inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
}

impl From<&ContentRecord> for Column {
    fn from(record: &ContentRecord) -> Self {
        Column {
            position: record.column_position,
            column_id: record.column_id,
            title_id: record.title_id,
            title_text: record.title_text.clone(),
            text_id: record.text_id,
            text_content: record.text_content.clone(),
            image_id: record.image_id,
            image_filename: record.image_filename.clone(),
        }
    }
}

/// Block of columns placed on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedBlock {
    pub block_id: i64,
    pub order: i64,
    pub columns: Vec<Column>,
}

/// All blocks of one page, ordered by `order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedContent {
    pub page: i64,
    pub blocks: Vec<GroupedBlock>,
}

impl PagedContent {
    pub fn column_count(&self) -> usize {
        self.blocks.iter().map(|block| block.columns.len()).sum()
    }
}

/// Blocks of a single page while grouping, indexed by block id
#[derive(Default)]
struct PageBucket {
    blocks: Vec<GroupedBlock>,
    index: HashMap<i64, usize>,
}

/// Group flat records into pages of ordered blocks.
///
/// - Pages come out sorted by page number, whatever the input order.
/// - A block takes its `order` from the first record that mentions it; later records
///   with a different `block_order` only contribute columns.
/// - Blocks are sorted by `order` with a stable sort, so ties keep first-seen order.
/// - Columns keep input order and are never sorted.
pub fn group(records: &[ContentRecord]) -> Vec<PagedContent> {
    let mut pages: BTreeMap<i64, PageBucket> = BTreeMap::new();

    for record in records {
        let bucket = pages.entry(record.page).or_default();

        match bucket.index.get(&record.block_id).copied() {
            Some(position) => bucket.blocks[position].columns.push(Column::from(record)),
            None => {
                bucket.index.insert(record.block_id, bucket.blocks.len());
                bucket.blocks.push(GroupedBlock {
                    block_id: record.block_id,
                    order: record.block_order,
                    columns: vec![Column::from(record)],
                });
            }
        }
    }

    pages
        .into_iter()
        .map(|(page, bucket)| {
            let mut blocks = bucket.blocks;
            blocks.sort_by_key(|block| block.order);
            PagedContent { page, blocks }
        })
        .collect()
}

/// Flatten grouped content back into records, in rendering order
pub fn flatten(content: &[PagedContent]) -> Vec<ContentRecord> {
    content
        .iter()
        .flat_map(|paged| {
            paged.blocks.iter().flat_map(move |block| {
                block.columns.iter().map(move |column| ContentRecord {
                    page: paged.page,
                    block_id: block.block_id,
                    block_order: block.order,
                    column_position: column.position,
                    column_id: column.column_id,
                    title_id: column.title_id,
                    title_text: column.title_text.clone(),
                    text_id: column.text_id,
                    text_content: column.text_content.clone(),
                    image_id: column.image_id,
                    image_filename: column.image_filename.clone(),
                })
            })
        })
        .collect()
}

/// Find the grouped entry for a one-based page number
pub fn find_page(content: &[PagedContent], page: usize) -> Option<&PagedContent> {
    let page = i64::try_from(page).ok()?;
    content.iter().find(|paged| paged.page == page)
}

/// A record rejected while parsing a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub index: usize,
    pub reason: String,
}

/// Records accepted from a payload, plus the ones that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    pub records: Vec<ContentRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Parse a JSON payload of content records.
///
/// Accepts either a bare array or an object with a `records` array. Each element is
/// decoded on its own: elements that fail to decode, or that name a page below 1,
/// are reported in `issues` instead of failing the whole payload.
pub fn parse_records(json: &str) -> Result<ParsedRecords, ContentError> {
    let items = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ContentError::Payload(
                    "expected a `records` array".to_string(),
                ))
            }
        },
        other => {
            return Err(ContentError::Payload(format!(
                "expected an array of records, found {}",
                value_kind(&other)
            )))
        }
    };

    let mut parsed = ParsedRecords::default();

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ContentRecord>(item) {
            Ok(record) if record.page < 1 => parsed.issues.push(RecordIssue {
                index,
                reason: format!("page {} is not a positive page number", record.page),
            }),
            Ok(record) => parsed.records.push(record),
            Err(err) => parsed.issues.push(RecordIssue {
                index,
                reason: err.to_string(),
            }),
        }
    }

    Ok(parsed)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page: i64, block_id: i64, block_order: i64, position: i64) -> ContentRecord {
        ContentRecord {
            page,
            block_id,
            block_order,
            column_position: position,
            column_id: Some(block_id * 100 + position),
            title_id: None,
            title_text: None,
            text_id: None,
            text_content: Some(format!("p{page} b{block_id} c{position}")),
            image_id: None,
            image_filename: None,
        }
    }

    fn block_ids(paged: &PagedContent) -> Vec<i64> {
        paged.blocks.iter().map(|b| b.block_id).collect()
    }

    // ============================================================================
    // group tests
    // ============================================================================

    #[test]
    fn test_group_empty() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_group_single_record() {
        let grouped = group(&[record(1, 10, 1, 1)]);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].page, 1);
        assert_eq!(grouped[0].blocks.len(), 1);
        assert_eq!(grouped[0].blocks[0].block_id, 10);
        assert_eq!(grouped[0].blocks[0].columns[0].column_id, Some(1001));
    }

    #[test]
    fn test_group_pages_sorted_ascending() {
        let records = vec![record(2, 20, 1, 1), record(1, 10, 1, 1), record(3, 30, 1, 1)];

        let pages: Vec<i64> = group(&records).iter().map(|p| p.page).collect();

        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_group_pages_deduplicated() {
        let records = vec![record(1, 10, 1, 1), record(2, 20, 1, 1), record(1, 11, 2, 1)];

        let grouped = group(&records);

        assert_eq!(grouped.len(), 2);
        assert_eq!(block_ids(&grouped[0]), vec![10, 11]);
    }

    #[test]
    fn test_group_blocks_sorted_by_order() {
        let records = vec![record(1, 10, 3, 1), record(1, 11, 1, 1), record(1, 12, 2, 1)];

        let grouped = group(&records);

        assert_eq!(block_ids(&grouped[0]), vec![11, 12, 10]);
    }

    #[test]
    fn test_group_block_order_ties_keep_input_order() {
        let records = vec![
            record(1, 30, 1, 1),
            record(1, 10, 1, 1),
            record(1, 20, 0, 1),
            record(1, 40, 1, 1),
        ];

        let grouped = group(&records);

        assert_eq!(block_ids(&grouped[0]), vec![20, 30, 10, 40]);
    }

    #[test]
    fn test_group_columns_keep_input_order() {
        let records = vec![record(1, 10, 1, 3), record(1, 10, 1, 1), record(1, 10, 1, 2)];

        let grouped = group(&records);
        let positions: Vec<i64> = grouped[0].blocks[0]
            .columns
            .iter()
            .map(|c| c.position)
            .collect();

        assert_eq!(positions, vec![3, 1, 2]);
    }

    #[test]
    fn test_group_first_order_wins() {
        let records = vec![record(1, 10, 5, 1), record(1, 11, 3, 1), record(1, 10, 1, 2)];

        let grouped = group(&records);

        assert_eq!(grouped[0].blocks[1].block_id, 10);
        assert_eq!(grouped[0].blocks[1].order, 5);
        assert_eq!(grouped[0].blocks[1].columns.len(), 2);
    }

    #[test]
    fn test_group_every_record_lands_in_one_block() {
        let records = vec![
            record(1, 10, 1, 1),
            record(2, 20, 1, 1),
            record(1, 10, 1, 2),
            record(1, 11, 2, 1),
            record(2, 20, 1, 2),
            record(2, 21, 0, 1),
        ];

        let grouped = group(&records);
        let columns: usize = grouped.iter().map(PagedContent::column_count).sum();

        assert_eq!(columns, records.len());
        assert_eq!(grouped[0].column_count(), 3);
        assert_eq!(grouped[1].column_count(), 3);
    }

    #[test]
    fn test_group_same_block_id_on_two_pages() {
        let records = vec![record(1, 10, 1, 1), record(2, 10, 1, 1)];

        let grouped = group(&records);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].blocks[0].columns.len(), 1);
        assert_eq!(grouped[1].blocks[0].columns.len(), 1);
    }

    #[test]
    fn test_group_passes_through_non_positive_pages() {
        let records = vec![record(1, 10, 1, 1), record(-2, 11, 1, 1), record(0, 12, 1, 1)];

        let pages: Vec<i64> = group(&records).iter().map(|p| p.page).collect();

        assert_eq!(pages, vec![-2, 0, 1]);
    }

    #[test]
    fn test_group_is_deterministic() {
        let records = vec![
            record(2, 20, 2, 1),
            record(1, 10, 1, 1),
            record(2, 21, 1, 1),
            record(1, 10, 1, 2),
        ];

        assert_eq!(group(&records), group(&records));
    }

    #[test]
    fn test_group_copies_column_fields() {
        let input = ContentRecord {
            page: 1,
            block_id: 7,
            block_order: 1,
            column_position: 2,
            column_id: Some(70),
            title_id: Some(71),
            title_text: Some("Heading".to_string()),
            text_id: Some(72),
            text_content: Some("Body".to_string()),
            image_id: Some(73),
            image_filename: Some("hero.png".to_string()),
        };

        let grouped = group(std::slice::from_ref(&input));
        let column = &grouped[0].blocks[0].columns[0];

        assert_eq!(column, &Column::from(&input));
        assert_eq!(column.title_text.as_deref(), Some("Heading"));
        assert_eq!(column.image_filename.as_deref(), Some("hero.png"));
    }

    // ============================================================================
    // flatten tests
    // ============================================================================

    #[test]
    fn test_flatten_regroup_is_stable() {
        let records = vec![
            record(3, 30, 2, 1),
            record(1, 10, 2, 1),
            record(1, 11, 1, 1),
            record(1, 10, 9, 2),
            record(3, 31, 2, 1),
        ];

        let grouped = group(&records);
        let regrouped = group(&flatten(&grouped));

        assert_eq!(regrouped, grouped);
    }

    #[test]
    fn test_flatten_emits_rendering_order() {
        let grouped = group(&[record(2, 20, 1, 1), record(1, 11, 2, 1), record(1, 10, 1, 1)]);

        let flat: Vec<(i64, i64)> = flatten(&grouped)
            .iter()
            .map(|r| (r.page, r.block_id))
            .collect();

        assert_eq!(flat, vec![(1, 10), (1, 11), (2, 20)]);
    }

    // ============================================================================
    // find_page tests
    // ============================================================================

    #[test]
    fn test_find_page() {
        let grouped = group(&[record(1, 10, 1, 1), record(2, 20, 1, 1)]);

        assert_eq!(find_page(&grouped, 2).map(|p| p.page), Some(2));
        assert!(find_page(&grouped, 3).is_none());
        assert!(find_page(&grouped, 0).is_none());
    }

    #[test]
    fn test_find_page_with_gap() {
        let grouped = group(&[record(1, 10, 1, 1), record(3, 30, 1, 1)]);

        assert!(find_page(&grouped, 2).is_none());
        assert_eq!(find_page(&grouped, 3).map(|p| p.blocks.len()), Some(1));
    }

    // ============================================================================
    // parse_records tests
    // ============================================================================

    #[test]
    fn test_parse_records_array() {
        let json = r#"[
            {"page": 1, "blockId": 10, "blockOrder": 1, "columnPosition": 1,
             "titleText": "Intro", "textContent": "Hello"},
            {"page": 2, "blockId": 20, "blockOrder": 1, "columnPosition": 1,
             "imageId": 5, "imageFilename": "a.png"}
        ]"#;

        let parsed = parse_records(json).unwrap();

        assert!(parsed.issues.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].title_text.as_deref(), Some("Intro"));
        assert_eq!(parsed.records[0].column_id, None);
        assert_eq!(parsed.records[1].image_id, Some(5));
    }

    #[test]
    fn test_parse_records_wrapped_object() {
        let json = r#"{"records": [
            {"page": 1, "blockId": 10, "blockOrder": 1, "columnPosition": 1}
        ]}"#;

        let parsed = parse_records(json).unwrap();

        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_parse_records_skips_malformed() {
        let json = r#"[
            {"page": 1, "blockId": 10, "blockOrder": 1, "columnPosition": 1},
            {"page": 1, "blockOrder": 1, "columnPosition": 2},
            {"page": -1, "blockId": 11, "blockOrder": 1, "columnPosition": 1},
            {"page": "two", "blockId": 12, "blockOrder": 1, "columnPosition": 1},
            {"page": 2, "blockId": 20, "blockOrder": 1, "columnPosition": 1}
        ]"#;

        let parsed = parse_records(json).unwrap();

        let pages: Vec<i64> = parsed.records.iter().map(|r| r.page).collect();
        let skipped: Vec<usize> = parsed.issues.iter().map(|i| i.index).collect();
        assert_eq!(pages, vec![1, 2]);
        assert_eq!(skipped, vec![1, 2, 3]);
        assert!(parsed.issues[0].reason.contains("blockId"));
        assert!(parsed.issues[1].reason.contains("page -1"));
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(matches!(
            parse_records("[{"),
            Err(ContentError::Json(_))
        ));
    }

    #[test]
    fn test_parse_records_wrong_shape() {
        let err = parse_records(r#""records""#).unwrap_err();
        assert!(err.to_string().contains("found a string"));

        let err = parse_records(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, ContentError::Payload(_)));
    }

    #[test]
    fn test_parse_records_empty_array() {
        let parsed = parse_records("[]").unwrap();

        assert_eq!(parsed, ParsedRecords::default());
    }
}
