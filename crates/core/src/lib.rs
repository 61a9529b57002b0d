//! Core library for folio
//!
//! This crate implements the **Functional Core** of folio, following the
//! Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`folio_core`** (this crate): paging math, content grouping and the view/pagination
//!   binding, with zero I/O
//! - **`folio`**: record fetching, configuration loading and terminal rendering (the
//!   Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure transformations**: [`content::group`] and [`pagination::page_entries`] return
//!   the same output for the same input
//! - **Explicit state**: the only mutable state is the [`pagination::Pagination`]
//!   authority, owned by the caller and lent to one [`sync::ArticleView`] at a time
//! - **Synchronous observation**: state changes are pushed to subscribers in order,
//!   after the state has been written
//! - **Testable**: everything is exercised with fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`pagination`]: paging state, windowed page entries and the pagination authority
//! - [`content`]: content records, the page/block/column grouping transform and payload
//!   parsing
//! - [`sync`]: the article view that keeps grouped content and the authority in step
//! - [`config`]: view-level configuration
//!
//! # Example Usage
//!
//! ```rust
//! use folio_core::config::ViewConfig;
//! use folio_core::content::ContentRecord;
//! use folio_core::pagination::Pagination;
//! use folio_core::sync::ArticleView;
//!
//! let records: Vec<ContentRecord> = (1..=3)
//!     .map(|page| ContentRecord {
//!         page,
//!         block_id: page * 10,
//!         block_order: 1,
//!         column_position: 1,
//!         column_id: None,
//!         title_id: None,
//!         title_text: Some(format!("Section {page}")),
//!         text_id: None,
//!         text_content: None,
//!         image_id: None,
//!         image_filename: None,
//!     })
//!     .collect();
//!
//! let mut authority = Pagination::new();
//! let mut view = ArticleView::mount(&mut authority, ViewConfig::default());
//! view.set_records(&records);
//!
//! assert!(view.go_to_page(2));
//! assert_eq!(view.current_content().map(|paged| paged.page), Some(2));
//! assert!(!view.go_to_page(4));
//! ```

pub mod config;
pub mod content;
pub mod pagination;
pub mod sync;
