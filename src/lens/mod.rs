//! Lens module
//!
//! This module provides the building blocks of a registry search, from the
//! request to the rendered document. Each stage takes explicit inputs and
//! returns explicit outputs, so they can be used (and tested) on their own.
//!
//! # Pipeline
//!
//! | Stage | Module | Entry point |
//! |-------|--------|-------------|
//! | Pagination | [`search`] | `SearchLens::search` |
//! | Decoding and field extraction | [`registry`] | `ResultPage::decode`, `extract` |
//! | Row assembly | [`rows`] | `build_rows` |
//! | CIDR conversion | [`cidr`] | `to_cidr` |
//! | Rendering and output | [`render`] | `render`, `write_output` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ripeq::lens::render::{render, RenderOptions};
//! use ripeq::lens::rows::{build_rows, RowOptions};
//! use ripeq::lens::search::{SearchArgs, SearchLens};
//! use ripeq::lens::utils::OutputFormat;
//!
//! let lens = SearchLens::default();
//! let records = lens.search(&SearchArgs::new("EXAMPLE-NET"))?;
//! let rows = build_rows(&records, &RowOptions::default().with_cidr(true));
//! println!("{}", render(&rows, &RenderOptions::new(OutputFormat::Json))?);
//! ```

pub mod cidr;
pub mod registry;
pub mod render;
pub mod rows;
pub mod search;
pub mod utils;
