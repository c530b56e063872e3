//! Document model types for rendered chat messages.
//!
//! This module defines the intermediate representation (IR) that bridges
//! Markdown parsing and every output format. A message is parsed once into
//! a [`Document`]; the HTML, Markdown, readable-text and speech emitters all
//! walk the same tree.

mod block;
mod document;
mod inline;
mod list;
mod table;

pub use block::Block;
pub use document::Document;
pub use inline::{inline_text, runs_text, InlineContent, TextRun, TextStyle};
pub use list::{List, ListItem, ListKind};
pub use table::{Table, TableCell, TableRow};
