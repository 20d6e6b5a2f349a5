// PDBXML extraction modules
pub mod flat;
pub mod labels;
mod lookup;
mod parse;
pub mod types;
pub mod value;

pub use flat::{ARRAY_JOIN, extract_flat, flat_header};
pub use lookup::{Elements, TagIndex, TagMatch, find_tag};
pub use types::*;
pub use value::{Value, round_significant, to_number};

use parse::Parser;
use roxmltree::{Document, ParsingOptions};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbXmlError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array '{array}' has an item with non-integer index '{value}'")]
    InvalidIndex { array: String, value: String },

    #[error("Array '{array}' has an item without an index attribute")]
    MissingIndex { array: String },
}

impl PdbXmlError {
    /// True when the document itself is broken, as opposed to an I/O failure reading it.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, PdbXmlError>;

/// Whether extraction stops at the first `test` or walks every one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    #[default]
    AllTests,
    FirstTest,
}

/// Knobs shared by the record and flat extractors
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    pub tag_match: TagMatch,
    /// Namespace URI that PDBXML elements must carry. `None` matches un-namespaced elements.
    pub namespace: Option<String>,
}

impl ExtractOptions {
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(self.namespace.as_deref())
    }
}

/// Parse PDBXML text into a roxmltree document.
///
/// Instrument exports sometimes start with a byte-order mark or carry a
/// DOCTYPE, both of which are accepted.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Ok(Document::parse_with_options(xml, options)?)
}

impl Extraction {
    /// Extract every test record from PDBXML text
    pub fn parse(xml: &str, options: &ExtractOptions) -> Result<Self> {
        let doc = parse_document(xml)?;
        Parser::new(options).parse_document(&doc)
    }

    /// Extract every test record from a PDBXML file
    pub fn parse_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml, options)
    }
}
