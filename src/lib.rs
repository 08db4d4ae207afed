//! Parse bibliographic exports and derive the statistics behind bibliometric charts.
//!
//! `bibeval` turns a Scopus-style CSV export into a list of [`Publication`]s and
//! aggregates them into six views that a rendering layer can plot directly.
//!
//! # Key Features
//!
//! - **Tolerant Parsing**: missing columns, short rows and non-numeric cells never
//!   abort a load; they degrade to empty values or a "not a number" sentinel.
//!
//! - **Six Derived Views**:
//!   - Publications by year
//!   - Publications and citations by country (with the running maximum)
//!   - Top-10 authors by publications and by citations
//!   - Citations per publication (minimum 10 citations)
//!
//! - **Pluggable Country Lookup**: any [`CountryResolver`] (including a closure)
//!   maps free-text country names to canonical codes.
//!
//! # Basic Usage
//!
//! ```rust
//! use bibeval::{Aggregator, CountryCode, CountryTable, PublicationParser, ScopusParser};
//!
//! let input = "Author full names,Title,Year,Cited by,DOI,Affiliations
//! Smith J.; Doe A.,Paper A,2020,12,10.1/a,\"Dept X, MIT, United States\"";
//!
//! let publications = ScopusParser::new().parse(input).unwrap();
//! let countries: CountryTable = [("United States", "USA")].into_iter().collect();
//!
//! let views = Aggregator::new().aggregate(&publications, &countries);
//! assert_eq!(views.total_publications, 1);
//! assert_eq!(views.publications_by_country.entries[0].code, CountryCode::new("USA"));
//! ```
//!
//! # Working With Pre-Split Rows
//!
//! The row parser does not depend on the CSV front end, so rows obtained some other
//! way can be fed in directly:
//!
//! ```rust
//! use bibeval::parse_rows;
//!
//! let rows = vec![
//!     vec!["Title", "Year"],
//!     vec!["Paper A", "n/a"],
//! ];
//! let publications = parse_rows(&rows);
//! assert_eq!(publications[0].year(), None);
//! ```
//!
//! # Error Handling
//!
//! Parsing rows and aggregating them cannot fail. Only reading CSV text or files
//! returns [`Result`], wrapping [`BibevalError`]:
//!
//! ```rust
//! use bibeval::{BibevalError, ScopusParser};
//!
//! match ScopusParser::new().parse_path("missing.csv") {
//!     Ok(publications) => println!("Parsed {} publications", publications.len()),
//!     Err(BibevalError::Io(e)) => eprintln!("Could not read file: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregate;
pub mod country;
pub mod scopus;
pub mod session;
mod utils;

// Reexports
pub use aggregate::{AggregationResult, Aggregator, AggregatorConfig};
pub use country::{CountryCode, CountryResolver, CountryTable, MaybeSync};
pub use scopus::{Column, ColumnIndex, parse_row, parse_rows};
#[cfg(feature = "csv")]
pub use scopus::{ScopusConfig, ScopusParser};
pub use session::Session;

/// A specialized Result type for loading bibliographic exports.
pub type Result<T> = std::result::Result<T, BibevalError>;

/// Errors raised while acquiring input rows.
///
/// The row parser and the aggregator never fail; these variants only come from
/// reading files and decoding CSV text.
#[derive(Error, Debug)]
pub enum BibevalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {message} at line {line}")]
    Csv { message: String, line: u64 },
}

#[cfg(feature = "csv")]
impl From<csv::Error> for BibevalError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or_default();
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => BibevalError::Io(e),
            _ => BibevalError::Csv { message, line },
        }
    }
}

/// One parsed bibliographic record.
///
/// Built once from a single input row and never mutated afterwards. Numeric
/// fields that failed to parse are `None`, which aggregation treats as a
/// "not a number" value distinct from any real year or count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    authors: Vec<String>,
    title: String,
    year: Option<i32>,
    cited_by: Option<u64>,
    doi: String,
    country: String,
}

impl Publication {
    /// Creates a publication from already-typed values.
    pub fn new(
        authors: Vec<String>,
        title: impl Into<String>,
        year: Option<i32>,
        cited_by: Option<u64>,
        doi: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            authors,
            title: title.into(),
            year,
            cited_by,
            doi: doi.into(),
            country: country.into(),
        }
    }

    /// Author full names in export order. May contain empty names.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Authors that count towards author views.
    pub fn named_authors(&self) -> impl Iterator<Item = &str> {
        self.authors
            .iter()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication year, `None` when the cell was missing or not numeric.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Citation count, `None` when the cell was missing or not numeric.
    pub fn cited_by(&self) -> Option<u64> {
        self.cited_by
    }

    pub fn doi(&self) -> &str {
        &self.doi
    }

    /// Free-text country taken from the last affiliation segment.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Label used in the citations-per-publication view: the title, followed by
    /// the DOI when there is one.
    pub fn display_name(&self) -> String {
        if self.doi.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.doi)
        }
    }
}

/// Trait for implementing publication parsers.
pub trait PublicationParser {
    /// Parse a string containing a header row followed by data rows.
    ///
    /// # Errors
    ///
    /// Returns `BibevalError` if the input cannot be decoded into rows at all.
    /// Malformed fields inside well-formed rows are never an error.
    fn parse(&self, input: &str) -> Result<Vec<Publication>>;
}
