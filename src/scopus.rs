//! Scopus CSV export parser.
//!
//! The export's first row names the columns; every following row is one
//! publication. Only six columns are read (see [`Column`]), everything else in
//! the export is ignored.
//!
//! # Example
//!
//! ```
//! use bibeval::{PublicationParser, ScopusParser};
//!
//! let input = "Title,Year,Cited by\nExample Paper,2023,15\nAnother Paper,n/a,";
//!
//! let parser = ScopusParser::new();
//! let publications = parser.parse(input).unwrap();
//! assert_eq!(publications[0].title(), "Example Paper");
//! assert_eq!(publications[1].year(), None);
//! ```

mod columns;
mod row;

pub use columns::{Column, ColumnIndex};
pub use row::{parse_row, parse_rows};

#[cfg(feature = "csv")]
pub use reader::{ScopusConfig, ScopusParser};

#[cfg(feature = "csv")]
mod reader {
    use csv::ReaderBuilder;
    use log::debug;
    use std::fs::File;
    use std::io;
    use std::path::Path;

    use super::{ColumnIndex, parse_row};
    use crate::{Publication, PublicationParser, Result};

    /// Configuration for reading CSV exports.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibeval::ScopusConfig;
    ///
    /// let mut config = ScopusConfig::new();
    /// config.set_delimiter(b';').set_flexible(false);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ScopusConfig {
        /// Field delimiter
        delimiter: u8,
        /// Whether rows may have a different number of cells than the header
        flexible: bool,
    }

    impl Default for ScopusConfig {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ScopusConfig {
        /// Comma delimited, flexible row lengths.
        #[must_use]
        pub fn new() -> Self {
            Self {
                delimiter: b',',
                flexible: true,
            }
        }

        pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
            self.delimiter = delimiter;
            self
        }

        /// When `false`, a row whose cell count differs from the header is a CSV error.
        pub fn set_flexible(&mut self, flexible: bool) -> &mut Self {
            self.flexible = flexible;
            self
        }

        fn reader_builder(&self) -> ReaderBuilder {
            let mut builder = ReaderBuilder::new();
            builder
                .delimiter(self.delimiter)
                .flexible(self.flexible)
                .has_headers(false);
            builder
        }
    }

    /// Parser for Scopus CSV exports.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibeval::{ScopusConfig, ScopusParser};
    ///
    /// let mut config = ScopusConfig::new();
    /// config.set_delimiter(b'\t');
    ///
    /// let parser = ScopusParser::new().with_config(config);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct ScopusParser {
        config: ScopusConfig,
    }

    impl ScopusParser {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_config(mut self, config: ScopusConfig) -> Self {
            self.config = config;
            self
        }

        /// Parses an export from any reader.
        ///
        /// Blank lines are always skipped, including any before the header.
        ///
        /// # Errors
        ///
        /// Returns `BibevalError` if reading fails or the text is not valid CSV
        /// (for example invalid UTF-8, or unequal row lengths when not flexible).
        pub fn parse_reader<R: io::Read>(&self, rdr: R) -> Result<Vec<Publication>> {
            let mut reader = self.config.reader_builder().from_reader(rdr);
            let mut records = reader.records();

            let Some(header) = records.next().transpose()? else {
                debug!("export has no header row");
                return Ok(Vec::new());
            };
            let header: Vec<&str> = header.iter().collect();
            let index = ColumnIndex::locate(&header);

            let mut publications = Vec::new();
            for result in records {
                let record = result?;
                let cells: Vec<&str> = record.iter().collect();
                publications.push(parse_row(&index, &cells));
            }

            debug!("parsed {} publications from export", publications.len());
            Ok(publications)
        }

        /// Parses an export file.
        ///
        /// # Errors
        ///
        /// Returns `BibevalError::Io` if the file cannot be opened, or any error
        /// from [`ScopusParser::parse_reader`].
        pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Publication>> {
            let path = path.as_ref();
            debug!("reading export from {}", path.display());
            self.parse_reader(File::open(path)?)
        }
    }

    impl PublicationParser for ScopusParser {
        fn parse(&self, input: &str) -> Result<Vec<Publication>> {
            self.parse_reader(input.as_bytes())
        }
    }

}
