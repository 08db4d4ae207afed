//! State for one loaded export.
//!
//! A [`Session`] owns the publications of the most recently loaded file together
//! with the views derived from them. Loading computes the new views completely
//! before anything is replaced, so a reader never sees publications from one file
//! next to views from another.
//!
//! # Example
//!
//! ```
//! use bibeval::{CountryTable, Session};
//!
//! let countries: CountryTable = [("France", "FRA")].into_iter().collect();
//! let mut session = Session::new();
//!
//! session
//!     .load_str("Title,Year,Affiliations\nPaper,2020,\"Lab, Paris, France\"", &countries)
//!     .unwrap();
//! assert_eq!(session.views().total_publications, 1);
//! assert_eq!(session.views().publications_by_country.get("FRA"), Some(1));
//! ```

use log::debug;

use crate::Publication;
use crate::aggregate::{AggregationResult, Aggregator};
use crate::country::{CountryResolver, MaybeSync};

#[cfg(feature = "csv")]
use crate::{PublicationParser, Result, ScopusParser};
#[cfg(feature = "csv")]
use std::path::Path;

/// Publications and derived views for the currently loaded export.
#[derive(Debug, Clone, Default)]
pub struct Session {
    aggregator: Aggregator,
    #[cfg(feature = "csv")]
    parser: ScopusParser,
    publications: Vec<Publication>,
    views: AggregationResult,
}

impl Session {
    /// An empty session: no publications and empty views.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    #[cfg(feature = "csv")]
    #[must_use]
    pub fn with_parser(mut self, parser: ScopusParser) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the current publications and views with those of `publications`.
    pub fn load<R>(&mut self, publications: Vec<Publication>, resolver: &R)
    where
        R: CountryResolver + MaybeSync + ?Sized,
    {
        let views = self.aggregator.aggregate(&publications, resolver);
        debug!(
            "replacing {} publications with {}",
            self.publications.len(),
            publications.len()
        );
        self.publications = publications;
        self.views = views;
    }

    /// Parses CSV text and loads it.
    ///
    /// # Errors
    ///
    /// Returns the parser's error; the session keeps its previous state.
    #[cfg(feature = "csv")]
    pub fn load_str<R>(&mut self, input: &str, resolver: &R) -> Result<()>
    where
        R: CountryResolver + MaybeSync + ?Sized,
    {
        let publications = self.parser.parse(input)?;
        self.load(publications, resolver);
        Ok(())
    }

    /// Parses a CSV file and loads it.
    ///
    /// # Errors
    ///
    /// Returns the parser's error; the session keeps its previous state.
    #[cfg(feature = "csv")]
    pub fn load_path<P, R>(&mut self, path: P, resolver: &R) -> Result<()>
    where
        P: AsRef<Path>,
        R: CountryResolver + MaybeSync + ?Sized,
    {
        let publications = self.parser.parse_path(path)?;
        self.load(publications, resolver);
        Ok(())
    }

    /// Drops all publications and views.
    pub fn clear(&mut self) {
        self.publications = Vec::new();
        self.views = AggregationResult::default();
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn views(&self) -> &AggregationResult {
        &self.views
    }

    /// Titles of the loaded publications in export order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.publications.iter().map(Publication::title)
    }
}

#[cfg(all(test, feature = "csv"))]
mod tests {
    use super::*;
    use crate::{AggregatorConfig, CountryTable};
    use pretty_assertions::assert_eq;

    const EXPORT: &str = "\
Author full names,Title,Year,Cited by,DOI,Affiliations
Smith J.; Doe A.,Paper A,2020,12,10.1/a,\"Dept X, MIT, United States\"
Smith J.,Paper B,2020,3,,\"Dept Y, Oxford, United Kingdom\"";

    fn countries() -> CountryTable {
        [("United States", "USA"), ("United Kingdom", "GBR")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.publications().is_empty());
        assert_eq!(session.views(), &AggregationResult::default());
    }

    #[test]
    fn test_load_str() {
        let mut session = Session::new();
        session.load_str(EXPORT, &countries()).unwrap();

        assert_eq!(session.publications().len(), 2);
        assert_eq!(
            session.titles().collect::<Vec<_>>(),
            vec!["Paper A", "Paper B"]
        );
        assert_eq!(session.views().total_publications, 2);
        assert_eq!(session.views().publications_by_country.max, 1);
    }

    #[test]
    fn test_load_replaces_everything() {
        let mut session = Session::new();
        session.load_str(EXPORT, &countries()).unwrap();
        session.load_str("Title,Year\nOnly,1999", &countries()).unwrap();

        assert_eq!(session.titles().collect::<Vec<_>>(), vec!["Only"]);
        assert_eq!(session.views().total_publications, 1);
        assert!(session.views().publications_by_country.entries.is_empty());
        assert!(session.views().publications_by_author.is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut session = Session::new();
        session.load_str(EXPORT, &countries()).unwrap();
        let before = session.views().clone();

        assert!(session.load_path("does/not/exist.csv", &countries()).is_err());
        assert_eq!(session.views(), &before);
        assert_eq!(session.publications().len(), 2);
    }

    #[test]
    fn test_custom_aggregator() {
        let aggregator = Aggregator::new().with_config(AggregatorConfig {
            min_citations: 1,
            ..Default::default()
        });
        let mut session = Session::new().with_aggregator(aggregator);
        session.load_str(EXPORT, &countries()).unwrap();
        assert_eq!(session.views().citations_by_publication.len(), 2);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_load_with_counting_resolver() {
        use crate::CountryCode;
        use std::cell::Cell;

        let calls = Cell::new(0);
        let resolver = |name: &str| {
            calls.set(calls.get() + 1);
            (name == "United States").then(|| CountryCode::new("USA"))
        };

        let mut session = Session::new();
        session.load_str(EXPORT, &resolver).unwrap();
        assert_eq!(session.views().publications_by_country.get("USA"), Some(1));
        assert!(calls.get() > 0);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.load_str(EXPORT, &countries()).unwrap();
        session.clear();
        assert!(session.publications().is_empty());
        assert_eq!(session.views().total_publications, 0);
    }

    #[test]
    fn test_views_serialize() {
        let mut session = Session::new();
        session.load_str(EXPORT, &countries()).unwrap();

        let json = serde_json::to_value(session.views()).unwrap();
        assert_eq!(json["publications_by_year"][0]["year"], 2020);
        assert_eq!(json["publications_by_country"]["entries"][0]["code"], "USA");
        assert_eq!(json["citations_by_publication"][0]["name"], "Paper A 10.1/a");
    }
}
