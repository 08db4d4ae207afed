//! Aggregation of publications into chart-ready views.
//!
//! Each view is a pure function over the full publication list; none of them
//! share state, so they can be computed in any order (or concurrently) and
//! always give the same result for the same input.
//!
//! ## Views
//!
//! 1. Publications by year, in the order each year first appears
//! 2. Publications by country, with the largest bucket
//! 3. Top authors by publication count, smallest first
//! 4. Citations by country, with the largest bucket
//! 5. Top authors by citation count, smallest first
//! 6. Citations per publication above a threshold, largest first
//!
//! ## Usage
//!
//! ```rust
//! use bibeval::{Aggregator, AggregatorConfig, CountryCode, Publication};
//!
//! let publications = vec![
//!     Publication::new(vec!["Smith J.".into()], "Paper A", Some(2020), Some(12), "", "France"),
//!     Publication::new(vec!["Smith J.".into()], "Paper B", Some(2021), Some(3), "", "Atlantis"),
//! ];
//! let resolver = |name: &str| (name == "France").then(|| CountryCode::new("FRA"));
//!
//! let config = AggregatorConfig {
//!     min_citations: 5,
//!     ..Default::default()
//! };
//! let views = Aggregator::new().with_config(config).aggregate(&publications, &resolver);
//!
//! assert_eq!(views.publications_by_country.max, 1);
//! assert_eq!(views.publications_by_author[0].value, 2);
//! assert_eq!(views.citations_by_publication.len(), 1);
//! ```
//!
//! ## Numeric edge cases
//!
//! A publication without a parseable year forms its own `None` bucket in the
//! year view. A publication without a parseable citation count adds nothing to
//! citation sums and never appears in the citations-per-publication view.

mod tally;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::Publication;
use crate::country::{CountryCode, CountryResolver, MaybeSync};
use tally::Tally;

/// Number of authors kept in each author ranking by default.
pub const DEFAULT_TOP_AUTHORS: usize = 10;

/// Minimum citation count for the citations-per-publication view by default.
pub const DEFAULT_MIN_CITATIONS: u64 = 10;

/// Publication count for one year. `year` is `None` for unparseable years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: Option<i32>,
    pub count: u64,
}

/// Accumulated value for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryValue {
    pub code: CountryCode,
    pub value: u64,
}

/// A country-keyed view plus its largest value, used as the upper bound of a
/// choropleth color scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryView {
    pub entries: Vec<CountryValue>,
    pub max: u64,
}

impl CountryView {
    fn from_tally(tally: Tally<CountryCode>) -> Self {
        let max = tally.max();
        let entries = tally
            .into_entries()
            .into_iter()
            .map(|(code, value)| CountryValue { code, value })
            .collect();
        Self { entries, max }
    }

    /// Value for `code`, if any publication resolved to it.
    pub fn get(&self, code: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.code.as_str() == code)
            .map(|e| e.value)
    }
}

/// Accumulated value for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorValue {
    pub author: String,
    pub value: u64,
}

/// Citation count of a single publication, labelled by title and DOI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationCitations {
    pub name: String,
    pub citations: u64,
}

/// All six views computed from one publication list.
///
/// A result is always built whole; callers replace it rather than patching it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_publications: usize,
    pub publications_by_year: Vec<YearCount>,
    pub publications_by_country: CountryView,
    pub publications_by_author: Vec<AuthorValue>,
    pub citations_by_country: CountryView,
    pub citations_by_author: Vec<AuthorValue>,
    pub citations_by_publication: Vec<PublicationCitations>,
}

/// Configuration options for the aggregator.
///
/// # Examples
///
/// ```
/// use bibeval::AggregatorConfig;
///
/// let config = AggregatorConfig {
///     top_authors: 5,
///     min_citations: 25,
///     run_in_parallel: false,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// How many authors each author ranking keeps.
    pub top_authors: usize,
    /// Publications with fewer citations are left out of the citations-per-publication view.
    pub min_citations: u64,
    /// Compute the views concurrently. Only has an effect with the `parallel` feature.
    pub run_in_parallel: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            top_authors: DEFAULT_TOP_AUTHORS,
            min_citations: DEFAULT_MIN_CITATIONS,
            run_in_parallel: false,
        }
    }
}

/// Computes every view for a publication list.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds all six views from `publications`.
    ///
    /// Country names are mapped to codes through `resolver`; publications whose
    /// country does not resolve only drop out of the two country views.
    ///
    /// With the `parallel` feature the resolver must also be `Sync`.
    pub fn aggregate<R>(&self, publications: &[Publication], resolver: &R) -> AggregationResult
    where
        R: CountryResolver + MaybeSync + ?Sized,
    {
        debug!("aggregating {} publications", publications.len());

        #[cfg(feature = "parallel")]
        if self.config.run_in_parallel {
            return self.aggregate_parallel(publications, resolver);
        }

        let top = self.config.top_authors;
        AggregationResult {
            total_publications: publications.len(),
            publications_by_year: publications_by_year(publications),
            publications_by_country: publications_by_country(publications, resolver),
            publications_by_author: publications_by_author(publications, top),
            citations_by_country: citations_by_country(publications, resolver),
            citations_by_author: citations_by_author(publications, top),
            citations_by_publication: citations_by_publication(
                publications,
                self.config.min_citations,
            ),
        }
    }

    #[cfg(feature = "parallel")]
    fn aggregate_parallel<R>(
        &self,
        publications: &[Publication],
        resolver: &R,
    ) -> AggregationResult
    where
        R: CountryResolver + Sync + ?Sized,
    {
        use rayon::join;

        let top = self.config.top_authors;
        let min = self.config.min_citations;
        let (
            (by_year, (pubs_by_country, cites_by_country)),
            ((pubs_by_author, cites_by_author), by_publication),
        ) = join(
            || {
                join(
                    || publications_by_year(publications),
                    || {
                        join(
                            || publications_by_country(publications, resolver),
                            || citations_by_country(publications, resolver),
                        )
                    },
                )
            },
            || {
                join(
                    || {
                        join(
                            || publications_by_author(publications, top),
                            || citations_by_author(publications, top),
                        )
                    },
                    || citations_by_publication(publications, min),
                )
            },
        );

        AggregationResult {
            total_publications: publications.len(),
            publications_by_year: by_year,
            publications_by_country: pubs_by_country,
            publications_by_author: pubs_by_author,
            citations_by_country: cites_by_country,
            citations_by_author: cites_by_author,
            citations_by_publication: by_publication,
        }
    }
}

/// Counts publications per year in first-appearance order.
///
/// Unparseable years are grouped together under `None`.
pub fn publications_by_year(publications: &[Publication]) -> Vec<YearCount> {
    let mut tally: Tally<Option<i32>> = Tally::default();
    for publication in publications {
        tally.add(&publication.year(), 1);
    }
    tally
        .into_entries()
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Counts publications per resolved country.
pub fn publications_by_country<R>(publications: &[Publication], resolver: &R) -> CountryView
where
    R: CountryResolver + ?Sized,
{
    country_view(publications, resolver, |_| 1)
}

/// Sums citations per resolved country.
pub fn citations_by_country<R>(publications: &[Publication], resolver: &R) -> CountryView
where
    R: CountryResolver + ?Sized,
{
    country_view(publications, resolver, citation_weight)
}

/// Ranks the `top` authors with the most publications, smallest first.
///
/// A publication counts once for each of its named authors.
pub fn publications_by_author(publications: &[Publication], top: usize) -> Vec<AuthorValue> {
    author_ranking(publications, top, |_| 1)
}

/// Ranks the `top` authors with the most citations, smallest first.
///
/// Each named author of a publication receives its full citation count.
pub fn citations_by_author(publications: &[Publication], top: usize) -> Vec<AuthorValue> {
    author_ranking(publications, top, citation_weight)
}

/// Lists publications with at least `min_citations` citations, most cited first.
///
/// Equal citation counts keep their input order. Publications with the same title
/// are listed separately.
pub fn citations_by_publication(
    publications: &[Publication],
    min_citations: u64,
) -> Vec<PublicationCitations> {
    let mut cited: Vec<_> = publications
        .iter()
        .filter_map(|p| {
            p.cited_by()
                .filter(|&citations| citations >= min_citations)
                .map(|citations| PublicationCitations {
                    name: p.display_name(),
                    citations,
                })
        })
        .collect();
    cited.sort_by(|a, b| b.citations.cmp(&a.citations));
    cited
}

fn citation_weight(publication: &Publication) -> u64 {
    publication.cited_by().unwrap_or(0)
}

fn country_view<R, W>(publications: &[Publication], resolver: &R, weight: W) -> CountryView
where
    R: CountryResolver + ?Sized,
    W: Fn(&Publication) -> u64,
{
    let mut tally: Tally<CountryCode> = Tally::default();
    for publication in publications {
        match resolver.resolve(publication.country()) {
            Some(code) => tally.add(&code, weight(publication)),
            None => trace!("country '{}' not resolved", publication.country()),
        }
    }
    CountryView::from_tally(tally)
}

fn author_ranking<W>(publications: &[Publication], top: usize, weight: W) -> Vec<AuthorValue>
where
    W: Fn(&Publication) -> u64,
{
    let mut tally: Tally<String> = Tally::default();
    for publication in publications {
        let amount = weight(publication);
        for author in publication.named_authors() {
            tally.add(author, amount);
        }
    }
    tally
        .top_ascending(top)
        .into_iter()
        .map(|(author, value)| AuthorValue { author, value })
        .collect()
}
