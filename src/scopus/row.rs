//! Conversion of raw string rows into publications.
//!
//! Nothing in this module fails. Missing columns, short rows and cells that are
//! not numbers all produce empty values or `None` instead of an error, and every
//! data row yields exactly one publication.

use log::debug;

use crate::Publication;
use crate::scopus::columns::{Column, ColumnIndex};
use crate::utils::{AFFILIATION_SEPARATOR, last_segment, parse_int_prefix, split_authors};

/// Builds a publication from one data row aligned to the header that produced `index`.
pub fn parse_row<S: AsRef<str>>(index: &ColumnIndex, row: &[S]) -> Publication {
    let cell = |column| index.cell(row, column);

    Publication {
        authors: cell(Column::AuthorFullNames)
            .map(split_authors)
            .unwrap_or_default(),
        title: cell(Column::Title).unwrap_or_default().to_string(),
        year: cell(Column::Year)
            .and_then(parse_int_prefix)
            .and_then(|y| i32::try_from(y).ok()),
        cited_by: cell(Column::CitedBy)
            .and_then(parse_int_prefix)
            .and_then(|c| u64::try_from(c).ok()),
        doi: cell(Column::Doi).unwrap_or_default().to_string(),
        country: cell(Column::Affiliations)
            .map(|a| last_segment(a, AFFILIATION_SEPARATOR))
            .unwrap_or_default()
            .to_string(),
    }
}

/// Parses a header row followed by data rows, preserving row order.
///
/// With no rows at all there is no header and the result is empty.
pub fn parse_rows<R, S>(rows: &[R]) -> Vec<Publication>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let Some((header, data)) = rows.split_first() else {
        debug!("no header row, nothing to parse");
        return Vec::new();
    };

    let index = ColumnIndex::locate(header.as_ref());
    let publications: Vec<_> = data
        .iter()
        .map(|row| parse_row(&index, row.as_ref()))
        .collect();

    debug!("parsed {} publications", publications.len());
    publications
}
