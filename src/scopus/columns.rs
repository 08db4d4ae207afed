//! Recognized export columns and their positions in a header row.
//!
//! Column names are matched exactly, including case, against the headers written
//! by Scopus CSV exports.

use log::warn;

/// Columns the row parser reads. Every other column is ignored.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum Column {
    /// `Author full names` - authors separated by `"; "`
    AuthorFullNames,
    /// `Title`
    Title,
    /// `Year` - publication year
    Year,
    /// `Cited by` - citation count
    CitedBy,
    /// `DOI`
    Doi,
    /// `Affiliations` - comma separated, last segment is the country
    Affiliations,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::AuthorFullNames,
        Column::Title,
        Column::Year,
        Column::CitedBy,
        Column::Doi,
        Column::Affiliations,
    ];

    /// Look up a column by its exact header name.
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "Author full names" => Some(Column::AuthorFullNames),
            "Title" => Some(Column::Title),
            "Year" => Some(Column::Year),
            "Cited by" => Some(Column::CitedBy),
            "DOI" => Some(Column::Doi),
            "Affiliations" => Some(Column::Affiliations),
            _ => None,
        }
    }

    /// The header name as it appears in an export.
    pub fn as_header(&self) -> &'static str {
        match self {
            Column::AuthorFullNames => "Author full names",
            Column::Title => "Title",
            Column::Year => "Year",
            Column::CitedBy => "Cited by",
            Column::Doi => "DOI",
            Column::Affiliations => "Affiliations",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Positions of the recognized columns within one header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [Option<usize>; Column::ALL.len()],
}

impl ColumnIndex {
    /// Locates every recognized column in `header`.
    ///
    /// The first matching header wins. A leading byte order mark on the first cell
    /// is ignored. Missing columns are logged and left unresolved; they never make
    /// the parse fail.
    pub fn locate<S: AsRef<str>>(header: &[S]) -> Self {
        let mut index = Self::default();

        for (position, name) in header.iter().enumerate() {
            let name = name.as_ref();
            let name = if position == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            if let Some(column) = Column::from_header(name) {
                index.positions[column.slot()].get_or_insert(position);
            }
        }

        for column in index.missing() {
            warn!("column '{}' not found in header", column.as_header());
        }

        index
    }

    /// Position of `column` in the header, or `None` if it was not found.
    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column.slot()]
    }

    /// Columns that were not found in the header.
    pub fn missing(&self) -> impl Iterator<Item = Column> + '_ {
        Column::ALL
            .into_iter()
            .filter(|column| self.position(*column).is_none())
    }

    /// Returns the cell of `row` under `column`, if both exist.
    pub(crate) fn cell<'r, S: AsRef<str>>(&self, row: &'r [S], column: Column) -> Option<&'r str> {
        self.position(column)
            .and_then(|i| row.get(i))
            .map(|cell| cell.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("Author full names", Some(Column::AuthorFullNames))]
    #[case("Title", Some(Column::Title))]
    #[case("Year", Some(Column::Year))]
    #[case("Cited by", Some(Column::CitedBy))]
    #[case("DOI", Some(Column::Doi))]
    #[case("Affiliations", Some(Column::Affiliations))]
    #[case("title", None)]
    #[case("Authors", None)]
    #[case("Cited By", None)]
    fn test_from_header(#[case] header: &str, #[case] expected: Option<Column>) {
        assert_eq!(Column::from_header(header), expected);
    }

    #[test]
    fn test_header_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.as_header()), Some(column));
        }
    }

    #[test]
    fn test_locate_all_columns() {
        let header = [
            "Authors",
            "Author full names",
            "Title",
            "Year",
            "Source title",
            "Cited by",
            "DOI",
            "Affiliations",
        ];
        let index = ColumnIndex::locate(&header);
        assert_eq!(index.position(Column::AuthorFullNames), Some(1));
        assert_eq!(index.position(Column::Title), Some(2));
        assert_eq!(index.position(Column::Year), Some(3));
        assert_eq!(index.position(Column::CitedBy), Some(5));
        assert_eq!(index.position(Column::Doi), Some(6));
        assert_eq!(index.position(Column::Affiliations), Some(7));
        assert_eq!(index.missing().count(), 0);
    }

    #[test]
    fn test_locate_missing_columns() {
        let index = ColumnIndex::locate(&["Title", "Year"]);
        assert_eq!(index.position(Column::Title), Some(0));
        assert_eq!(index.position(Column::Doi), None);
        assert_eq!(
            index.missing().collect::<Vec<_>>(),
            vec![
                Column::AuthorFullNames,
                Column::CitedBy,
                Column::Doi,
                Column::Affiliations
            ]
        );
    }

    #[test]
    fn test_locate_first_duplicate_wins() {
        let index = ColumnIndex::locate(&["Title", "Title"]);
        assert_eq!(index.position(Column::Title), Some(0));
    }

    #[test]
    fn test_locate_ignores_byte_order_mark() {
        let index = ColumnIndex::locate(&["\u{feff}Author full names", "Title"]);
        assert_eq!(index.position(Column::AuthorFullNames), Some(0));
    }

    #[test]
    fn test_cell_out_of_range() {
        let index = ColumnIndex::locate(&["Title", "DOI"]);
        let row = ["Only a title"];
        assert_eq!(index.cell(&row, Column::Title), Some("Only a title"));
        assert_eq!(index.cell(&row, Column::Doi), None);
        assert_eq!(index.cell(&row, Column::Year), None);
    }
}
