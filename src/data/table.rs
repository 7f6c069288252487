use std::slice::Iter;

/// Header positions of a CSV file, used to resolve columns whose name is
/// not consistent across producers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderIndex {
    headers: Vec<String>,
}

impl HeaderIndex {
    pub fn new<I, S>(headers: I) -> HeaderIndex
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HeaderIndex {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of the first candidate present in the header row.
    ///
    /// Candidates are tried in order, so the list encodes which producer's
    /// naming wins when a file carries more than one of them.
    pub fn first_position(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|name| self.position(name))
    }

    /// Name of the first candidate present in the header row.
    pub fn first_present<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|name| self.position(name).is_some())
    }
}

/// Rows of one loaded source together with the header row they came from.
///
/// Tables are never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    headers: HeaderIndex,
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Table::empty()
    }
}

impl<R> Table<R> {
    pub fn new(headers: HeaderIndex, rows: Vec<R>) -> Table<R> {
        Table { headers, rows }
    }

    /// Zero rows and no columns: the "data unavailable" table.
    pub fn empty() -> Table<R> {
        Table {
            headers: HeaderIndex::default(),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &HeaderIndex {
        &self.headers
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> Iter<'_, R> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.position(name).is_some()
    }

    pub fn has_any_column(&self, candidates: &[&str]) -> bool {
        self.headers.first_position(candidates).is_some()
    }

    pub fn first_present<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        self.headers.first_present(candidates)
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
