//! Query specifications.
//!
//! A [`Query`] is a plain value describing which rows of a table to return
//! and in which order. It is built up by consuming builder methods and
//! evaluated by [`crate::client::DbClient::select`] against a snapshot of
//! the table. Evaluation always runs in the same order, no matter in which
//! order the builder methods were called: equality filters, text searches,
//! then orders.

use crate::record::{Record, Value};
use std::cmp::Ordering;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Filter<Column> {
    pub column: Column,
    pub value: Value,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct TextSearch<Column> {
    pub column: Column,
    /// Lowercased, never empty.
    terms: Vec<String>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Order<Column> {
    pub column: Column,
    pub direction: Direction,
}

#[derive(Clone, Debug)]
pub struct Query<R: Record> {
    filters: Vec<Filter<R::Column>>,
    searches: Vec<TextSearch<R::Column>>,
    orders: Vec<Order<R::Column>>,
}

impl<R: Record> Default for Query<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            searches: Vec::new(),
            orders: Vec::new(),
        }
    }
}

impl<R: Record> Query<R> {
    /// A query returning every row of the table in table order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps rows whose `column` strictly equals `value`.
    #[must_use]
    pub fn eq(mut self, column: R::Column, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column,
            value: value.into(),
        });
        self
    }

    /// Keeps rows where every whitespace separated term of `query` occurs,
    /// ignoring case, in `column` or in the table's title column.
    ///
    /// A query without any terms leaves the query unchanged.
    #[must_use]
    pub fn text_search(mut self, column: R::Column, query: &str) -> Self {
        if let Some(search) = TextSearch::new(column, query) {
            self.searches.push(search);
        }
        self
    }

    /// Sorts by `column` read as a timestamp. The sort is stable and orders
    /// are applied in the sequence they were added.
    #[must_use]
    pub fn order(mut self, column: R::Column, direction: Direction) -> Self {
        self.orders.push(Order { column, direction });
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter<R::Column>] {
        &self.filters
    }

    #[must_use]
    pub fn orders(&self) -> &[Order<R::Column>] {
        &self.orders
    }

    /// Narrows `rows` down to the working set described by this query.
    #[must_use]
    pub fn evaluate(&self, rows: Vec<R>) -> Vec<R> {
        let mut rows: Vec<R> = rows.into_iter().filter(|row| self.matches(row)).collect();

        for order in &self.orders {
            rows.sort_by(|a, b| order.compare(a, b));
        }

        rows
    }

    /// The first row of the working set, if any.
    #[must_use]
    pub fn evaluate_single(&self, rows: Vec<R>) -> Option<R> {
        self.evaluate(rows).into_iter().next()
    }

    fn matches(&self, row: &R) -> bool {
        self.filters
            .iter()
            .all(|filter| row.field(filter.column).matches(&filter.value))
            && self.searches.iter().all(|search| search.matches(row))
    }
}

impl<Column> TextSearch<Column> {
    fn new(column: Column, query: &str) -> Option<Self> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        (!terms.is_empty()).then_some(Self { column, terms })
    }

    fn matches<R>(&self, row: &R) -> bool
    where
        R: Record<Column = Column>,
        Column: Copy,
    {
        let text = row.field(self.column).as_text().to_lowercase();
        let title = R::TITLE_COLUMN.map(|column| row.field(column).as_text().to_lowercase());

        self.terms.iter().all(|term| {
            text.contains(term.as_str())
                || title
                    .as_deref()
                    .is_some_and(|title| title.contains(term.as_str()))
        })
    }
}

impl<Column: Copy> Order<Column> {
    /// Values that are not timestamps sort before every timestamp.
    fn compare<R>(&self, a: &R, b: &R) -> Ordering
    where
        R: Record<Column = Column>,
    {
        let key = |row: &R| -> Option<OffsetDateTime> { row.field(self.column).as_timestamp() };
        let ordering = key(a).cmp(&key(b));

        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}
