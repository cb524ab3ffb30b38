use sqlx::{QueryBuilder, Sqlite};

use crate::validation::non_blank;

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'a> {
    Equals(&'static str, &'a str),
    /// Case-sensitive substring match.
    Contains(&'static str, &'a str),
    /// True when any of the columns equals the value.
    EqualsAny(&'static [&'static str], &'a str),
}

/// A conjunction of column predicates. Blank values are dropped when added,
/// so an absent search field never narrows the result.
#[derive(Debug, Default, Clone)]
pub struct Filter<'a> {
    predicates: Vec<Predicate<'a>>,
}

impl<'a> Filter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, column: &'static str, value: Option<&'a str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.predicates.push(Predicate::Equals(column, value));
        }
        self
    }

    pub fn contains(mut self, column: &'static str, value: Option<&'a str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.predicates.push(Predicate::Contains(column, value));
        }
        self
    }

    pub fn equals_any(mut self, columns: &'static [&'static str], value: Option<&'a str>) -> Self {
        if let Some(value) = non_blank(value) {
            self.predicates.push(Predicate::EqualsAny(columns, value));
        }
        self
    }

    pub fn predicates(&self) -> &[Predicate<'a>] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Appends ` WHERE ...` to the query. Values are always bound, never inlined.
    pub fn push_where(&self, qb: &mut QueryBuilder<'a, Sqlite>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });

            match *predicate {
                Predicate::Equals(column, value) => {
                    qb.push(column).push(" = ").push_bind(value);
                }
                Predicate::Contains(column, value) => {
                    qb.push("instr(")
                        .push(column)
                        .push(", ")
                        .push_bind(value)
                        .push(") > 0");
                }
                Predicate::EqualsAny(columns, value) => {
                    qb.push("(");
                    for (j, column) in columns.iter().enumerate() {
                        if j > 0 {
                            qb.push(" OR ");
                        }
                        qb.push(*column).push(" = ").push_bind(value);
                    }
                    qb.push(")");
                }
            }
        }
    }
}
