use std::{fmt, sync::Arc};

use crate::rules::Predicate;

/// A predicate plus what a reader needs to understand its violations.
///
/// Rules are immutable once built and cheap to clone; the predicate is shared.
#[derive(Clone)]
pub struct Rule {
    predicate: Arc<dyn Predicate>,
    description: String,
    columns: Option<Vec<String>>,
}

impl Rule {
    pub fn new<P>(predicate: P, description: impl Into<String>) -> Self
    where
        P: Predicate + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            description: description.into(),
            columns: None,
        }
    }

    /// Restrict reported violating rows to these columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn predicate(&self) -> &dyn Predicate {
        self.predicate.as_ref()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("predicate", &self.predicate.name())
            .field("description", &self.description)
            .field("columns", &self.columns)
            .finish()
    }
}
