//! Marks schemas that define a query root.

use std::ops::AddAssign;

use serde::Serialize;

use crate::record::RepoRecord;

/// Whether `content` defines a query root type.
///
/// `None` when there is no content or it does not parse.
#[must_use]
pub fn contains_query_type(content: Option<&str>) -> Option<bool> {
    let content = content?;
    match graphql_syntax::parse(content) {
        Ok(doc) => Some(doc.contains_query_type()),
        Err(error) => {
            tracing::trace!(%error, "Schema content does not parse");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifySummary {
    pub with_query_type: usize,
    pub without_query_type: usize,
    pub unparseable: usize,
}

impl AddAssign for ClassifySummary {
    fn add_assign(&mut self, other: Self) {
        self.with_query_type += other.with_query_type;
        self.without_query_type += other.without_query_type;
        self.unparseable += other.unparseable;
    }
}

/// Set `containsQueryType` on every schema of `record`.
#[tracing::instrument(skip_all, fields(repo = record.name()))]
pub fn classify_record(record: &mut RepoRecord) -> ClassifySummary {
    let mut summary = ClassifySummary::default();

    for schema in &mut record.schemas {
        let contains = contains_query_type(schema.content.as_deref());
        match contains {
            Some(true) => summary.with_query_type += 1,
            Some(false) => summary.without_query_type += 1,
            None => summary.unparseable += 1,
        }
        schema.contains_query_type = Some(contains);
    }

    tracing::debug!(?summary, "Classified record");
    summary
}
