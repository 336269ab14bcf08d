//! Merge logic for combining fresh frontmatter with a note's existing frontmatter

use super::value::{MetadataRecord, MetadataValue};

/// How a single field is resolved when both records may hold it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// The fresh value replaces whatever the note has
    FreshWins,
    /// Space-separated tags in the note are unioned with the fresh tag list
    TagUnion,
    /// Resolved like `ExistingUnlessEmpty`, then coerced to an integer
    Integer,
    /// The note's value is kept unless it is empty
    ExistingUnlessEmpty,
}

/// Fields that do not use the existing-unless-empty rule
pub const FIELD_STRATEGIES: &[(&str, MergeStrategy)] = &[
    ("shelf", MergeStrategy::FreshWins),
    ("tags", MergeStrategy::TagUnion),
    ("rating", MergeStrategy::Integer),
];

/// Look up the strategy for a field name
pub fn strategy_for(key: &str) -> MergeStrategy {
    FIELD_STRATEGIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, strategy)| *strategy)
        .unwrap_or(MergeStrategy::ExistingUnlessEmpty)
}

impl MergeStrategy {
    /// Resolve one field. `None` means the record does not have the key.
    pub fn apply(
        self,
        fresh: Option<&MetadataValue>,
        existing: Option<&MetadataValue>,
    ) -> MetadataValue {
        match self {
            MergeStrategy::FreshWins => fresh.or(existing).cloned().unwrap_or(MetadataValue::Null),
            MergeStrategy::TagUnion => match (fresh, existing) {
                (Some(MetadataValue::List(fresh)), Some(MetadataValue::Text(existing))) => {
                    MetadataValue::List(union_tags(existing, fresh))
                }
                _ => MergeStrategy::ExistingUnlessEmpty.apply(fresh, existing),
            },
            MergeStrategy::Integer => {
                // An unreadable note value falls back to the fresh one
                match MergeStrategy::ExistingUnlessEmpty
                    .apply(fresh, existing)
                    .coerce_integer()
                    .or_else(|| fresh.and_then(MetadataValue::coerce_integer))
                {
                    Some(n) => MetadataValue::Integer(n),
                    None => MetadataValue::Null,
                }
            }
            MergeStrategy::ExistingUnlessEmpty => match existing {
                Some(value) if !value.is_empty() => value.clone(),
                _ => fresh.or(existing).cloned().unwrap_or(MetadataValue::Null),
            },
        }
    }
}

fn union_tags(existing: &str, fresh: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in existing
        .split_whitespace()
        .chain(fresh.iter().map(String::as_str))
    {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Merge freshly computed frontmatter into a note's existing frontmatter.
///
/// The note's values win unless they are empty, so manual edits survive
/// repeated syncs while blank fields still get filled in. `shelf`, `tags`
/// and `rating` follow [`FIELD_STRATEGIES`] instead. The result lists the
/// fresh keys first, then keys only the note has.
pub fn merge_metadata(fresh: &MetadataRecord, existing: &MetadataRecord) -> MetadataRecord {
    let mut merged = MetadataRecord::new();

    for (key, fresh_value) in fresh.iter() {
        let value = strategy_for(key).apply(Some(fresh_value), existing.get(key));
        merged.insert(key, value);
    }

    for key in existing.keys().filter(|key| !fresh.contains_key(key)) {
        merged.insert(key, strategy_for(key).apply(None, existing.get(key)));
    }

    merged
}
