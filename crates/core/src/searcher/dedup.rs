//! Structural deduplication of search records.

use std::collections::HashSet;

use super::Record;

/// Remove exact duplicates, keeping the first occurrence of each record.
///
/// Two records are duplicates only when every field matches. Listings that
/// share an id or info hash but differ anywhere else (uploader, seeders, ...)
/// are kept as distinct records.
pub fn deduplicate_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen: HashSet<Record> = HashSet::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());

    for record in records {
        if seen.contains(&record) {
            continue;
        }
        seen.insert(record.clone());
        unique.push(record);
    }

    unique
}
