//! Deterministic point identity helpers.
//!
//! Qdrant accepts only integers or UUIDs as point ids, while document chunks
//! are identified by `{filename}_{index}` strings. The original string id is
//! mapped to a UUIDv5 for the point id and kept verbatim in the payload.

use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

/// Recovers the source filename from a `{filename}_{index}` chunk id.
///
/// Filenames may themselves contain underscores; the index is always the
/// part after the last one.
pub(crate) fn source_of(chunk_id: &str) -> &str {
    chunk_id
        .rsplit_once('_')
        .map(|(source, _)| source)
        .unwrap_or(chunk_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_uuid_is_deterministic() {
        assert_eq!(stable_uuid("faq.txt_0"), stable_uuid("faq.txt_0"));
        assert_ne!(stable_uuid("faq.txt_0"), stable_uuid("faq.txt_1"));
    }

    #[test]
    fn source_is_everything_before_the_last_underscore() {
        assert_eq!(source_of("faq.txt_0"), "faq.txt");
        assert_eq!(source_of("exam_schedule.txt_12"), "exam_schedule.txt");
        assert_eq!(source_of("no-index"), "no-index");
    }
}
