//! News Module Tests
//!
//! ## Test Scopes
//! - **Validation**: Required fields are rejected when missing or empty.
//! - **Backfill**: Defaults replace falsy values and leave real values alone.
//! - **Serialization**: camelCase field names, absent values omitted, flattened id.
//! - **Faker**: Generated records are valid and seeded generators are reproducible.

#[cfg(test)]
mod tests {
    use crate::news::faker::{FakeNewsGenerator, RecordGenerator};
    use crate::news::types::{News, NewsField, NewsFields, RecordError};
    use chrono::{TimeZone, Utc};

    fn complete_fields() -> NewsFields {
        NewsFields {
            title: Some("Budget vote delayed".to_string()),
            content: Some("Parliament postponed the vote.".to_string()),
            author: Some("Jane".to_string()),
            url: Some("https://example.com/budget".to_string()),
            url_to_image: Some("https://example.com/budget.png".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            description: Some("Short summary".to_string()),
            source_id: Some("src-1".to_string()),
            source_name: Some("Example Daily".to_string()),
        }
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_validated_accepts_complete_record() {
        let fields = complete_fields();
        assert_eq!(fields.clone().validated(), Ok(fields));
    }

    #[test]
    fn test_validated_allows_missing_optional_fields() {
        let fields = NewsFields {
            url_to_image: None,
            description: None,
            source_id: None,
            ..complete_fields()
        };
        assert!(fields.validated().is_ok());
    }

    #[test]
    fn test_validated_rejects_missing_title() {
        let fields = NewsFields {
            title: None,
            ..complete_fields()
        };
        assert_eq!(fields.validated(), Err(RecordError::MissingField("title")));
    }

    #[test]
    fn test_validated_rejects_empty_author() {
        let fields = NewsFields {
            author: Some(String::new()),
            ..complete_fields()
        };
        assert_eq!(fields.validated(), Err(RecordError::MissingField("author")));
    }

    #[test]
    fn test_validated_rejects_missing_published_at_and_source_name() {
        let fields = NewsFields {
            published_at: None,
            ..complete_fields()
        };
        assert_eq!(
            fields.validated(),
            Err(RecordError::MissingField("publishedAt"))
        );

        let fields = NewsFields {
            source_name: None,
            ..complete_fields()
        };
        assert_eq!(
            fields.validated(),
            Err(RecordError::MissingField("sourceName"))
        );
    }

    // ============================================================
    // BACKFILL TESTS
    // ============================================================

    #[test]
    fn test_backfill_replaces_every_missing_field() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let filled = NewsFields::default().backfilled(now);

        assert_eq!(filled.title.as_deref(), Some("No Title"));
        assert_eq!(filled.content.as_deref(), Some("No Content"));
        assert_eq!(filled.author.as_deref(), Some("Unknown Author"));
        assert_eq!(filled.url.as_deref(), Some(""));
        assert_eq!(filled.url_to_image.as_deref(), Some(""));
        assert_eq!(filled.published_at, Some(now));
        assert_eq!(filled.description.as_deref(), Some(""));
        assert_eq!(filled.source_id.as_deref(), Some(""));
        assert_eq!(filled.source_name.as_deref(), Some("Unknown Source"));
        assert!(filled.is_complete());
    }

    #[test]
    fn test_backfill_treats_empty_string_as_missing() {
        let now = Utc::now();
        let fields = NewsFields {
            author: Some(String::new()),
            ..complete_fields()
        };
        let filled = fields.backfilled(now);
        assert_eq!(filled.author.as_deref(), Some("Unknown Author"));
    }

    #[test]
    fn test_backfill_is_idempotent_on_complete_record() {
        let fields = complete_fields();
        let filled = fields.backfilled(Utc::now());
        assert_eq!(filled, fields);
        assert_eq!(filled.backfilled(Utc::now()), fields);
    }

    // ============================================================
    // SET / PROJECTION TESTS
    // ============================================================

    #[test]
    fn test_apply_set_keeps_fields_absent_from_update() {
        let mut stored = complete_fields();
        let update = NewsFields {
            title: Some("New title".to_string()),
            ..NewsFields::default()
        };
        stored.apply_set(&update);

        assert_eq!(stored.title.as_deref(), Some("New title"));
        assert_eq!(stored.author.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_project_clears_unlisted_fields() {
        let projected = complete_fields().project(&[NewsField::Title, NewsField::Url]);

        assert!(projected.title.is_some());
        assert!(projected.url.is_some());
        assert!(projected.content.is_none());
        assert!(projected.published_at.is_none());
    }

    // ============================================================
    // SERIALIZATION TESTS
    // ============================================================

    #[test]
    fn test_news_serializes_flat_camel_case() {
        let news = News {
            id: "abc".to_string(),
            fields: NewsFields {
                description: None,
                ..complete_fields()
            },
        };

        let json = serde_json::to_value(&news).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["urlToImage"], "https://example.com/budget.png");
        assert_eq!(json["sourceName"], "Example Daily");
        assert!(json.get("description").is_none());
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_news_fields_deserialize_missing_keys_as_none() {
        let fields: NewsFields = serde_json::from_value(serde_json::json!({
            "title": "Only a title"
        }))
        .unwrap();

        assert_eq!(fields.title.as_deref(), Some("Only a title"));
        assert!(fields.source_name.is_none());
    }

    // ============================================================
    // FAKER TESTS
    // ============================================================

    #[test]
    fn test_faker_generates_valid_records() {
        let mut generator = FakeNewsGenerator::new();
        for _ in 0..50 {
            let record = generator.generate();
            assert!(record.is_complete());
            assert!(record.validated().is_ok());
        }
    }

    #[test]
    fn test_seeded_faker_is_reproducible() {
        let mut a = FakeNewsGenerator::seeded(7);
        let mut b = FakeNewsGenerator::seeded(7);

        for _ in 0..10 {
            assert_eq!(a.generate().url, b.generate().url);
        }
    }
}
