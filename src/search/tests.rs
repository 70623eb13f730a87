//! Search Module Tests
//!
//! Validates tokenization, the Elasticsearch wire formats and the in-memory index.
//!
//! ## Test Scopes
//! - **Tokenizer**: Ensures text is correctly split, normalized, and filtered.
//! - **Wire format**: NDJSON bulk bodies, `multi_match` bodies, bulk/search response parsing.
//! - **Total normalization**: Bare counts and `{value, relation}` objects yield the same integer.
//! - **Memory index**: Overwrite-by-id, scoring order and pagination.

#[cfg(test)]
mod tests {
    use crate::news::types::NewsFields;
    use crate::search::elastic::{bulk_body, parse_bulk_response, parse_search_total, search_body};
    use crate::search::gateway::{IndexAction, SearchIndex, SearchRequest, TotalHits};
    use crate::search::memory::MemorySearchIndex;
    use crate::search::tokenizer::{tokenize_query, tokenize_text};
    use serde_json::json;

    fn doc(title: &str, content: &str) -> NewsFields {
        NewsFields {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..NewsFields::default()
        }
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_text_lowercases_and_filters_short_words() {
        let tokens = tokenize_text("An Election in Rome");

        assert!(tokens.contains("election"));
        assert!(tokens.contains("rome"));
        assert!(!tokens.contains("an"));
        assert!(!tokens.contains("Election"));
    }

    #[test]
    fn test_tokenize_text_keeps_numbers_drops_punctuation() {
        let tokens = tokenize_text("Budget, 2024: approved!");

        assert!(tokens.contains("budget"));
        assert!(tokens.contains("approved"));
        assert!(tokens.contains("2024"));
        assert!(!tokens.iter().any(|t| t.contains(',') || t.contains('!')));
    }

    #[test]
    fn test_tokenize_text_handles_non_ascii_letters() {
        let tokens = tokenize_text("Bầu cử tại Zürich");

        assert!(tokens.contains("zürich"));
        assert!(tokens.contains("bầu"));
        assert!(!tokens.contains("cử"));
        assert!(!tokens.contains("rich"));
    }

    #[test]
    fn test_query_and_text_split_hyphenated_terms_alike() {
        let text = tokenize_text("covid-19 update");
        let query = tokenize_query("COVID-19");

        assert_eq!(query, vec!["covid".to_string()]);
        assert!(query.iter().all(|term| text.contains(term)));
    }

    #[test]
    fn test_tokenize_query_preserves_order_and_trims() {
        let tokens = tokenize_query("Election, results!");
        assert_eq!(tokens, vec!["election".to_string(), "results".to_string()]);
    }

    #[test]
    fn test_tokenize_query_empty() {
        assert!(tokenize_query("").is_empty());
        assert!(tokenize_query("a an").is_empty());
    }

    // ============================================================
    // WIRE FORMAT TESTS
    // ============================================================

    #[test]
    fn test_bulk_body_pairs_action_and_document_lines() {
        let actions = vec![
            IndexAction {
                id: "id-1".to_string(),
                document: doc("First", "one"),
            },
            IndexAction {
                id: "id-2".to_string(),
                document: doc("Second", "two"),
            },
        ];

        let body = bulk_body("news", &actions).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(body.ends_with('\n'));

        let header: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header, json!({"index": {"_index": "news", "_id": "id-1"}}));

        let document: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(document["title"], "First");
        assert!(document.get("sourceName").is_none());
        assert!(document.get("id").is_none());
        assert_eq!(document.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_search_body_is_multi_match() {
        let request = SearchRequest::paged("election", 2, 10);
        let body = search_body(&request);

        assert_eq!(body["from"], 10);
        assert_eq!(body["size"], 10);
        assert_eq!(body["query"]["multi_match"]["query"], "election");
        assert_eq!(
            body["query"]["multi_match"]["fields"],
            json!(["title", "content", "author", "description"])
        );
    }

    #[test]
    fn test_paged_request_treats_page_zero_as_first() {
        assert_eq!(SearchRequest::paged("x", 0, 10).from, 0);
        assert_eq!(SearchRequest::paged("x", 1, 10).from, 0);
        assert_eq!(SearchRequest::paged("x", 3, 25).from, 50);
    }

    #[test]
    fn test_paged_request_clamps_huge_offsets() {
        let request = SearchRequest::paged("x", u64::MAX, 10);

        assert_eq!(request.from, u64::MAX);
        assert_eq!(request.size, 10);
    }

    #[test]
    fn test_parse_bulk_response_with_item_error() {
        let outcome = parse_bulk_response(json!({
            "took": 3,
            "errors": true,
            "items": [
                {"index": {"_index": "news", "_id": "a", "status": 201}},
                {"index": {"_index": "news", "_id": "b", "status": 400,
                    "error": {"type": "mapper_parsing_exception", "reason": "failed to parse field"}}}
            ]
        }))
        .unwrap();

        assert!(outcome.has_errors());
        let failed: Vec<_> = outcome.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id, "b");
        assert_eq!(failed[0].error.as_deref(), Some("failed to parse field"));
    }

    #[test]
    fn test_parse_bulk_response_clean() {
        let outcome = parse_bulk_response(json!({
            "errors": false,
            "items": [{"index": {"_id": "a", "status": 200}}]
        }))
        .unwrap();

        assert!(!outcome.has_errors());
        assert_eq!(outcome.items[0].status, 200);
    }

    // ============================================================
    // TOTAL NORMALIZATION TESTS
    // ============================================================

    #[test]
    fn test_total_hits_bare_count() {
        let total = parse_search_total(json!({"hits": {"total": 42, "hits": []}})).unwrap();
        assert_eq!(total, 42);
    }

    #[test]
    fn test_total_hits_object() {
        let total = parse_search_total(json!({
            "hits": {"total": {"value": 42, "relation": "eq"}, "hits": []}
        }))
        .unwrap();
        assert_eq!(total, 42);
    }

    #[test]
    fn test_total_hits_object_without_relation() {
        let total: TotalHits = serde_json::from_value(json!({"value": 7})).unwrap();
        assert_eq!(total.value(), 7);
    }

    // ============================================================
    // MEMORY INDEX TESTS
    // ============================================================

    #[tokio::test]
    async fn test_memory_index_overwrites_by_id() {
        let index = MemorySearchIndex::new();

        index
            .bulk_index(
                "news",
                vec![IndexAction {
                    id: "a".to_string(),
                    document: doc("Old", "x"),
                }],
                true,
            )
            .await
            .unwrap();
        let outcome = index
            .bulk_index(
                "news",
                vec![IndexAction {
                    id: "a".to_string(),
                    document: doc("New", "x"),
                }],
                true,
            )
            .await
            .unwrap();

        assert_eq!(outcome.items[0].status, 200);
        assert_eq!(index.doc_count("news"), 1);
        assert_eq!(
            index.document("news", "a").unwrap().title.as_deref(),
            Some("New")
        );
    }

    #[tokio::test]
    async fn test_memory_index_ranks_by_matching_terms() {
        let index = MemorySearchIndex::new();
        index
            .bulk_index(
                "news",
                vec![
                    IndexAction {
                        id: "weak".to_string(),
                        document: doc("Election day", "Nothing else"),
                    },
                    IndexAction {
                        id: "strong".to_string(),
                        document: doc("Election results", "Final results of the election"),
                    },
                    IndexAction {
                        id: "none".to_string(),
                        document: doc("Weather", "Sunny"),
                    },
                ],
                true,
            )
            .await
            .unwrap();

        let hits = index
            .search("news", &SearchRequest::paged("election results", 1, 10))
            .await
            .unwrap();

        assert_eq!(hits.total.value(), 2);
        assert_eq!(hits.hits[0].id, "strong");
        assert_eq!(hits.hits[1].id, "weak");
    }

    #[tokio::test]
    async fn test_memory_index_paginates() {
        let index = MemorySearchIndex::new();
        let actions = (0..15)
            .map(|i| IndexAction {
                id: format!("doc-{}", i),
                document: doc("Election update", "news"),
            })
            .collect();
        index.bulk_index("news", actions, true).await.unwrap();

        let hits = index
            .search("news", &SearchRequest::paged("election", 2, 10))
            .await
            .unwrap();

        assert_eq!(hits.total.value(), 15);
        assert_eq!(hits.hits.len(), 5);
        assert_eq!(hits.hits[0].id, "doc-10");
    }

    #[tokio::test]
    async fn test_memory_index_unknown_index_is_empty() {
        let index = MemorySearchIndex::new();
        let hits = index
            .search("missing", &SearchRequest::paged("anything", 1, 10))
            .await
            .unwrap();

        assert!(hits.hits.is_empty());
        assert_eq!(hits.total.value(), 0);
    }
}
