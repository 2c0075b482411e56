//! Snapshot tests for core types

#[cfg(test)]
mod snapshot_tests {
    use crate::{format_docs, AppConfig, PromptTemplate, RetrievedDocument};
    use insta::{assert_snapshot, assert_yaml_snapshot};
    use serde_json::json;

    #[test]
    fn test_config_snapshot() {
        let text = json!({
            "qdrant_url": "http://localhost:6334",
            "qdrant_key": "test_key_redacted",
            "embedding_model_name": "sentence-transformers/all-MiniLM-L6-v2",
            "num_chunks": 4,
            "collection_name": "business_docs",
            "prompt_template": "Context {context} Question {question}"
        })
        .to_string();

        let config = AppConfig::from_json_str(&text).unwrap();

        assert_yaml_snapshot!(config, {
            ".qdrant_key" => "[qdrant_key]",
        }, @r###"
        qdrant_url: "http://localhost:6334"
        qdrant_key: "[qdrant_key]"
        embedding_model_name: sentence-transformers/all-MiniLM-L6-v2
        num_chunks: 4
        collection_name: business_docs
        prompt_template: "Context {context} Question {question}"
        content_payload_key: page_content
        "###);
    }

    #[test]
    fn test_rendered_prompt_snapshot() {
        let template = PromptTemplate::parse(
            "Use the context to answer.\n\nContext:\n{context}\n\nQuestion: {question}\nAnswer:",
        )
        .unwrap();

        let docs = vec![
            RetrievedDocument::new("Invoices are due within 30 days.").with_score(0.91),
            RetrievedDocument::new("Late payments accrue a 2% fee.").with_score(0.84),
        ];
        let context = format_docs(&docs);

        assert_snapshot!(template.render("When are invoices due?", &context), @r###"
        Use the context to answer.

        Context:
        Invoices are due within 30 days.

        Late payments accrue a 2% fee.

        Question: When are invoices due?
        Answer:
        "###);
    }
}
