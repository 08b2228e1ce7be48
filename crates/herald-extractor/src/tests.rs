//! End-to-end tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{normalize, ExtractorConfig, ExtractorError, Outcome, ProductExtractor};
    use herald_domain::traits::LlmProvider;
    use herald_llm::MockProvider;
    use std::future::Future;
    use std::time::Duration;

    const FILING: &str = "<html><body><p>Item&nbsp;8.01 Other Events</p>\
                          <p>Acme Corp today introduced the Widget&nbsp;X, a faster widget.</p>\
                          <p>\u{2610} Written communications</p></body></html>";

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let llm = MockProvider::new(
            "New Product Name: Widget X\nProduct Description: A faster widget.\n",
        );
        let extractor = ProductExtractor::new(llm.clone(), ExtractorConfig::default());

        let text = normalize(FILING);
        let finding = extractor.extract(&text, "Acme Corp", "ACME").await.unwrap();

        assert_eq!(finding.name(), "Widget X");
        assert_eq!(finding.description(), "A faster widget.");

        // The model saw the identity and the normalized text
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Company: Acme Corp"));
        assert!(prompts[0].contains("Ticker: ACME"));
        assert!(prompts[0].contains("Item 8.01 Other Events Acme Corp today introduced the Widget X"));
        assert!(!prompts[0].contains("<p>"));
        assert!(!prompts[0].contains('\u{2610}'));
    }

    #[tokio::test]
    async fn test_no_product_sentinel() {
        let extractor = ProductExtractor::new(
            MockProvider::new("No new product found"),
            ExtractorConfig::default(),
        );

        let outcome = extractor.analyze("Quarterly dividend declared.", "Acme Corp", "ACME").await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);
        assert!(extractor.extract("Quarterly dividend declared.", "Acme Corp", "ACME").await.is_none());
    }

    #[tokio::test]
    async fn test_reasoning_model_output() {
        let extractor = ProductExtractor::new(
            MockProvider::new(
                "<think>The filing mentions Widget X launching.</think>\n\
                 New Product Name: Widget X\nProduct Description: A faster widget.",
            ),
            ExtractorConfig::default(),
        );

        let outcome = extractor.analyze("text", "Acme Corp", "ACME").await.unwrap();
        assert!(outcome.is_found());
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_to_none() {
        let extractor = ProductExtractor::new(
            MockProvider::new("I could not determine anything useful."),
            ExtractorConfig::default(),
        );

        let outcome = extractor.analyze("text", "Acme Corp", "ACME").await.unwrap();
        assert!(matches!(outcome, Outcome::Malformed(_)));
        assert!(extractor.extract("text", "Acme Corp", "ACME").await.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_degrades_to_none() {
        let mut llm = MockProvider::new("unused");
        llm.add_error("Company: Acme Corp");
        let extractor = ProductExtractor::new(llm.clone(), ExtractorConfig::default());

        assert!(extractor.extract("text", "Acme Corp", "ACME").await.is_none());
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_configured_description_cap() {
        let config = ExtractorConfig {
            description_max_chars: 10,
            ..ExtractorConfig::default()
        };
        let llm = MockProvider::new(
            "New Product Name: Widget X\nProduct Description: A considerably faster widget.",
        );
        let extractor = ProductExtractor::new(llm.clone(), config);

        let finding = extractor.extract("text", "Acme Corp", "ACME").await.unwrap();
        assert_eq!(finding.description(), "A consider");
        assert!(llm.prompts()[0].contains("less than 10 characters"));
    }

    /// Provider that never answers in time
    struct SlowProvider;

    impl LlmProvider for SlowProvider {
        type Error = String;

        fn model_name(&self) -> &str {
            "slow"
        }

        fn generate(&self, _prompt: &str) -> impl Future<Output = Result<String, String>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("New Product Name: Too Late".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_enforced_when_configured() {
        let config = ExtractorConfig {
            extraction_timeout_secs: Some(1),
            ..ExtractorConfig::default()
        };
        let extractor = ProductExtractor::new(SlowProvider, config);

        let result = extractor.analyze("text", "Acme Corp", "ACME").await;
        assert!(matches!(result, Err(ExtractorError::Timeout(d)) if d == Duration::from_secs(1)));
        assert!(extractor.extract("text", "Acme Corp", "ACME").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timeout_by_default() {
        let extractor = ProductExtractor::new(SlowProvider, ExtractorConfig::default());

        let outcome = extractor.analyze("text", "Acme Corp", "ACME").await.unwrap();
        assert!(outcome.is_found());
        assert_eq!(extractor.model_name(), "slow");
    }
}
