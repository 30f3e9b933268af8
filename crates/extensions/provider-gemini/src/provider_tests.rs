    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn provider() -> GeminiProvider {
        GeminiProvider::new("test-key".to_string())
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("gemini-1.5-flash", vec![Message::user("What is entropy?")])
            .with_system("Explain concepts clearly.")
            .with_max_tokens(75)
            .with_temperature(0.3)
            .with_top_p(1.0)
    }

    #[test]
    fn test_provider_id() {
        let provider = provider();
        assert_eq!(provider.id(), "gemini");
        assert!(provider.models().iter().any(|m| m.id == "gemini-1.5-flash"));
    }

    #[test]
    fn test_system_prompt_moves_to_instruction() {
        let gemini_request = provider().build_request(&request());
        assert_eq!(gemini_request.contents.len(), 1);
        assert_eq!(gemini_request.contents[0].role, "user");
        let system = gemini_request.system_instruction.unwrap();
        assert_eq!(system.joined_text(), "Explain concepts clearly.");
    }

    #[test]
    fn test_inline_system_messages_are_merged() {
        let request = CompletionRequest::new(
            "gemini-1.5-flash",
            vec![Message::system("Be brief."), Message::user("hi")],
        )
        .with_system("You are helpful.");
        let gemini_request = provider().build_request(&request);
        assert_eq!(gemini_request.contents.len(), 1);
        assert_eq!(
            gemini_request.system_instruction.unwrap().joined_text(),
            "You are helpful.\n\nBe brief."
        );
    }

    #[test]
    fn test_no_system_instruction() {
        let request = CompletionRequest::new("gemini-1.5-flash", vec![Message::user("hi")]);
        assert!(provider().build_request(&request).system_instruction.is_none());
    }

    #[test]
    fn test_assistant_role_maps_to_model() {
        let contents = provider().convert_messages(&[Message::user("a"), Message::assistant("b")]);
        assert_eq!(contents[1].role, "model");
    }

    #[test]
    fn test_generation_config() {
        let config = provider().build_request(&request()).generation_config.unwrap();
        assert_eq!(config.max_output_tokens, Some(75));
        assert_eq!(config.top_p, Some(1.0));
        assert_eq!(config.temperature, Some(0.3));
    }

    #[test]
    fn test_convert_response_empty_candidates() {
        let response = GenerateContentResponse {
            candidates: vec![],
            usage_metadata: None,
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
            }),
        };
        match provider().convert_response(response, "gemini-1.5-flash") {
            Err(ProviderError::InvalidResponse(message)) => assert!(message.contains("SAFETY")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_response_text_and_usage() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content::text("model", "Entropy measures disorder."),
                finish_reason: Some("MAX_TOKENS".to_string()),
            }],
            usage_metadata: Some(UsageMetadata {
                prompt_token_count: 10,
                candidates_token_count: 5,
                total_token_count: 15,
            }),
            prompt_feedback: None,
        };
        let completion = provider().convert_response(response, "gemini-1.5-flash").unwrap();
        assert_eq!(completion.text(), Some("Entropy measures disorder."));
        assert_eq!(completion.stop_reason, StopReason::MaxTokens);
        assert_eq!(completion.usage.total_tokens, 15);
        assert!(completion.id.starts_with("gemini-"));
    }

    #[tokio::test]
    async fn test_complete_end_to_end() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/models/gemini-1.5-flash:generateContent"))
            .and(matchers::body_partial_json(serde_json::json!({
                "generationConfig": {"maxOutputTokens": 75}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Entropy measures disorder."}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("test-key".to_string(), mock_server.uri());
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.text(), Some("Entropy measures disorder."));
    }

    #[tokio::test]
    async fn test_complete_quota_error() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("test-key".to_string(), mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn test_complete_permission_error() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url("test-key".to_string(), mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::PermissionDenied(_)));
    }
