use complidesign::config::CliConfig;
use complidesign::{DesignEngine, DesignError, GeminiClient, InputCollector, LocalStorage};
use httpmock::prelude::*;
use tempfile::TempDir;

fn config_for(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        design: None,
        output_path: output_path.to_string(),
        api_base_url: server.base_url(),
        text_model: "gemini-2.5-flash".to_string(),
        image_model: "gemini-2.5-flash-image".to_string(),
        timeout_seconds: Some(30),
        bundle: false,
        verbose: false,
        monitor: false,
    }
}

fn boq_body() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{
                "text": "[{\"item\":\"Sand cover\",\"material\":\"Sand\",\"unit\":\"cu. m\",\"quantity\":15000}]"
            }] }
        }]
    })
}

#[tokio::test]
async fn test_one_failed_image_call_fails_the_whole_batch() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(boq_body());
    });
    // 圖片端點故障
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash-image:generateContent");
        then.status(500).body("internal error");
    });

    let config = config_for(&server, &output_path);
    let service = GeminiClient::new("test-key", &config);
    let storage = LocalStorage::new(output_path.clone());
    let mut engine = DesignEngine::new(service, storage, false);

    let inputs = InputCollector::new().snapshot().unwrap();
    let result = engine.run(&inputs).await;

    assert!(result.is_err());

    // 全有或全無：BoQ 成功也不得留下任何輸出檔
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(entries.is_empty());

    // 狀態只剩一條通用錯誤訊息，沒有部分結果
    let state = engine.orchestrator().state();
    assert!(!state.loading);
    assert!(state.outputs.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("An error occurred while generating the design. Please try again.")
    );
    assert_eq!(engine.presenter().active_view(state), None);
}

#[tokio::test]
async fn test_malformed_boq_response_fails_the_whole_batch() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "```json\nnot even close\n```" }] }
                }]
            }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash-image:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{
                        "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" }
                    }] }
                }]
            }));
    });

    let config = config_for(&server, &output_path);
    let service = GeminiClient::new("test-key", &config);
    let storage = LocalStorage::new(output_path);
    let mut engine = DesignEngine::new(service, storage, false);

    let inputs = InputCollector::new().snapshot().unwrap();
    let err = engine.run(&inputs).await.unwrap_err();

    assert!(matches!(err, DesignError::SchemaError { .. }));
    assert!(engine.orchestrator().state().outputs.is_none());

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_failed_resubmission_clears_previous_results() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let mut boq_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(boq_body());
    });
    let mut image_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash-image:generateContent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{
                        "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" }
                    }] }
                }]
            }));
    });

    let config = config_for(&server, &output_path);
    let service = GeminiClient::new("test-key", &config);
    let storage = LocalStorage::new(output_path);
    let mut engine = DesignEngine::new(service, storage, false);

    let inputs = InputCollector::new().snapshot().unwrap();
    engine.run(&inputs).await.unwrap();
    assert!(engine.orchestrator().state().outputs.is_some());

    // 第二次提交時服務故障
    boq_mock.delete();
    image_mock.delete();
    server.mock(|when, then| {
        when.method(POST).path_contains("generateContent");
        then.status(503).body("service unavailable");
    });

    let result = engine.run(&inputs).await;

    assert!(result.is_err());
    let state = engine.orchestrator().state();
    assert!(state.outputs.is_none());
    assert!(state.error.is_some());
}
