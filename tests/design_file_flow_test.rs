use anyhow::Result;
use complidesign::config::CliConfig;
use complidesign::{DesignEngine, DesignFile, GeminiClient, LocalStorage};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const DESIGN_TOML: &str = r#"
[design]
area_m2 = 12500.0

[[design.layers]]
name = "Vegetated Cover"
material = "Vegetative Layer"
thickness_mm = 150.0

[[design.layers]]
name = "Drainage Composite"
material = "Geocomposite Drainage Layer"
thickness_mm = 8.0

[[design.layers]]
name = "Secondary Geomembrane"
material = "LLDPE Geomembrane"
thickness_mm = 1.5
"#;

#[tokio::test]
async fn test_design_file_drives_generated_request_content() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut design_file = NamedTempFile::new()?;
    design_file.write_all(DESIGN_TOML.as_bytes())?;

    let inputs = DesignFile::from_file(design_file.path())?.to_inputs()?;
    assert_eq!(inputs.layers.len(), 3);

    let server = MockServer::start();
    let boq_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent")
            .body_contains("12500 square meters")
            .body_contains("Vegetated Cover")
            .body_contains("Drainage Composite")
            .body_contains("Secondary Geomembrane");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{
                        "text": "[{\"item\":\"LLDPE liner\",\"material\":\"LLDPE Geomembrane\",\"unit\":\"sq. m\",\"quantity\":13750,\"notes\":\"10% contingency\"}]"
                    }] }
                }]
            }));
    });
    let image_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash-image:generateContent")
            .body_contains("Vegetated Cover");
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

    let config = CliConfig {
        design: Some(design_file.path().to_str().unwrap().to_string()),
        output_path: output_path.clone(),
        api_base_url: server.base_url(),
        text_model: "gemini-2.5-flash".to_string(),
        image_model: "gemini-2.5-flash-image".to_string(),
        timeout_seconds: Some(30),
        bundle: false,
        verbose: false,
        monitor: false,
    };

    let service = GeminiClient::new("test-key", &config);
    let storage = LocalStorage::new(output_path);
    let mut engine = DesignEngine::new(service, storage, false);

    engine.run(&inputs).await?;

    boq_mock.assert_hits(1);
    image_mock.assert_hits(2);

    let csv_content = std::fs::read_to_string(temp_dir.path().join("bill_of_quantities.csv"))?;
    assert!(csv_content.starts_with("Item,Material,Unit,Quantity,Notes"));
    assert!(csv_content.contains("LLDPE liner"));

    Ok(())
}
