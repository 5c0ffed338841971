use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::prompt;
use crate::domain::model::{BoQItem, DesignInputs, ImagePayload};
use crate::domain::ports::{ConfigProvider, GenerationService};
use crate::utils::error::{DesignError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// generateContent 的請求主體
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// 工程數量表的宣告輸出結構（四個必填欄位加一個選填）
fn boq_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "item": {
                    "type": "STRING",
                    "description": "A short description of the line item."
                },
                "material": {
                    "type": "STRING",
                    "description": "The specific material for the item."
                },
                "unit": {
                    "type": "STRING",
                    "description": "The unit of measurement (e.g., \"sq. m\", \"cu. m\", \"kg\")."
                },
                "quantity": {
                    "type": "NUMBER",
                    "description": "The calculated quantity for the item."
                },
                "notes": {
                    "type": "STRING",
                    "description": "Any relevant notes or specifications for the item."
                }
            },
            "required": ["item", "material", "unit", "quantity"]
        }
    })
}

/// Gemini generateContent API 的用戶端
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    timeout: Option<std::time::Duration>,
}

impl GeminiClient {
    pub fn new<C: ConfigProvider>(api_key: impl Into<String>, config: &C) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            text_model: config.text_model().to_string(),
            image_model: config.image_model().to_string(),
            timeout: config.timeout_seconds().map(std::time::Duration::from_secs),
        }
    }

    /// 從環境讀取憑證；缺少時為致命錯誤，不會發出任何請求
    pub fn from_env<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| DesignError::MissingApiKeyError {
                env_var: API_KEY_ENV.to_string(),
            })?;
        Ok(Self::new(api_key, config))
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt_text: &str,
        generation_config: GenerationConfig,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt_text.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: Some(generation_config),
        };

        let mut request = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making generation request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DesignError::ServiceStatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// 取出第一個候選內容的 parts
    fn first_candidate_parts(response: GenerateContentResponse) -> Vec<Part> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl GenerationService for GeminiClient {
    async fn generate_boq(&self, inputs: &DesignInputs) -> Result<Vec<BoQItem>> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(boq_response_schema()),
            response_modalities: None,
        };

        let response = self
            .generate_content(&self.text_model, &prompt::boq_prompt(inputs), config)
            .await?;

        let text = Self::first_candidate_parts(response)
            .into_iter()
            .find_map(|p| p.text)
            .ok_or_else(|| DesignError::SchemaError {
                context: "bill of quantities".to_string(),
                message: "response contained no text part".to_string(),
            })?;

        // 顯式結構驗證：解析失敗給出描述性錯誤，不嘗試修復或重試
        let items: Vec<BoQItem> =
            serde_json::from_str(text.trim()).map_err(|e| DesignError::SchemaError {
                context: "bill of quantities".to_string(),
                message: e.to_string(),
            })?;

        if let Some(bad) = items.iter().find(|i| !(i.quantity >= 0.0)) {
            return Err(DesignError::SchemaError {
                context: "bill of quantities".to_string(),
                message: format!("negative quantity {} for '{}'", bad.quantity, bad.item),
            });
        }

        Ok(items)
    }

    async fn generate_image(&self, prompt_text: &str) -> Result<ImagePayload> {
        let config = GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            response_modalities: Some(vec!["IMAGE".to_string()]),
        };

        let response = self
            .generate_content(&self.image_model, prompt_text, config)
            .await?;

        Self::first_candidate_parts(response)
            .into_iter()
            .find_map(|p| p.inline_data)
            .map(|inline| {
                ImagePayload::new(
                    inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
                    inline.data,
                )
            })
            .ok_or_else(|| DesignError::MissingImageError {
                kind: "image".to_string(),
            })
    }
}
