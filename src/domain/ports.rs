use crate::domain::model::{BoQItem, DesignInputs, ImagePayload};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部生成服務的介面（三路請求共用）
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// 依設計輸入產生工程數量表，回應必須符合宣告的結構
    async fn generate_boq(&self, inputs: &DesignInputs) -> Result<Vec<BoQItem>>;

    /// 依文字提示產生單張內嵌圖片，缺少圖片資料即為失敗
    async fn generate_image(&self, prompt: &str) -> Result<ImagePayload>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn text_model(&self) -> &str;
    fn image_model(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn bundle_outputs(&self) -> bool;
}
