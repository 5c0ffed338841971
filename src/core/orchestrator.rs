use crate::core::prompt;
use crate::domain::model::{DesignInputs, GenerationOutputs};
use crate::domain::ports::GenerationService;
use crate::utils::error::Result;

/// 編排器持有的顯式請求/回應狀態，呈現層只讀取不修改
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    pub loading: bool,
    pub outputs: Option<GenerationOutputs>,
    pub error: Option<String>,
}

/// 三路並發生成的編排器：全有或全無，不支援部分成功
pub struct Orchestrator<G: GenerationService> {
    service: G,
    state: GenerationState,
}

impl<G: GenerationService> Orchestrator<G> {
    pub fn new(service: G) -> Self {
        Self {
            service,
            state: GenerationState::default(),
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// 同時發出三個生成請求並等待全部完成。
    /// 任一失敗即整體失敗，先前的結果一律清除。
    pub async fn generate(&mut self, inputs: &DesignInputs) -> Result<&GenerationOutputs> {
        self.state.loading = true;
        self.state.error = None;
        self.state.outputs = None;

        tracing::info!(
            "🚀 Dispatching 3 generation requests ({} layers, {} m²)",
            inputs.layers.len(),
            inputs.area_m2
        );

        let cross_section_prompt = prompt::cross_section_prompt(inputs);
        let model_3d_prompt = prompt::model_3d_prompt(inputs);

        // join! 而非 try_join!：已發出的請求不取消，全部跑到完成或失敗
        let (boq, cross_section, model_3d) = tokio::join!(
            self.service.generate_boq(inputs),
            self.service.generate_image(&cross_section_prompt),
            self.service.generate_image(&model_3d_prompt),
        );
        let joined = boq.and_then(|boq| Ok((boq, cross_section?, model_3d?)));

        // 成功與失敗路徑都要清掉載入旗標
        self.state.loading = false;

        match joined {
            Ok((boq, cross_section, model_3d)) => {
                tracing::info!("✅ All 3 generation requests completed");
                Ok(&*self.state.outputs.insert(GenerationOutputs {
                    boq,
                    cross_section,
                    model_3d,
                }))
            }
            Err(e) => {
                tracing::error!("❌ Generation batch failed: {}", e);
                self.state.error = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }
}
