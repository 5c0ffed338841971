use crate::core::orchestrator::GenerationState;
use crate::domain::model::{BoQItem, ImagePayload};
use crate::utils::error::{DesignError, Result};

/// 三個具名結果檢視
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputView {
    Quantities,
    CrossSection,
    Model3d,
}

impl OutputView {
    /// 檢視的固定順序，也是回退時的優先序
    pub const ORDER: [OutputView; 3] = [
        OutputView::Quantities,
        OutputView::CrossSection,
        OutputView::Model3d,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OutputView::Quantities => "Bill of Quantities",
            OutputView::CrossSection => "Cross-Section",
            OutputView::Model3d => "3D Model",
        }
    }

    pub fn export_filename(&self) -> &'static str {
        match self {
            OutputView::Quantities => "bill_of_quantities.csv",
            OutputView::CrossSection => "cross_section.png",
            OutputView::Model3d => "model_3d.png",
        }
    }
}

/// 結果呈現器：唯讀訂閱編排器狀態，只保有目前選取的檢視
#[derive(Debug, Clone)]
pub struct Presenter {
    selected: OutputView,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            selected: OutputView::Quantities,
        }
    }

    /// 依狀態回報目前可用的檢視（保持固定順序）
    pub fn available_views(&self, state: &GenerationState) -> Vec<OutputView> {
        match &state.outputs {
            // 全有或全無：有結果時三個檢視一起可用
            Some(_) => OutputView::ORDER.to_vec(),
            None => Vec::new(),
        }
    }

    /// 切換選取的檢視，不可用的檢視無法選取
    pub fn select(&mut self, state: &GenerationState, view: OutputView) -> Result<()> {
        if !self.available_views(state).contains(&view) {
            return Err(DesignError::ValidationError {
                message: format!("View '{}' is not available", view.title()),
            });
        }
        self.selected = view;
        Ok(())
    }

    /// 有效的作用中檢視：選取的檢視消失時回退到第一個仍可用者
    pub fn active_view(&self, state: &GenerationState) -> Option<OutputView> {
        let available = self.available_views(state);
        if available.contains(&self.selected) {
            Some(self.selected)
        } else {
            available.first().copied()
        }
    }

    /// 匯出工程數量表為 CSV 文字，數值不加引號
    pub fn export_boq_csv(&self, items: &[BoQItem]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Item", "Material", "Unit", "Quantity", "Notes"])?;

        for item in items {
            let quantity = item.quantity.to_string();
            writer.write_record([
                item.item.as_str(),
                item.material.as_str(),
                item.unit.as_str(),
                quantity.as_str(),
                item.notes.as_deref().unwrap_or(""),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| DesignError::ProcessingError {
                message: format!("CSV buffer flush failed: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| DesignError::ProcessingError {
            message: format!("CSV output was not valid UTF-8: {}", e),
        })
    }

    /// 匯出圖片為原始 PNG 位元組
    pub fn export_image(&self, payload: &ImagePayload) -> Result<Vec<u8>> {
        payload.decode()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
