use uuid::Uuid;

use crate::domain::model::{default_layers, DesignInputs, LinerLayer, Material};
use crate::utils::error::{DesignError, Result};

/// 輸入收集器：提交前唯一可變動設計資料的地方
#[derive(Debug, Clone)]
pub struct InputCollector {
    area_m2: f64,
    layers: Vec<LinerLayer>,
}

impl InputCollector {
    /// 以標準六層剖面與 1 公頃面積初始化
    pub fn new() -> Self {
        Self {
            area_m2: 10000.0,
            layers: default_layers(),
        }
    }

    pub fn with_inputs(inputs: DesignInputs) -> Self {
        Self {
            area_m2: inputs.area_m2,
            layers: inputs.layers,
        }
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn layers(&self) -> &[LinerLayer] {
        &self.layers
    }

    pub fn set_area(&mut self, area_m2: f64) {
        self.area_m2 = area_m2;
    }

    /// 追加一個帶新識別碼的預設層，回傳其 id
    pub fn add_layer(&mut self) -> Uuid {
        let layer = LinerLayer::new("New Layer", Material::CompactedClay, 150.0);
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    pub fn remove_layer(&mut self, id: Uuid) -> Result<()> {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() == before {
            return Err(DesignError::ValidationError {
                message: format!("No layer with id {}", id),
            });
        }
        Ok(())
    }

    pub fn set_layer_name(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        self.layer_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_layer_material(&mut self, id: Uuid, material: Material) -> Result<()> {
        self.layer_mut(id)?.material = material;
        Ok(())
    }

    pub fn set_layer_thickness(&mut self, id: Uuid, thickness_mm: f64) -> Result<()> {
        self.layer_mut(id)?.thickness_mm = thickness_mm;
        Ok(())
    }

    fn layer_mut(&mut self, id: Uuid) -> Result<&mut LinerLayer> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DesignError::ValidationError {
                message: format!("No layer with id {}", id),
            })
    }

    /// 建立已驗證的不可變快照（面積為正、至少一層）
    pub fn snapshot(&self) -> Result<DesignInputs> {
        if !self.area_m2.is_finite() || self.area_m2 <= 0.0 {
            return Err(DesignError::ValidationError {
                message: format!("Footprint area must be positive, got {}", self.area_m2),
            });
        }
        if self.layers.is_empty() {
            return Err(DesignError::ValidationError {
                message: "At least one liner layer is required".to_string(),
            });
        }

        Ok(DesignInputs {
            area_m2: self.area_m2,
            layers: self.layers.clone(),
        })
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}
