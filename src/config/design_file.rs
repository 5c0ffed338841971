use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::model::{DesignInputs, LinerLayer, Material};
use crate::utils::error::{DesignError, Result};
use crate::utils::validation::{self, Validate};

/// TOML 設計檔：面積加上由上而下排列的層次表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub design: DesignSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSection {
    pub area_m2: f64,
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    pub material: String,
    pub thickness_mm: f64,
}

impl DesignFile {
    /// 從 TOML 檔案載入設計
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DesignError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設計
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DesignError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_AREA})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 轉成已驗證的設計快照，每一層取得新識別碼
    pub fn to_inputs(&self) -> Result<DesignInputs> {
        self.validate()?;

        let layers = self
            .design
            .layers
            .iter()
            .map(|entry| {
                let material: Material = entry.material.parse()?;
                Ok(LinerLayer::new(
                    entry.name.clone(),
                    material,
                    entry.thickness_mm,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DesignInputs {
            area_m2: self.design.area_m2,
            layers,
        })
    }
}

impl Validate for DesignFile {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_measure("design.area_m2", self.design.area_m2)?;

        if self.design.layers.is_empty() {
            return Err(DesignError::ValidationError {
                message: "design.layers must contain at least one layer".to_string(),
            });
        }

        for (index, layer) in self.design.layers.iter().enumerate() {
            let field = format!("design.layers[{}]", index);
            validation::validate_non_empty_string(&format!("{}.name", field), &layer.name)?;
            validation::validate_positive_measure(
                &format!("{}.thickness_mm", field),
                layer.thickness_mm,
            )?;
        }

        Ok(())
    }
}
