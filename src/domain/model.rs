use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{DesignError, Result};

/// 襯墊材料的枚舉集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    #[serde(rename = "Compacted Clay")]
    CompactedClay,
    #[serde(rename = "HDPE Geomembrane")]
    HdpeGeomembrane,
    #[serde(rename = "LLDPE Geomembrane")]
    LldpeGeomembrane,
    #[serde(rename = "Geosynthetic Clay Liner (GCL)")]
    GeosyntheticClayLiner,
    #[serde(rename = "Non-woven Geotextile")]
    NonWovenGeotextile,
    #[serde(rename = "Woven Geotextile")]
    WovenGeotextile,
    #[serde(rename = "Geocomposite Drainage Layer")]
    GeocompositeDrainageLayer,
    #[serde(rename = "Gravel")]
    Gravel,
    #[serde(rename = "Sand")]
    Sand,
    #[serde(rename = "Topsoil")]
    Topsoil,
    #[serde(rename = "Vegetative Layer")]
    VegetativeLayer,
}

impl Material {
    pub const ALL: [Material; 11] = [
        Material::CompactedClay,
        Material::HdpeGeomembrane,
        Material::LldpeGeomembrane,
        Material::GeosyntheticClayLiner,
        Material::NonWovenGeotextile,
        Material::WovenGeotextile,
        Material::GeocompositeDrainageLayer,
        Material::Gravel,
        Material::Sand,
        Material::Topsoil,
        Material::VegetativeLayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::CompactedClay => "Compacted Clay",
            Material::HdpeGeomembrane => "HDPE Geomembrane",
            Material::LldpeGeomembrane => "LLDPE Geomembrane",
            Material::GeosyntheticClayLiner => "Geosynthetic Clay Liner (GCL)",
            Material::NonWovenGeotextile => "Non-woven Geotextile",
            Material::WovenGeotextile => "Woven Geotextile",
            Material::GeocompositeDrainageLayer => "Geocomposite Drainage Layer",
            Material::Gravel => "Gravel",
            Material::Sand => "Sand",
            Material::Topsoil => "Topsoil",
            Material::VegetativeLayer => "Vegetative Layer",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Material {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self> {
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DesignError::InvalidConfigValueError {
                field: "material".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown liner material. Valid materials: {}",
                    Material::ALL
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

/// 單一襯墊層，順序代表由上而下的實體堆疊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinerLayer {
    pub id: Uuid,
    pub name: String,
    pub material: Material,
    /// 厚度（毫米）
    pub thickness_mm: f64,
}

impl LinerLayer {
    pub fn new(name: impl Into<String>, material: Material, thickness_mm: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            material,
            thickness_mm,
        }
    }
}

/// 提交給編排器的不可變設計快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInputs {
    /// 佔地面積（平方公尺）
    pub area_m2: f64,
    pub layers: Vec<LinerLayer>,
}

/// 標準六層預設剖面
pub fn default_layers() -> Vec<LinerLayer> {
    vec![
        LinerLayer::new("Protective Soil Cover", Material::Sand, 300.0),
        LinerLayer::new("Leachate Collection Gravel", Material::Gravel, 300.0),
        LinerLayer::new("Geotextile Filter", Material::NonWovenGeotextile, 5.0),
        LinerLayer::new("Primary Geomembrane", Material::HdpeGeomembrane, 2.0),
        LinerLayer::new(
            "Geosynthetic Clay Liner (GCL)",
            Material::GeosyntheticClayLiner,
            7.0,
        ),
        LinerLayer::new("Compacted Clay Liner", Material::CompactedClay, 600.0),
    ]
}

/// 外部服務產出的工程數量表項目，材料欄位視為不透明字串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoQItem {
    pub item: String,
    pub material: String,
    pub unit: String,
    pub quantity: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Base64 編碼的內嵌圖片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// 解碼為原始位元組，供檔案匯出使用
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| DesignError::ProcessingError {
                message: format!("Invalid base64 image payload: {}", e),
            })
    }
}

/// 三路生成全部成功後的合併結果
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutputs {
    pub boq: Vec<BoQItem>,
    pub cross_section: ImagePayload,
    pub model_3d: ImagePayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_round_trip() {
        for material in Material::ALL {
            let parsed: Material = material.as_str().parse().unwrap();
            assert_eq!(parsed, material);
        }
        assert!("Recycled Rubber".parse::<Material>().is_err());
    }

    #[test]
    fn test_material_serde_uses_display_string() {
        let json = serde_json::to_string(&Material::HdpeGeomembrane).unwrap();
        assert_eq!(json, "\"HDPE Geomembrane\"");
    }

    #[test]
    fn test_default_layers_order_is_top_to_bottom() {
        let layers = default_layers();
        assert_eq!(layers.len(), 6);
        assert_eq!(layers[0].name, "Protective Soil Cover");
        assert_eq!(layers[5].material, Material::CompactedClay);
    }

    #[test]
    fn test_default_layers_have_unique_ids() {
        let layers = default_layers();
        for (i, a) in layers.iter().enumerate() {
            for b in layers.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_image_payload_decode() {
        let payload = ImagePayload::new("image/png", "aGVsbG8=");
        assert_eq!(payload.decode().unwrap(), b"hello");
        assert_eq!(payload.to_data_uri(), "data:image/png;base64,aGVsbG8=");

        let bad = ImagePayload::new("image/png", "not valid base64!!");
        assert!(bad.decode().is_err());
    }

    #[test]
    fn test_boq_item_notes_optional_in_json() {
        let item: BoQItem = serde_json::from_str(
            r#"{"item":"HDPE liner","material":"HDPE Geomembrane","unit":"sq. m","quantity":55000}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 55000.0);
        assert!(item.notes.is_none());
    }
}
