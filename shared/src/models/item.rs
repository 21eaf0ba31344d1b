//! Item catalog models (medicines and supplies)

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An item registered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricaoDetalhada", default)]
    pub description: String,
    #[serde(rename = "unidadeMedida", default)]
    pub unit: String,
    #[serde(rename = "estoqueMinimo", default)]
    pub minimum_stock: i64,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
    /// Whether any lot of this item currently holds stock
    #[serde(rename = "possuiEstoque", default, skip_serializing_if = "Option::is_none")]
    pub has_stock: Option<bool>,
    #[serde(flatten)]
    pub category: ItemCategory,
}

fn default_active() -> bool {
    true
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        self.category.kind()
    }

    pub fn to_catalog_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            display_name: self.name.clone(),
        }
    }
}

/// Category of an item, discriminated by the backend's `dtype` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dtype")]
pub enum ItemCategory {
    #[serde(rename = "MEDICAMENTO")]
    Medicine {
        #[serde(rename = "tipo")]
        medicine_type: MedicineType,
    },
    #[serde(rename = "INSUMO")]
    Supply,
}

impl ItemCategory {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemCategory::Medicine { .. } => ItemKind::Medicine,
            ItemCategory::Supply => ItemKind::Supply,
        }
    }
}

/// The bare item category, used for filters and endpoint selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "MEDICAMENTO")]
    Medicine,
    #[serde(rename = "INSUMO")]
    Supply,
}

impl ItemKind {
    /// Value of the `dtype` discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Medicine => "MEDICAMENTO",
            ItemKind::Supply => "INSUMO",
        }
    }

    /// Backend resource collection for create, update and delete
    pub fn endpoint(&self) -> &'static str {
        match self {
            ItemKind::Medicine => "/medicamentos",
            ItemKind::Supply => "/insumos",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Medicine => write!(f, "Medicine"),
            ItemKind::Supply => write!(f, "Supply"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MEDICAMENTO" | "MEDICINE" => Ok(ItemKind::Medicine),
            "INSUMO" | "SUPPLY" => Ok(ItemKind::Supply),
            _ => Err("Unknown item category"),
        }
    }
}

/// Administration route of a medicine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicineType {
    #[serde(rename = "ORAL")]
    Oral,
    #[serde(rename = "INJETAVEL")]
    Injectable,
    #[serde(rename = "CONTROLADO")]
    Controlled,
}

impl std::fmt::Display for MedicineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicineType::Oral => write!(f, "Oral"),
            MedicineType::Injectable => write!(f, "Injectable"),
            MedicineType::Controlled => write!(f, "Controlled"),
        }
    }
}

/// Selectable reference to an item, as offered by the movement dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub display_name: String,
}

impl CatalogItem {
    pub fn new(id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Create/update payload for an item
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ItemInput {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "descricaoDetalhada")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "unidadeMedida")]
    pub unit: String,
    #[serde(rename = "estoqueMinimo")]
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub minimum_stock: i64,
    /// Only sent for medicines
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub medicine_type: Option<MedicineType>,
}

impl ItemInput {
    /// Pre-fill the form from an existing item (edit mode)
    pub fn from_item(item: &Item) -> Self {
        let medicine_type = match &item.category {
            ItemCategory::Medicine { medicine_type } => Some(*medicine_type),
            ItemCategory::Supply => None,
        };
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            unit: item.unit.clone(),
            minimum_stock: item.minimum_stock.max(0),
            medicine_type,
        }
    }
}
