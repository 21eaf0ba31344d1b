//! Dashboard counters, alerts and chart series

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Headline counters shown on the dashboard and item pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_medicamentos: i64,
    pub total_insumos: i64,
    pub lotes_proximos_vencimento: i64,
    pub itens_estoque_baixo: i64,
    pub medicamentos_com_estoque: i64,
    pub insumos_com_estoque: i64,
}

/// Entry of the "expiring lots" or "low stock" alert lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    /// Free-form detail: lot and quantity for expiry alerts, total for low stock
    #[serde(rename = "extraInfo", default)]
    pub extra_info: String,
    /// Only present on expiry alerts
    #[serde(rename = "diasParaVencer", default, skip_serializing_if = "Option::is_none")]
    pub days_to_expiry: Option<i64>,
}

/// Point of the stock-per-item bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChartPoint {
    #[serde(rename = "nomeItem")]
    pub item_name: String,
    #[serde(rename = "quantidadeTotal")]
    pub total_quantity: i64,
}

/// Inbound/outbound totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyMovement {
    /// 1 = January
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "entradas", default)]
    pub inbound: i64,
    #[serde(rename = "saidas", default)]
    pub outbound: i64,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl MonthlyMovement {
    pub fn month_label(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|idx| MONTH_LABELS.get(idx as usize))
            .copied()
            .unwrap_or("?")
    }

    pub fn net(&self) -> i64 {
        self.inbound - self.outbound
    }
}

/// Quantity consumed by one sector in the selected period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorConsumption {
    #[serde(rename = "nomeSetor")]
    pub sector_name: String,
    #[serde(rename = "quantidadeTotal")]
    pub total_quantity: i64,
}

/// Aggregation window of the sector consumption chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConsumptionPeriod {
    #[serde(rename = "DIA")]
    Day,
    #[default]
    #[serde(rename = "MES")]
    Month,
    #[serde(rename = "ANO")]
    Year,
}

impl ConsumptionPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionPeriod::Day => "DIA",
            ConsumptionPeriod::Month => "MES",
            ConsumptionPeriod::Year => "ANO",
        }
    }
}

impl std::str::FromStr for ConsumptionPeriod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dia" | "day" => Ok(ConsumptionPeriod::Day),
            "mes" | "month" => Ok(ConsumptionPeriod::Month),
            "ano" | "year" => Ok(ConsumptionPeriod::Year),
            _ => Err("Period must be day, month or year"),
        }
    }
}
