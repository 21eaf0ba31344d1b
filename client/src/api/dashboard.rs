//! Dashboard counters, alert lists and charts

use shared::{
    ConsumptionPeriod, DashboardStats, MonthlyMovement, SectorConsumption, StockAlert,
    StockChartPoint,
};

use super::{ApiClient, Query};
use crate::error::ClientResult;

impl ApiClient {
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.get_json("/dashboard/stats", &Query::new()).await
    }

    /// Lots expiring within the configured warning window
    pub async fn expiring_lots(&self) -> ClientResult<Vec<StockAlert>> {
        self.get_list("/dashboard/vencimento", &Query::new()).await
    }

    /// Items below their minimum stock
    pub async fn low_stock(&self) -> ClientResult<Vec<StockAlert>> {
        self.get_list("/dashboard/estoque-baixo", &Query::new()).await
    }

    pub async fn stock_chart(&self) -> ClientResult<Vec<StockChartPoint>> {
        self.get_list("/dashboard/grafico-estoque", &Query::new())
            .await
    }

    pub async fn movements_per_month(&self) -> ClientResult<Vec<MonthlyMovement>> {
        self.get_list("/dashboard/movimentacoes-por-mes", &Query::new())
            .await
    }

    pub async fn consumption_by_sector(
        &self,
        period: ConsumptionPeriod,
    ) -> ClientResult<Vec<SectorConsumption>> {
        self.get_list(
            "/dashboard/consumo-setor",
            &vec![("periodo", period.as_str().to_string())],
        )
        .await
    }
}
