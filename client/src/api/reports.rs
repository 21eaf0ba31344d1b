//! Server-generated PDF reports

use chrono::NaiveDate;

use super::ApiClient;
use crate::error::ClientResult;

/// A downloaded report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Report {
    pub fn daily_outflow_file_name(date: NaiveDate) -> String {
        format!("relatorio_saidas_{}.pdf", date.format(shared::DATE_FORMAT))
    }
}

impl ApiClient {
    /// Outflows per sector for one day, as rendered by the backend
    pub async fn daily_outflow_report(&self, date: NaiveDate) -> ClientResult<Report> {
        let bytes = self
            .get_bytes(
                "/relatorios/saidas-diarias",
                &vec![("data", date.format(shared::DATE_FORMAT).to_string())],
            )
            .await?;
        Ok(Report {
            file_name: Report::daily_outflow_file_name(date),
            bytes,
        })
    }
}
