use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::{BankInfo, CompanyInfo};
use crate::infrastructure::http_client::{ApiClient, encode_path_segment};
use tracing::info;

/// Counterparty lookup through the DaData proxy.
#[derive(Clone)]
pub struct CompanyService {
    client: ApiClient,
}

impl CompanyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Looks up a legal entity by its INN (taxpayer id).
    pub async fn company(&self, inn: &str) -> Result<CompanyInfo, ApiError> {
        let path = format!("/api/dadata/company/{}", encode_path_segment(inn));
        let company: CompanyInfo = self
            .client
            .get_json(ServiceFamily::Reference, &path, &[])
            .await?;
        info!("Resolved INN {} to {}", inn, company.name);
        Ok(company)
    }

    /// Looks up a bank by its BIC.
    pub async fn bank(&self, bic: &str) -> Result<BankInfo, ApiError> {
        let path = format!("/api/dadata/bank/{}", encode_path_segment(bic));
        self.client
            .get_json(ServiceFamily::Reference, &path, &[])
            .await
    }
}
