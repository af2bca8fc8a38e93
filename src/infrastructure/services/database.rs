use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::ExportedFile;
use crate::infrastructure::http_client::ApiClient;
use tracing::info;

const REGISTRY_EXPORT_FALLBACK_NAME: &str = "registry.parquet";

#[derive(Clone)]
pub struct DatabaseService {
    client: ApiClient,
}

impl DatabaseService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Downloads the instrument registry as a parquet file.
    pub async fn export_registry_parquet(&self) -> Result<ExportedFile, ApiError> {
        let file = self
            .client
            .post_for_file(
                ServiceFamily::Database,
                "/api/database/export/registry/parquet",
                REGISTRY_EXPORT_FALLBACK_NAME,
            )
            .await?;
        info!("Exported registry: {} ({} bytes)", file.filename, file.bytes.len());
        Ok(file)
    }
}
