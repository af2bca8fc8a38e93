use crate::config::ServiceFamily;
use crate::domain::errors::ApiError;
use crate::domain::reference::HolidaysResponse;
use crate::infrastructure::http_client::{ApiClient, encode_path_segment};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

#[derive(Clone)]
pub struct CalendarService {
    client: ApiClient,
}

impl CalendarService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Public holidays for an ISO country code and year.
    pub async fn holidays(&self, country: &str, year: i32) -> Result<HolidaysResponse, ApiError> {
        let path = format!(
            "/api/calendar/holidays/{}/{}",
            encode_path_segment(country),
            year
        );
        let response: HolidaysResponse = self
            .client
            .get_json(ServiceFamily::Reference, &path, &[])
            .await?;
        debug!(
            "Fetched {} holidays for {} {}",
            response.holidays.len(),
            country,
            year
        );
        Ok(response)
    }

    pub async fn is_holiday(&self, country: &str, date: NaiveDate) -> Result<bool, ApiError> {
        let response = self.holidays(country, date.year()).await?;
        Ok(response.contains(date))
    }
}
