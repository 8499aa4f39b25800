use async_trait::async_trait;

use crate::error::{Result, ScrapingError};
use crate::models::{Datasource, Race, RaceName};

pub mod act;
pub mod lgt;

pub use act::ActClient;
pub use lgt::LgtClient;

/// One datasource's scraping surface: fetches the pages and hands them to
/// the matching `HtmlParser`.
#[async_trait]
pub trait Client: Send + Sync {
    fn datasource(&self) -> Datasource;

    /// Checks the given year for validity in the datasource.
    fn validate_year(&self, year: i32) -> Result<()>;

    /// Retrieves race details by ID. `Ok(None)` when the page exists but
    /// holds no usable race.
    async fn get_race_by_id(&self, race_id: &str) -> Result<Option<Race>>;

    /// Finds the race ids celebrated in a year.
    async fn get_race_ids_by_year(&self, year: i32) -> Result<Vec<String>>;

    /// Finds the race ids and raw titles celebrated in a year.
    async fn get_race_names_by_year(&self, year: i32) -> Result<Vec<RaceName>>;
}

/// Builds the client for a datasource. Datasources without a scraper yet
/// are rejected here rather than at call time.
pub fn client_for(datasource: Datasource, is_female: bool) -> Result<Box<dyn Client>> {
    match datasource {
        Datasource::Act => Ok(Box::new(ActClient::new(is_female))),
        Datasource::Lgt => Ok(Box::new(LgtClient::new(is_female))),
        other => Err(ScrapingError::NotSupported {
            datasource: other.to_string(),
            activity: "scraping".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_factory() {
        assert!(client_for(Datasource::Act, false).is_ok());
        assert!(client_for(Datasource::Lgt, true).is_ok());
        assert!(matches!(
            client_for(Datasource::Inforemo, false),
            Err(ScrapingError::NotSupported { .. })
        ));
    }
}
