pub mod clients;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalization;
pub mod output;
pub mod parsers;
pub mod strings;

pub use error::{Result, ScrapingError};
pub use models::{Datasource, Lineup, NormalizedName, Participant, Race, RaceName};

use clients::client_for;

/// Finds and fully parses a race in one call.
pub async fn find_race(race_id: &str, datasource: Datasource, is_female: bool) -> Result<Option<Race>> {
    let client = client_for(datasource, is_female)?;
    client.get_race_by_id(race_id).await
}

/// Lists the ids of the races celebrated in a year.
pub async fn find_race_ids(year: i32, datasource: Datasource, is_female: bool) -> Result<Vec<String>> {
    let client = client_for(datasource, is_female)?;
    client.get_race_ids_by_year(year).await
}

/// Lists the raw titles of the races celebrated in a year.
pub async fn find_race_names(year: i32, datasource: Datasource, is_female: bool) -> Result<Vec<RaceName>> {
    let client = client_for(datasource, is_female)?;
    client.get_race_names_by_year(year).await
}
