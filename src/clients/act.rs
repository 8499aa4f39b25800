use async_trait::async_trait;
use chrono::Datelike;
use scraper::Html;
use tracing::info;

use crate::clients::Client;
use crate::error::{Result, ScrapingError};
use crate::models::{Datasource, Race, RaceName};
use crate::parsers::html::{ActHtmlParser, HtmlParser, RaceContext};

const MALE_START: i32 = 2003;
const FEMALE_START: i32 = 2009;

/// Client for the ACT league sites: euskolabelliga.com for the male league
/// and euskotrenliga.com for the female one.
pub struct ActClient {
    client: reqwest::Client,
    parser: ActHtmlParser,
    is_female: bool,
}

impl ActClient {
    pub fn new(is_female: bool) -> Self {
        Self { client: reqwest::Client::new(), parser: ActHtmlParser, is_female }
    }

    fn host(&self) -> &'static str {
        if self.is_female {
            "https://www.euskotrenliga.com"
        } else {
            "https://www.euskolabelliga.com"
        }
    }

    pub fn get_race_details_url(&self, race_id: &str) -> String {
        format!("{}/resultados/ver.php?r={race_id}", self.host())
    }

    pub fn get_races_url(&self, year: i32) -> String {
        format!("{}/resultados/index.php?t={year}", self.host())
    }
}

#[async_trait]
impl Client for ActClient {
    fn datasource(&self) -> Datasource {
        Datasource::Act
    }

    fn validate_year(&self, year: i32) -> Result<()> {
        let start = if self.is_female { FEMALE_START } else { MALE_START };
        let current = chrono::Utc::now().year();
        if year < start || year > current {
            return Err(ScrapingError::InvalidInput(format!(
                "invalid year={year}, ACT supports {start}..={current}"
            )));
        }
        Ok(())
    }

    async fn get_race_by_id(&self, race_id: &str) -> Result<Option<Race>> {
        let url = self.get_race_details_url(race_id);
        info!("act: fetching {url}");
        let body = self.client.get(&url).send().await?.text().await?;

        let document = Html::parse_document(&body);
        let race = self.parser.parse_race(&RaceContext {
            document: &document,
            results: None,
            race_id,
            is_female: self.is_female,
        })?;
        Ok(race.map(|mut race| {
            race.url = Some(url);
            race
        }))
    }

    async fn get_race_ids_by_year(&self, year: i32) -> Result<Vec<String>> {
        self.validate_year(year)?;
        let body = self.client.get(self.get_races_url(year)).send().await?.text().await?;
        Ok(self.parser.parse_race_ids(&Html::parse_document(&body)))
    }

    async fn get_race_names_by_year(&self, year: i32) -> Result<Vec<RaceName>> {
        self.validate_year(year)?;
        let body = self.client.get(self.get_races_url(year)).send().await?.text().await?;
        Ok(self.parser.parse_race_names(&Html::parse_document(&body)))
    }
}
