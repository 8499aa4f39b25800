use async_trait::async_trait;
use chrono::Datelike;
use scraper::Html;
use tracing::info;

use crate::clients::Client;
use crate::error::{Result, ScrapingError};
use crate::models::{Datasource, Race, RaceName};
use crate::parsers::html::{HtmlParser, LgtHtmlParser, RaceContext};

const MALE_START: i32 = 2020;
const FEMALE_START: i32 = 2020;

/// Client for ligalgt.com. The detail page is a regular GET; the results
/// table is served by an AJAX endpoint that expects a form POST.
pub struct LgtClient {
    client: reqwest::Client,
    parser: LgtHtmlParser,
    is_female: bool,
}

impl LgtClient {
    pub fn new(is_female: bool) -> Self {
        Self { client: reqwest::Client::new(), parser: LgtHtmlParser, is_female }
    }

    pub fn get_race_details_url(race_id: &str) -> String {
        format!("https://www.ligalgt.com/principal/regata/{race_id}")
    }

    pub fn get_races_url(year: i32) -> String {
        format!("https://www.ligalgt.com/principal/calendario/{year}")
    }

    pub fn get_results_url() -> &'static str {
        "https://www.ligalgt.com/ajax/principal/ver_resultados.php"
    }

    fn league_id(&self) -> &'static str {
        if self.is_female {
            "2"
        } else {
            "1"
        }
    }
}

#[async_trait]
impl Client for LgtClient {
    fn datasource(&self) -> Datasource {
        Datasource::Lgt
    }

    fn validate_year(&self, year: i32) -> Result<()> {
        let start = if self.is_female { FEMALE_START } else { MALE_START };
        let current = chrono::Utc::now().year();
        if year < start || year > current {
            return Err(ScrapingError::InvalidInput(format!(
                "invalid year={year}, LGT supports {start}..={current}"
            )));
        }
        Ok(())
    }

    async fn get_race_by_id(&self, race_id: &str) -> Result<Option<Race>> {
        let url = Self::get_race_details_url(race_id);
        info!("lgt: fetching {url}");
        let detail = self.client.get(&url).send().await?.text().await?;
        let results = self
            .client
            .post(Self::get_results_url())
            .form(&[("liga_id", self.league_id()), ("regata_id", race_id)])
            .send()
            .await?
            .text()
            .await?;

        let document = Html::parse_document(&detail);
        let results = Html::parse_document(&results);
        let race = self.parser.parse_race(&RaceContext {
            document: &document,
            results: Some(&results),
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
        let body = self.client.get(Self::get_races_url(year)).send().await?.text().await?;
        Ok(self.parser.parse_race_ids(&Html::parse_document(&body)))
    }

    async fn get_race_names_by_year(&self, year: i32) -> Result<Vec<RaceName>> {
        self.validate_year(year)?;
        let body = self.client.get(Self::get_races_url(year)).send().await?.text().await?;
        Ok(self.parser.parse_race_names(&Html::parse_document(&body)))
    }
}
