use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, warn};

use crate::constants::{
    CATEGORY_ABSOLUT, FEMALE_TRAINERA_DISTANCE, GENDER_FEMALE, GENDER_MALE, RACE_CONVENTIONAL,
    RACE_TIME_TRIAL, RACE_TRAINERA, TRAINERA_DISTANCE,
};
use crate::error::{Result, ScrapingError};
use crate::models::{Datasource, NormalizedName, Participant, Race, RaceName};
use crate::normalization::clubs::normalize_club_name;
use crate::normalization::races::{
    find_race_sponsor, is_play_off, normalize_name_parts, normalize_race_name, remove_day_indicator,
};
use crate::normalization::times::{normalize_lap_time, LapTime};
use crate::normalization::towns::normalize_town;
use crate::normalization::trophies::normalize_trophy_name;
use crate::parsers::html::{HtmlParser, RaceContext};
use crate::strings::{find_date, remove_parenthesis, whitespaces_clean};

static DAY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(?(\dJ|J\d)\)?").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Parser for the Asociación de Clubes de Traineras pages (Eusko Label
/// Liga / Liga Euskotren). Everything lives on a single document; the race
/// date is embedded in the title.
pub struct ActHtmlParser;

impl HtmlParser for ActHtmlParser {
    fn datasource(&self) -> Datasource {
        Datasource::Act
    }

    fn parse_race(&self, ctx: &RaceContext<'_>) -> Result<Option<Race>> {
        let name = self.get_name(ctx.document);
        if name.is_empty() {
            error!("act: no race found for race_id={}", ctx.race_id);
            return Ok(None);
        }
        info!("act: found race {name}");

        let t_date = find_date(&name).ok_or_else(|| ScrapingError::Unparseable {
            value: name.clone(),
            reason: "no date found in race name".to_string(),
        })?;

        let gender = if ctx.is_female { GENDER_FEMALE } else { GENDER_MALE };

        let parts = normalize_name_parts(&normalize_race_name(&remove_parenthesis(&name)));
        if parts.is_empty() {
            error!("act: unable to normalize name={name:?}");
            return Ok(None);
        }
        let normalized_names: Vec<NormalizedName> = parts
            .into_iter()
            .map(|part| {
                let name = remove_day_indicator(&part.name);
                let name = if is_play_off(&name) {
                    name
                } else {
                    normalize_trophy_name(&name, ctx.is_female)
                };
                self.hardcoded_name_edition(name, ctx.is_female, t_date.year(), part.edition)
            })
            .collect();
        info!("act: race normalized to {normalized_names:?}");

        let participants = self.get_participants(ctx.document);

        let mut race = Race {
            name: name.clone(),
            normalized_names,
            date: t_date.format("%d/%m/%Y").to_string(),
            race_type: self.get_type(ctx.document, &participants).to_string(),
            day: self.get_day(ctx.document),
            modality: RACE_TRAINERA.to_string(),
            league: Some(self.get_league(ctx.document, ctx.is_female).to_string()),
            town: self.get_town(ctx.document),
            organizer: self.get_organizer(ctx.document),
            sponsor: find_race_sponsor(&name),
            race_ids: vec![ctx.race_id.to_string()],
            url: None,
            gender: Some(gender.to_string()),
            datasource: Datasource::Act.to_string(),
            cancelled: self.is_cancelled(ctx.document),
            race_laps: self.get_race_laps(ctx.document),
            race_lanes: self.get_race_lanes(ctx.document, &participants),
            participants: Vec::new(),
        };

        for row in &participants {
            race.participants.push(Participant {
                gender: gender.to_string(),
                category: CATEGORY_ABSOLUT.to_string(),
                club_name: self.get_club_name(row),
                lane: self.get_lane(row),
                series: self.get_series(ctx.document, row),
                laps: self.get_laps(row),
                distance: Some(self.get_distance(ctx.is_female)),
                handicap: None,
                participant: normalize_club_name(&self.get_club_name(row)).replace("ACT | ", ""),
                disqualified: self.is_disqualified(row),
                lineup: None,
            });
        }

        Ok(Some(race))
    }

    fn parse_race_ids(&self, document: &Html) -> Vec<String> {
        document
            .select(&selector("#col-a table.races td a"))
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| href.rsplit("r=").next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_race_names(&self, document: &Html) -> Vec<RaceName> {
        document
            .select(&selector("#col-a table.races td a"))
            .filter_map(|a| {
                let race_id = a.value().attr("href")?.rsplit("r=").next()?.to_string();
                let name = a.text().collect::<String>();
                Some(RaceName { race_id, name: whitespaces_clean(&name).to_uppercase() })
            })
            .collect()
    }
}

impl ActHtmlParser {
    ////////////////////////////////////////////////////
    //                     GETTERS                    //
    ////////////////////////////////////////////////////

    fn get_name(&self, document: &Html) -> String {
        let name = document
            .select(&selector("#col-a section h3"))
            .next()
            .map(|h3| h3.text().collect::<String>())
            .unwrap_or_default();
        whitespaces_clean(&name).to_uppercase()
    }

    fn get_day(&self, document: &Html) -> u8 {
        let name = self.get_name(document);
        if is_play_off(&name) {
            return if remove_parenthesis(&name).contains('1') { 1 } else { 2 };
        }

        DAY_MARKER
            .find(&name)
            .and_then(|marker| DIGITS.find(marker.as_str()))
            .and_then(|digits| digits.as_str().parse().ok())
            .unwrap_or(1)
    }

    fn get_type(&self, document: &Html, participants: &[ElementRef<'_>]) -> &'static str {
        if is_play_off(&self.get_name(document)) {
            return RACE_TIME_TRIAL;
        }
        let lanes: Vec<u8> = participants.iter().filter_map(|p| self.get_lane(p)).collect();
        match lanes.first() {
            Some(first) if lanes.iter().all(|lane| lane == first) => RACE_TIME_TRIAL,
            _ => RACE_CONVENTIONAL,
        }
    }

    fn get_league(&self, document: &Html, is_female: bool) -> &'static str {
        if is_play_off(&self.get_name(document)) {
            "ACT"
        } else if is_female {
            "LIGA EUSKOTREN"
        } else {
            "EUSKO LABEL LIGA"
        }
    }

    fn get_town(&self, document: &Html) -> Option<String> {
        document
            .select(&selector("#col-a section table.race-details td"))
            .nth(1)
            .map(|td| normalize_town(&td.text().collect::<String>()))
            .filter(|town| !town.is_empty())
    }

    fn get_organizer(&self, document: &Html) -> Option<String> {
        document
            .select(&selector("#col-a section table.race-details td"))
            .next()
            .map(|td| whitespaces_clean(&td.text().collect::<String>()).to_uppercase())
            .filter(|organizer| !organizer.is_empty())
    }

    fn get_race_lanes(&self, document: &Html, participants: &[ElementRef<'_>]) -> Option<u8> {
        if self.get_type(document, participants) == RACE_TIME_TRIAL {
            return Some(1);
        }
        participants.iter().filter_map(|p| self.get_lane(p)).max()
    }

    fn get_race_laps(&self, document: &Html) -> Option<u8> {
        let td = selector("td");
        let columns = document
            .select(&selector("#col-a section div.results table tbody tr"))
            .map(|row| row.select(&td).count().saturating_sub(3))
            .max()
            .unwrap_or(0);
        (columns > 1).then(|| columns as u8)
    }

    fn is_cancelled(&self, document: &Html) -> bool {
        // non-scoring races show a "No puntuable" tag in the header
        document
            .select(&selector("#col-a section p span"))
            .next()
            .map(|span| whitespaces_clean(&span.text().collect::<String>()).to_uppercase())
            .is_some_and(|tag| tag == "NO PUNTUABLE")
    }

    fn get_participants<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document
            .select(&selector("#col-a section div.results table tbody tr"))
            .collect()
    }

    fn get_lane(&self, participant: &ElementRef<'_>) -> Option<u8> {
        self.cells(participant).first().and_then(|lane| lane.parse().ok())
    }

    fn get_club_name(&self, participant: &ElementRef<'_>) -> String {
        self.cells(participant).get(1).cloned().unwrap_or_default().to_uppercase()
    }

    fn get_distance(&self, is_female: bool) -> u32 {
        if is_female {
            FEMALE_TRAINERA_DISTANCE
        } else {
            TRAINERA_DISTANCE
        }
    }

    fn get_laps(&self, participant: &ElementRef<'_>) -> Vec<String> {
        let cells = self.cells(participant);
        if cells.len() <= 3 {
            return Vec::new();
        }
        // the last column holds the computed total, not a lap
        cells[2..cells.len() - 1]
            .iter()
            .filter(|cell| !cell.is_empty())
            .filter_map(|cell| match normalize_lap_time(cell) {
                lap @ LapTime::Parsed(_) => lap.canonical(),
                LapTime::NoTime => None,
                LapTime::Unparseable(reason) => {
                    warn!("act: skipping lap {cell:?}: {reason}");
                    None
                }
            })
            .collect()
    }

    fn is_disqualified(&self, participant: &ElementRef<'_>) -> bool {
        // disqualified crews show "Descal" in the final crono
        let cells = self.cells(participant);
        cells.len() > 3 && cells[cells.len() - 2] == "Descal"
    }

    fn get_series(&self, document: &Html, participant: &ElementRef<'_>) -> Option<u8> {
        let td = selector("td");
        let searching_name = self.get_club_name(participant);
        let mut series = 1;
        for tbody in document.select(&selector("#col-a section div.results table tbody")) {
            for row in tbody.select(&selector("tr")) {
                let club = row
                    .select(&td)
                    .nth(1)
                    .map(|cell| whitespaces_clean(&cell.text().collect::<String>()).to_uppercase());
                if club.is_some_and(|club| club == searching_name) {
                    return Some(series);
                }
            }
            series += 1;
        }
        None
    }

    fn cells(&self, participant: &ElementRef<'_>) -> Vec<String> {
        participant
            .select(&selector("td"))
            .map(|td| whitespaces_clean(&td.text().collect::<String>()))
            .collect()
    }

    ////////////////////////////////////////////////////
    //                 NORMALIZATION                  //
    ////////////////////////////////////////////////////

    fn hardcoded_name_edition(
        &self,
        name: String,
        is_female: bool,
        year: i32,
        edition: Option<u16>,
    ) -> NormalizedName {
        let year_edition = |founding: i32| u16::try_from(year - founding).ok();

        if name.contains("ASTILLERO") {
            return NormalizedName {
                name: "BANDERA AYUNTAMIENTO DE ASTILLERO".to_string(),
                edition: year_edition(1970),
            };
        }
        if name.contains("ORIOKO") {
            return NormalizedName { name: "ORIOKO ESTROPADAK".to_string(), edition };
        }
        if name.contains("CORREO IKURRIÑA") {
            return NormalizedName {
                name: "EL CORREO IKURRIÑA".to_string(),
                edition: year_edition(1986),
            };
        }
        if name.contains("EL CORTE") {
            return NormalizedName {
                name: "GRAN PREMIO EL CORTE INGLÉS".to_string(),
                edition: year_edition(1970),
            };
        }
        if is_play_off(&name) {
            return if is_female {
                NormalizedName {
                    name: "PLAY-OFF ACT (FEMENINO)".to_string(),
                    edition: year_edition(2016),
                }
            } else {
                NormalizedName { name: "PLAY-OFF ACT".to_string(), edition: year_edition(2002) }
            };
        }

        NormalizedName { name, edition }
    }
}
