use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, warn};

use crate::constants::{
    CATEGORY_ABSOLUT, GENDER_FEMALE, GENDER_MALE, RACE_CONVENTIONAL, RACE_TIME_TRIAL, RACE_TRAINERA,
    TRAINERA_DISTANCE,
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
use crate::strings::whitespaces_clean;

static DAY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r" \d+").unwrap());

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Parser for the Liga Galega de Traiñas pages. Race details and the
/// results table live on two separate documents.
pub struct LgtHtmlParser;

impl HtmlParser for LgtHtmlParser {
    fn datasource(&self) -> Datasource {
        Datasource::Lgt
    }

    fn parse_race(&self, ctx: &RaceContext<'_>) -> Result<Option<Race>> {
        let results = ctx.results.ok_or_else(|| {
            ScrapingError::MissingField("LGT needs a separate results document".to_string())
        })?;

        let name = self.get_name(ctx.document);
        // the site keeps a couple of placeholder pages around
        if name.is_empty() || name == "EREWEWEWERW" || name == "REGATA" || name.contains('?') {
            error!("lgt: no race found for race_id={}", ctx.race_id);
            return Ok(None);
        }
        info!("lgt: found race {name}");

        let t_date = self.get_date(ctx.document)?;
        let league = self.get_league(ctx.document);
        let is_female = ["FEMENINA", "FEMININA"].iter().any(|g| name.contains(g))
            || league.as_deref().is_some_and(|l| l.split_whitespace().any(|part| part == "F"));
        let gender = if is_female { GENDER_FEMALE } else { GENDER_MALE };

        let parts = normalize_name_parts(&normalize_race_name(&name));
        if parts.is_empty() {
            error!("lgt: unable to normalize name={name:?}");
            return Ok(None);
        }
        let normalized_names: Vec<NormalizedName> = parts
            .into_iter()
            .map(|part| {
                let name = self.normalize_race_name(&part.name, t_date);
                let name = if is_play_off(&name) {
                    name
                } else {
                    normalize_trophy_name(&name, is_female)
                };
                self.hardcoded_playoff_edition(name, t_date.year(), part.edition)
            })
            .collect();
        info!("lgt: race normalized to {normalized_names:?}");

        let participants = self.get_participants(results);
        let race_laps = self.get_race_laps(results);
        if race_laps.is_none() {
            error!("lgt: unable to parse laps for {normalized_names:?}");
            return Ok(None);
        }

        let race_type = self.get_type(&participants);
        let mut race = Race {
            name: name.clone(),
            normalized_names,
            date: t_date.format("%d/%m/%Y").to_string(),
            race_type: race_type.to_string(),
            day: self.get_day(ctx.document),
            modality: RACE_TRAINERA.to_string(),
            league,
            town: self.get_town(ctx.document),
            organizer: self.get_organizer(ctx.document),
            sponsor: find_race_sponsor(&name),
            race_ids: vec![ctx.race_id.to_string()],
            url: None,
            datasource: Datasource::Lgt.to_string(),
            gender: Some(gender.to_string()),
            cancelled: self.is_cancelled(&participants),
            race_laps,
            race_lanes: self.get_race_lanes(&participants),
            participants: Vec::new(),
        };

        for row in &participants {
            race.participants.push(Participant {
                gender: gender.to_string(),
                category: CATEGORY_ABSOLUT.to_string(),
                club_name: self.get_club_name(row),
                lane: self.get_lane(row),
                series: self.get_series(results, row),
                laps: self.get_laps(row),
                distance: Some(TRAINERA_DISTANCE),
                handicap: None,
                participant: normalize_club_name(&self.get_club_name(row)),
                disqualified: self.is_disqualified(row),
                lineup: None,
            });
        }

        Ok(Some(race))
    }

    fn parse_race_ids(&self, document: &Html) -> Vec<String> {
        document
            .select(&selector("#taboleiro div.race a"))
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| href.split('/').next_back())
            .filter_map(|segment| segment.split('-').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_race_names(&self, document: &Html) -> Vec<RaceName> {
        let cell = selector("table tr td");
        document
            .select(&selector("#taboleiro div.race"))
            .filter_map(|race| {
                let race_id = race
                    .select(&selector("a"))
                    .filter_map(|a| a.value().attr("href"))
                    .filter_map(|href| href.split('/').next_back())
                    .filter_map(|segment| segment.split('-').next())
                    .next()?
                    .to_string();
                let name = race.select(&cell).nth(1)?.text().collect::<String>();
                Some(RaceName { race_id, name: whitespaces_clean(&name).to_uppercase() })
            })
            .collect()
    }
}

impl LgtHtmlParser {
    ////////////////////////////////////////////////////
    //                     GETTERS                    //
    ////////////////////////////////////////////////////

    fn get_name(&self, document: &Html) -> String {
        let name = document
            .select(&selector("#regata div.info h1"))
            .next()
            .map(|h1| h1.text().collect::<String>())
            .unwrap_or_default();
        whitespaces_clean(&name).to_uppercase()
    }

    fn get_date(&self, document: &Html) -> Result<NaiveDate> {
        let value = document
            .select(&selector("#regata div.info p"))
            .nth(1)
            .map(|p| whitespaces_clean(&p.text().collect::<String>()))
            .unwrap_or_default();
        NaiveDate::parse_from_str(&value, "%d/%m/%Y").map_err(|_| ScrapingError::Unparseable {
            value,
            reason: "expected dd/mm/yyyy race date".to_string(),
        })
    }

    fn get_day(&self, document: &Html) -> u8 {
        let name = self.get_name(document);
        if name.contains("XORNADA") {
            if let Some(day) = DAY_NUMBER
                .find(&name)
                .and_then(|m| m.as_str().trim().parse::<u8>().ok())
            {
                return day;
            }
        }
        if is_play_off(&name) {
            // exception case: the page never labels play-off days
            if name.contains('1') {
                return 1;
            }
            if name.contains('2') {
                return 2;
            }
            let sunday = self
                .get_date(document)
                .map(|d| d.weekday().number_from_monday() == 7)
                .unwrap_or(false);
            return if sunday { 2 } else { 1 };
        }
        1
    }

    fn get_type(&self, participants: &[ElementRef<'_>]) -> &'static str {
        let lanes: Vec<u8> = participants.iter().filter_map(|p| self.get_lane(p)).collect();
        match lanes.first() {
            Some(first) if lanes.iter().all(|lane| lane == first) => RACE_TIME_TRIAL,
            _ => RACE_CONVENTIONAL,
        }
    }

    fn get_league(&self, document: &Html) -> Option<String> {
        if is_play_off(&self.get_name(document)) {
            return Some("LGT".to_string());
        }
        document
            .select(&selector("#regata div.info p span"))
            .next()
            .map(|span| whitespaces_clean(&span.text().collect::<String>()))
            .filter(|league| !league.is_empty())
    }

    fn get_town(&self, document: &Html) -> Option<String> {
        document
            .select(&selector("#regata div.info p"))
            .next()
            .map(|p| normalize_town(&p.text().collect::<String>()))
            .filter(|town| !town.is_empty())
    }

    fn get_organizer(&self, document: &Html) -> Option<String> {
        document
            .select(&selector("#regata div.organizador"))
            .next()
            .map(|div| {
                whitespaces_clean(&div.text().collect::<String>())
                    .to_uppercase()
                    .replace("ORGANIZA:", "")
                    .trim()
                    .to_string()
            })
            .filter(|organizer| !organizer.is_empty())
            .map(|organizer| normalize_club_name(&organizer))
    }

    fn get_race_lanes(&self, participants: &[ElementRef<'_>]) -> Option<u8> {
        if self.get_type(participants) == RACE_TIME_TRIAL {
            return Some(1);
        }
        participants.iter().filter_map(|p| self.get_lane(p)).max()
    }

    fn get_race_laps(&self, results: &Html) -> Option<u8> {
        let headers = results.select(&selector("#tabla-tempos tr th")).count();
        (headers >= 2).then(|| (headers - 2) as u8)
    }

    fn is_cancelled(&self, participants: &[ElementRef<'_>]) -> bool {
        // assume no final time is set for cancelled races
        let finals: Vec<String> = participants
            .iter()
            .filter_map(|p| self.cells(p).last().cloned())
            .collect();
        let missing = finals.iter().filter(|text| text.as_str() == "-").count();
        missing * 3 > finals.len()
    }

    fn get_participants<'a>(&self, results: &'a Html) -> Vec<ElementRef<'a>> {
        let td = selector("td");
        results
            .select(&selector("#tabla-tempos tr"))
            .skip(1)
            .filter(|row| {
                let cells: Vec<ElementRef<'_>> = row.select(&td).collect();
                if cells.len() <= 1 {
                    return false;
                }
                let maybe_name = whitespaces_clean(&cells[1].text().collect::<String>());
                !maybe_name.is_empty() && maybe_name != "LIBRE"
            })
            .collect()
    }

    fn get_lane(&self, participant: &ElementRef<'_>) -> Option<u8> {
        self.cells(participant).first().and_then(|lane| lane.parse().ok())
    }

    fn get_club_name(&self, participant: &ElementRef<'_>) -> String {
        self.cells(participant).get(1).cloned().unwrap_or_default().to_uppercase()
    }

    fn get_laps(&self, participant: &ElementRef<'_>) -> Vec<String> {
        self.cells(participant)
            .iter()
            .skip(2)
            .filter(|cell| !cell.is_empty())
            .filter_map(|cell| match normalize_lap_time(cell) {
                lap @ LapTime::Parsed(_) => lap.canonical(),
                LapTime::NoTime => None,
                LapTime::Unparseable(reason) => {
                    warn!("lgt: skipping lap {cell:?}: {reason}");
                    None
                }
            })
            .collect()
    }

    fn is_disqualified(&self, participant: &ElementRef<'_>) -> bool {
        // the final crono is replaced by a "-" for disqualified crews
        self.cells(participant).last().is_some_and(|cell| cell == "-")
    }

    fn get_series(&self, results: &Html, participant: &ElementRef<'_>) -> Option<u8> {
        let td = selector("td");
        let searching_name = self.get_club_name(participant);
        let mut series = 1;
        for row in results.select(&selector("#tabla-tempos tr")).skip(1) {
            let cells: Vec<String> = row
                .select(&td)
                .map(|cell| whitespaces_clean(&cell.text().collect::<String>()))
                .collect();
            if cells.len() == 1 {
                // single-cell rows separate the heats
                series += 1;
                continue;
            }
            if cells.get(1).is_some_and(|name| name.to_uppercase() == searching_name) {
                return Some(series);
            }
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

    fn normalize_race_name(&self, name: &str, t_date: NaiveDate) -> String {
        let mut name = remove_day_indicator(name);

        if name.contains("TERESA HERRERA") {
            // lgt never labels the final
            return if t_date.weekday().number_from_monday() == 7 {
                "TROFEO TERESA HERRERA".to_string()
            } else {
                "TROFEO TERESA HERRERA (CLASIFICATORIA)".to_string()
            };
        }

        if is_play_off(&name) {
            return "PLAY-OFF LGT".to_string();
        }

        // remove gender qualifiers
        for gender in ["FEMENINA", "FEMININA"] {
            name = name.replace(gender, "");
        }

        whitespaces_clean(&name)
    }

    fn hardcoded_playoff_edition(
        &self,
        name: String,
        year: i32,
        edition: Option<u16>,
    ) -> NormalizedName {
        if is_play_off(&name) {
            let edition = u16::try_from(year - 2011).ok();
            return NormalizedName { name, edition };
        }
        NormalizedName { name, edition }
    }
}
