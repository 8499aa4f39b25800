use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapingError};

/// Supported source federations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datasource {
    Act,
    Lgt,
    Arc,
    Abe,
    Traineras,
    Inforemo,
}

impl Datasource {
    pub const ALL: [Datasource; 6] = [
        Datasource::Act,
        Datasource::Lgt,
        Datasource::Arc,
        Datasource::Abe,
        Datasource::Traineras,
        Datasource::Inforemo,
    ];

    pub fn has_value(value: &str) -> bool {
        Datasource::from_str(value).is_ok()
    }

    /// Datasources whose pages are OCR dumps rather than structured HTML.
    pub fn is_ocr(self) -> bool {
        matches!(self, Datasource::Inforemo)
    }
}

impl fmt::Display for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Datasource::Act => "act",
            Datasource::Lgt => "lgt",
            Datasource::Arc => "arc",
            Datasource::Abe => "abe",
            Datasource::Traineras => "traineras",
            Datasource::Inforemo => "inforemo",
        };
        f.write_str(name)
    }
}

impl FromStr for Datasource {
    type Err = ScrapingError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "act" => Ok(Datasource::Act),
            "lgt" => Ok(Datasource::Lgt),
            "arc" => Ok(Datasource::Arc),
            "abe" => Ok(Datasource::Abe),
            "traineras" => Ok(Datasource::Traineras),
            "inforemo" => Ok(Datasource::Inforemo),
            other => Err(ScrapingError::InvalidInput(format!("invalid datasource={other}"))),
        }
    }
}

/// A race id and its raw (already uppercased) title, as listed in a
/// datasource's yearly index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceName {
    pub race_id: String,
    pub name: String,
}

/// One canonical name for a race plus its optional edition number. A single
/// scraped title can carry several of these when two trophies are disputed
/// in the same regatta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedName {
    pub name: String,
    pub edition: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    pub date: String,
    pub day: u8,
    pub modality: String,
    #[serde(rename = "type")]
    pub race_type: String,
    pub league: Option<String>,
    pub town: Option<String>,
    pub organizer: Option<String>,
    pub sponsor: Option<String>,

    // normalized fields
    pub normalized_names: Vec<NormalizedName>,

    // datasource data
    pub race_ids: Vec<String>,
    pub url: Option<String>,
    pub datasource: String,
    pub gender: Option<String>,

    pub participants: Vec<Participant>,

    // not available in all the datasources
    pub race_laps: Option<u8>,
    pub race_lanes: Option<u8>,
    pub cancelled: bool,
}

impl Race {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub gender: String,
    pub category: String,
    pub club_name: String,
    pub lane: Option<u8>,
    pub series: Option<u8>,
    /// Canonical `MM:SS.ffffff` lap times, one per completed lap.
    pub laps: Vec<String>,
    pub distance: Option<u32>,
    pub handicap: Option<String>,

    /// Normalized club name.
    pub participant: String,

    pub disqualified: bool,

    pub lineup: Option<Lineup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    pub race: String,
    pub club: String,
    pub coach: String,
    pub delegate: String,
    pub coxswain: Option<String>,
    pub starboard: Vec<String>,
    pub larboard: Vec<String>,
    pub substitute: Vec<String>,
    pub bow: Option<String>,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_roundtrip() {
        for datasource in Datasource::ALL {
            assert_eq!(Datasource::from_str(&datasource.to_string()).unwrap(), datasource);
        }
        assert!(Datasource::has_value("ACT"));
        assert!(Datasource::has_value("lgt"));
        assert!(!Datasource::has_value("fisa"));
    }

    #[test]
    fn test_datasource_is_ocr() {
        assert!(Datasource::Inforemo.is_ocr());
        assert!(!Datasource::Act.is_ocr());
    }
}
