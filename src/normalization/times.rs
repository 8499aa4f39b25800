use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Outcome of normalizing one results-table time cell.
///
/// The three cases are disjoint on purpose: a cell can carry a valid time,
/// an explicit "no time recorded" sentinel ("00:00", "-", "Descal"), or a
/// digit grouping none of the repair rules recognizes. Callers are expected
/// to skip the last two rather than abort the whole race parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LapTime {
    Parsed(NaiveTime),
    NoTime,
    Unparseable(String),
}

impl LapTime {
    pub fn ok(self) -> Option<NaiveTime> {
        match self {
            LapTime::Parsed(time) => Some(time),
            _ => None,
        }
    }

    pub fn is_no_time(&self) -> bool {
        matches!(self, LapTime::NoTime)
    }

    /// Canonical `MM:SS.ffffff` rendering, when a time was parsed.
    pub fn canonical(&self) -> Option<String> {
        match self {
            LapTime::Parsed(time) => Some(time.format("%M:%S%.6f").to_string()),
            _ => None,
        }
    }
}

/// Normalizes a lap time cell to a standard time.
///
/// The repair rules fix the defects observed in the scraped pages:
/// 1. ':18,62' | ':45' (dropped minutes field)
/// 2. '2102:48' | '25:2257' (swapped digit groupings)
/// 3. '028:24' (dropped leading zero in minutes)
/// 4. '00:009' (extra trailing digit)
/// 5. '20.55.07' (dot-separated formatting)
pub fn normalize_lap_time(value: &str) -> LapTime {
    let value = if value.starts_with(':') {
        format!("00{value}")
    } else {
        value.to_string()
    };

    let parts: Vec<&str> = DIGIT_RUNS.find_iter(&value).map(|m| m.as_str()).collect();
    if parts.iter().all(|p| *p == "00") {
        // covers "00", "00:00" and digit-less cells like "-" or "Descal"
        return LapTime::NoTime;
    }

    match parts.len() {
        1 => {
            let dot_parts: Vec<&str> = value.split('.').collect();
            if dot_parts.len() == 3 {
                build_time(dot_parts[0], dot_parts[1], Some(dot_parts[2]))
            } else {
                LapTime::Unparseable(format!("no known repair for {value:?}"))
            }
        }
        2 => {
            let mut minutes = parts[0].to_string();
            let mut seconds = parts[1].to_string();
            if minutes.len() == 3 {
                minutes.insert(0, '0');
            }
            if seconds.len() == 3 {
                seconds.pop();
            }
            if minutes.len() == 4 {
                build_time(&minutes[..2], &minutes[2..], Some(&seconds))
            } else if seconds.len() == 4 {
                build_time(&minutes, &seconds[..2], Some(&seconds[2..]))
            } else {
                build_time(&minutes, &seconds, None)
            }
        }
        3 => build_time(parts[0], parts[1], Some(parts[2])),
        _ => LapTime::Unparseable(format!("no known repair for {value:?}")),
    }
}

fn build_time(minutes: &str, seconds: &str, fraction: Option<&str>) -> LapTime {
    let minutes: u32 = match minutes.parse() {
        Ok(value) => value,
        Err(_) => return LapTime::Unparseable(format!("invalid minutes {minutes:?}")),
    };
    let seconds: u32 = match seconds.parse() {
        Ok(value) => value,
        Err(_) => return LapTime::Unparseable(format!("invalid seconds {seconds:?}")),
    };
    // fraction digits are a left-aligned decimal fraction: "48" means .48s
    let micros: u32 = match fraction {
        None => 0,
        Some(f) if f.is_empty() || f.len() > 6 || f.bytes().any(|b| !b.is_ascii_digit()) => {
            return LapTime::Unparseable(format!("invalid fraction {f:?}"))
        }
        Some(f) => format!("{f:0<6}").parse().unwrap_or(0),
    };

    match NaiveTime::from_hms_micro_opt(0, minutes, seconds, micros) {
        Some(time) => LapTime::Parsed(time),
        None => LapTime::Unparseable(format!("out of range time {minutes}:{seconds}")),
    }
}

/// Galician month names mapped onto the Spanish spelling used everywhere else.
const MONTHS: &[(&str, &[&str])] = &[
    ("ENERO", &["XANEIRO"]),
    ("FEBRERO", &["FEBREIRO"]),
    ("MARZO", &[]),
    ("ABRIL", &[]),
    ("MAYO", &["MAIO"]),
    ("JUNIO", &["XUÑO"]),
    ("JULIO", &["XULLO"]),
    ("AGOSTO", &[]),
    ("SEPTIEMBRE", &["SEPTEMBRO"]),
    ("OCTUBRE", &["OUTUBRO"]),
    ("NOVIEMBRE", &["NOVEMBRO"]),
    ("DICIEMBRE", &["DECEMBRO"]),
];

pub fn normalize_spanish_months(phrase: &str) -> String {
    let mut phrase = phrase.to_uppercase();
    for (canonical, variants) in MONTHS {
        for variant in *variants {
            phrase = phrase.replace(variant, canonical);
        }
    }
    phrase
}
