use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::NormalizedName;
use crate::strings::{find_roman, roman_to_int, whitespaces_clean};

/// Day markers the pages append to multi-day regattas: "XORNADA 2",
/// "2 XORNADA", "(2J)", "J2", "2ª JORNADA"...
static DAY_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\(?(\d+ ?ª? ?)?(XORNADA|JORNADA)( ?\d+)?\)?").unwrap(),
        Regex::new(r"\(?(\d+ ?J|J ?\d+)\)?").unwrap(),
    ]
});

/// Sponsors that show up embedded in race titles.
const SPONSORS: &[&str] = &[
    "FANDICOSTA",
    "EL CORTE INGLÉS",
    "EL CORREO",
    "EUSKOTREN",
    "PETRONOR",
    "ONURA HOMES",
];

pub fn is_play_off(name: &str) -> bool {
    name.contains("PLAY")
}

/// Strips the day marker from a multi-day race title.
pub fn remove_day_indicator(name: &str) -> String {
    let mut name = name.to_string();
    for pattern in DAY_INDICATORS.iter() {
        name = pattern.replace_all(&name, "").to_string();
    }
    whitespaces_clean(&name)
}

/// Returns the sponsor embedded in a race title, if any.
pub fn find_race_sponsor(name: &str) -> Option<String> {
    let name = whitespaces_clean(name).to_uppercase();
    SPONSORS
        .iter()
        .find(|sponsor| name.contains(*sponsor))
        .map(|sponsor| (*sponsor).to_string())
}

/// First cleanup pass over a scraped race title, shared by all datasources.
/// Leading roman numerals survive this pass, `normalize_name_parts` turns
/// them into editions.
pub fn normalize_race_name(name: &str) -> String {
    let name = whitespaces_clean(name).to_uppercase();
    whitespaces_clean(&name.replace(['"', '\'', '.', ':'], " "))
}

/// Splits a combined title ("X BANDEIRA A - II BANDEIRA B") into its
/// trophies and extracts the roman-numeral edition of each part.
pub fn normalize_name_parts(name: &str) -> Vec<NormalizedName> {
    name.split(" - ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, edition) = match find_roman(part) {
                Some(roman) => (
                    whitespaces_clean(&part[roman.len()..]),
                    roman_to_int(roman),
                ),
                None => (part.to_string(), None),
            };
            if name.is_empty() {
                None
            } else {
                Some(NormalizedName { name, edition })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_day_indicator() {
        assert_eq!(remove_day_indicator("BANDEIRA CONCELLO DE BUEU XORNADA 2"), "BANDEIRA CONCELLO DE BUEU");
        assert_eq!(remove_day_indicator("BANDERA PETRONOR (2J)"), "BANDERA PETRONOR");
        assert_eq!(remove_day_indicator("BANDERA PETRONOR J2"), "BANDERA PETRONOR");
        assert_eq!(remove_day_indicator("2ª XORNADA LIGA A"), "LIGA A");
    }

    #[test]
    fn test_find_race_sponsor() {
        assert_eq!(find_race_sponsor("XXI Gran Premio Fandicosta"), Some("FANDICOSTA".to_string()));
        assert_eq!(find_race_sponsor("BANDEIRA CONCELLO DE BUEU"), None);
    }

    #[test]
    fn test_normalize_race_name() {
        assert_eq!(
            normalize_race_name(" xxvii bandeira  \"cidade de ferrol\" "),
            "XXVII BANDEIRA CIDADE DE FERROL"
        );
        assert_eq!(normalize_race_name("XXXIX. BANDERA PETRONOR"), "XXXIX BANDERA PETRONOR");
    }

    #[test]
    fn test_normalize_name_parts_extracts_editions() {
        let parts = normalize_name_parts("XXVII BANDEIRA TRAIÑEIRAS CONCELLO DE BUEU");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "BANDEIRA TRAIÑEIRAS CONCELLO DE BUEU");
        assert_eq!(parts[0].edition, Some(27));
    }

    #[test]
    fn test_normalize_name_parts_splits_combined_titles() {
        let parts = normalize_name_parts("X BANDEIRA CONCELLO DE MUROS - II MEMORIAL PEPE LIREIRA");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "BANDEIRA CONCELLO DE MUROS");
        assert_eq!(parts[0].edition, Some(10));
        assert_eq!(parts[1].name, "MEMORIAL PEPE LIREIRA");
        assert_eq!(parts[1].edition, Some(2));
    }

    #[test]
    fn test_play_off_titles_are_not_split() {
        let parts = normalize_name_parts("PLAY-OFF LGT");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "PLAY-OFF LGT");
        assert_eq!(parts[0].edition, None);
    }
}
