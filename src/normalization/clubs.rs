use once_cell::sync::Lazy;
use regex::Regex;

use crate::strings::whitespaces_clean;

/// Known clubs keyed by their canonical short name. Same matching contract
/// as the trophy table: ordered, first entry wins, substring hits count.
const NORMALIZED_CLUBS: &[(&str, &[&str])] = &[
    ("CABO DA CRUZ", &["CABO DA CRUZ", "CABO DE CRUZ"]),
    ("DONOSTIA ARRAUN LAGUNAK", &["DONOSTIA ARRAUN LAGUNAK", "DONOSTIA ARRAUN"]),
    ("ORIO", &["ORIO ARRAUN ELKARTEA"]),
    ("HONDARRIBIA", &["HONDARRIBIA ARRAUN ELKARTEA"]),
    ("PUEBLA", &["A POBRA DO CARAMIÑAL", "PUEBLA DEL CARAMIÑAL"]),
    ("PERILLO", &["SALGADO PERILLO"]),
    ("TIRÁN", &["TIRAN", "TIRÁN PEREIRA"]),
];

/// Entity-type prefixes the pages prepend to club names (club de remo,
/// sociedad deportiva, arraun elkartea...). They carry no identity.
static CLUB_PREFIXES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(C\.? ?R\.?|S\.? ?D\.? ?R?\.?|C\.? ?D\.? ?R?\.?|A\.? ?E\.?|C\.? ?M\.?|CLUB( DE)? (REMO|MAR)|CLUB) ").unwrap()
});

/// Normalizes a scraped club name to the short form used across datasources.
pub fn normalize_club_name(name: &str) -> String {
    let name = whitespaces_clean(name).to_uppercase();
    let mut name = whitespaces_clean(&CLUB_PREFIXES.replace(&name, ""));

    for (canonical, variants) in NORMALIZED_CLUBS {
        if variants.iter().any(|v| name == *v || name.contains(v)) {
            name = (*canonical).to_string();
            break;
        }
    }

    whitespaces_clean(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_stripped() {
        assert_eq!(normalize_club_name("C.R. MUROS"), "MUROS");
        assert_eq!(normalize_club_name("SD TIRÁN PEREIRA"), "TIRÁN");
        assert_eq!(normalize_club_name("CLUB DE REMO ARES"), "ARES");
    }

    #[test]
    fn test_known_variants_map_to_canonical() {
        assert_eq!(normalize_club_name("CABO DE CRUZ"), "CABO DA CRUZ");
        assert_eq!(normalize_club_name("Orio Arraun Elkartea"), "ORIO");
    }

    #[test]
    fn test_unknown_clubs_are_cleaned_only() {
        assert_eq!(normalize_club_name("  rianxo "), "RIANXO");
    }

    #[test]
    fn test_idempotency() {
        for raw in ["C.R. MUROS", "CABO DE CRUZ", "SD TIRÁN PEREIRA", "RIANXO"] {
            let once = normalize_club_name(raw);
            assert_eq!(normalize_club_name(&once), once);
        }
    }
}
