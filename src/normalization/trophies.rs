use once_cell::sync::Lazy;
use regex::Regex;

use crate::strings::whitespaces_clean;

/// Known trophy names keyed by their canonical form. Each entry lists the
/// raw variants observed in the scraped pages; iteration order is part of
/// the contract, the first matching entry wins.
type TrophyTable = &'static [(&'static str, &'static [&'static str])];

const NORMALIZED_MALE_TROPHIES: TrophyTable = &[
    ("ZARAUZKO IKURRIÑA", &["ZARAUZKO ESTROPADAK", "ZARAUZKO IKURRIÑA"]),
    ("HONDARRIBIKO IKURRIÑA", &["HONDARRIBIKO IKURRIÑA", "HONDARRIBIKO BANDERA"]),
    ("EL CORREO IKURRIÑA", &["EL CORREO IKURRIÑA", "IKURRIÑA EL CORREO"]),
    ("GRAN PREMIO EL CORTE INGLÉS", &["EL CORTE"]),
    ("BANDERA MARINA DE CUDEYO", &["MARINA CUDEYO", "MARINA DE CUDEYO"]),
    ("GRAN PREMIO FANDICOSTA", &["GRAN PREMIO FANDICOSTA", "GP FANDICOSTA"]),
    ("BANDEIRA CIDADE DE FERROL", &["MIGUEL DERUNGS"]),
    ("BANDEIRA OUTÓN Y FERNÁNDEZ", &["OUTÓN Y FERNÁNDEZ", "OUTÓN FERNÁNDEZ", "OUTON FERNÁNDEZ"]),
];

const NORMALIZED_FEMALE_TROPHIES: TrophyTable = &[
    ("GRAN PREMIO FANDICOSTA FEMININO", &["GRAN PREMIO FANDICOSTA", "GP FANDICOSTA"]),
    ("BANDEIRA FEMININA CIDADE DE FERROL", &["MIGUEL DERUNGS"]),
];

/// Literal substring corrections, applied in order.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("IKURIÑA", "IKURRIÑA"),
    ("KOFRADIA", "KOFRADÍA"),
    ("RECICLAMOS LA LUZ", ""),
    ("PIRATA COM", "PIRATA.COM"),
    ("PAY OFF", "PLAY OFF"),
];

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['".:ª]"#).unwrap());
static GP_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"G\.? ?P\.?").unwrap());
static TJ_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r" T\.? ?J\.?").unwrap());
static B_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"B\.? ").unwrap());

/// Reduces a scraped trophy title to its canonical name.
///
/// The stages are strictly ordered: clean, amend, deacronym, then the
/// gender-specific variant table. The same raw title can canonicalize
/// differently for male and female races (several trophies keep separate
/// female editions under a different name).
pub fn normalize_trophy_name(name: &str, is_female: bool) -> String {
    let name = whitespaces_clean(name).to_uppercase();
    let name = amend_trophy_name(&name);
    let mut name = deacronym_trophy_name(&name);

    let normalizations = if is_female {
        NORMALIZED_FEMALE_TROPHIES
    } else {
        NORMALIZED_MALE_TROPHIES
    };
    // specific trophy normalizations: an exact variant hit or a variant
    // appearing inside a longer title both map to the canonical name
    for (canonical, variants) in normalizations {
        if variants.iter().any(|v| name == *v || name.contains(v)) {
            name = (*canonical).to_string();
            break;
        }
    }

    whitespaces_clean(&name)
}

pub fn deacronym_trophy_name(name: &str) -> String {
    let name = GP_ACRONYM.replace_all(name, "GRAN PREMIO");
    let name = TJ_ACRONYM.replace_all(&name, " TIERRA DE JÚBILO");
    let name = B_ACRONYM.replace_all(&name, "BANDERA ");

    whitespaces_clean(&name)
}

pub fn amend_trophy_name(name: &str) -> String {
    let mut name = PUNCTUATION.replace_all(name, " ").to_string();

    name = name.replace('-', " - ");
    for (misspelling, correction) in MISSPELLINGS {
        name = name.replace(misspelling, correction);
    }
    whitespaces_clean(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_selects_the_variant_table() {
        assert_eq!(
            normalize_trophy_name("g.p. fandicosta", true),
            "GRAN PREMIO FANDICOSTA FEMININO"
        );
        assert_eq!(normalize_trophy_name("g.p. fandicosta", false), "GRAN PREMIO FANDICOSTA");
    }

    #[test]
    fn test_substring_variant_matches_longer_titles() {
        assert_eq!(
            normalize_trophy_name("BANDERA EL CORTE INGLES DONOSTIA", false),
            "GRAN PREMIO EL CORTE INGLÉS"
        );
        assert_eq!(
            normalize_trophy_name("MEMORIAL MIGUEL DERUNGS 2023", false),
            "BANDEIRA CIDADE DE FERROL"
        );
        assert_eq!(
            normalize_trophy_name("MEMORIAL MIGUEL DERUNGS 2023", true),
            "BANDEIRA FEMININA CIDADE DE FERROL"
        );
    }

    #[test]
    fn test_misspellings_are_amended() {
        assert_eq!(normalize_trophy_name("ZARAUZKO IKURIÑA", false), "ZARAUZKO IKURRIÑA");
        assert!(normalize_trophy_name("KOFRADIA IGULDIN", false).contains("KOFRADÍA"));
    }

    #[test]
    fn test_deacronym() {
        assert_eq!(deacronym_trophy_name("G.P. ASTILLERO"), "GRAN PREMIO ASTILLERO");
        assert_eq!(deacronym_trophy_name("GP ASTILLERO"), "GRAN PREMIO ASTILLERO");
        assert_eq!(deacronym_trophy_name("BANDEIRA T.J. VIRXE DA GUÍA"), "BANDEIRA TIERRA DE JÚBILO VIRXE DA GUÍA");
        assert_eq!(deacronym_trophy_name("B. CIUDAD DE CASTRO"), "BANDERA CIUDAD DE CASTRO");
    }

    #[test]
    fn test_clean_uppercases_and_collapses() {
        assert_eq!(
            normalize_trophy_name("  bandeira   concello de   muros ", false),
            "BANDEIRA CONCELLO DE MUROS"
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for is_female in [false, true] {
            let table = if is_female {
                NORMALIZED_FEMALE_TROPHIES
            } else {
                NORMALIZED_MALE_TROPHIES
            };
            for (canonical, _) in table {
                assert_eq!(normalize_trophy_name(canonical, is_female), *canonical);
            }
            for raw in ["g.p. fandicosta", "XXII BANDEIRA CONCELLO DE BUEU", "zarauzko ikuriña"] {
                let once = normalize_trophy_name(raw, is_female);
                assert_eq!(normalize_trophy_name(&once, is_female), once);
            }
        }
    }
}
