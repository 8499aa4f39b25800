use once_cell::sync::Lazy;
use regex::Regex;

use crate::strings::{remove_parenthesis, whitespaces_clean};

static PROVINCE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",? ?(A CORUÑA|PONTEVEDRA|LUGO|GIPUZKOA|GUIPÚZCOA|BIZKAIA|VIZCAYA|CANTABRIA)$").unwrap());

/// Normalizes a scraped town cell: uppercase, no parenthesized qualifiers,
/// no trailing province.
pub fn normalize_town(value: &str) -> String {
    let town = whitespaces_clean(value).to_uppercase();
    let town = remove_parenthesis(&town);
    let town = PROVINCE_SUFFIX.replace(&town, "");
    whitespaces_clean(&town)
}
