use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PARENTHESIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static LEADING_ROMAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVXLCDM]+\b").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})").unwrap());

/// Collapses every whitespace run to a single space and trims the ends.
pub fn whitespaces_clean(value: &str) -> String {
    WHITESPACES.replace_all(value.trim(), " ").trim().to_string()
}

pub fn remove_parenthesis(value: &str) -> String {
    whitespaces_clean(&PARENTHESIS.replace_all(value, ""))
}

/// Returns the roman numeral a phrase starts with, if any.
pub fn find_roman(value: &str) -> Option<&str> {
    LEADING_ROMAN.find(value).map(|m| m.as_str())
}

pub fn roman_to_int(value: &str) -> Option<u16> {
    fn digit(c: char) -> Option<u16> {
        match c {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            'L' => Some(50),
            'C' => Some(100),
            'D' => Some(500),
            'M' => Some(1000),
            _ => None,
        }
    }

    let mut total: u16 = 0;
    let mut prev: u16 = 0;
    for c in value.chars().rev() {
        let d = digit(c)?;
        if d < prev {
            total = total.checked_sub(d)?;
        } else {
            total = total.checked_add(d)?;
            prev = d;
        }
    }
    if total > 0 {
        Some(total)
    } else {
        None
    }
}

/// Finds the first `dd-mm-yyyy` or `dd/mm/yyyy` date embedded in a phrase.
pub fn find_date(value: &str) -> Option<chrono::NaiveDate> {
    let captures = DATE.captures(value)?;
    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, month, day)
}
