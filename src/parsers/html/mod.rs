use scraper::Html;

use crate::error::Result;
use crate::models::{Datasource, Race, RaceName};

pub mod act;
pub mod lgt;

pub use act::ActHtmlParser;
pub use lgt::LgtHtmlParser;

/// Everything a parser needs to turn one race's pages into a `Race`.
pub struct RaceContext<'a> {
    pub document: &'a Html,
    /// Results table, when the datasource serves it on a separate page.
    pub results: Option<&'a Html>,
    pub race_id: &'a str,
    pub is_female: bool,
}

/// Per-datasource HTML parsing. Implementations own the site-specific
/// selectors and the hardcoded name/edition rules of their federation.
pub trait HtmlParser {
    fn datasource(&self) -> Datasource;

    /// Parses the full details of a race. Returns `Ok(None)` when the page
    /// exists but holds no usable race (placeholder titles, empty tables).
    fn parse_race(&self, ctx: &RaceContext<'_>) -> Result<Option<Race>>;

    /// Extracts the race ids listed in a yearly index page.
    fn parse_race_ids(&self, document: &Html) -> Vec<String>;

    /// Extracts the race ids and raw titles listed in a yearly index page.
    fn parse_race_names(&self, document: &Html) -> Vec<RaceName>;
}
