//! Rule-based cleanup of the free text scraped from the federation pages.
//!
//! Every function here is a pure transform over fixed lookup tables: the
//! scraped pages exhibit a known, enumerable set of typos and formatting
//! defects, and each rule below encodes one of them.

pub mod clubs;
pub mod races;
pub mod times;
pub mod towns;
pub mod trophies;

pub use clubs::normalize_club_name;
pub use races::{find_race_sponsor, normalize_name_parts, normalize_race_name, remove_day_indicator};
pub use times::{normalize_lap_time, normalize_spanish_months, LapTime};
pub use towns::normalize_town;
pub use trophies::normalize_trophy_name;
