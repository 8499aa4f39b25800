//! Shared vocabulary for the parsed race data. The scraped pages mix
//! Spanish, Galician and Basque; everything is stored with these fixed tags.

pub const GENDER_MALE: &str = "MALE";
pub const GENDER_FEMALE: &str = "FEMALE";

pub const CATEGORY_ABSOLUT: &str = "ABSOLUT";

// Boat modality. Only traineras are scraped for now.
pub const RACE_TRAINERA: &str = "TRAINERA";

// Race types: all boats racing at once vs. one-by-one against the clock.
pub const RACE_CONVENTIONAL: &str = "CONVENTIONAL";
pub const RACE_TIME_TRIAL: &str = "TIME_TRIAL";

// Standard trainera regatta distances in meters.
pub const TRAINERA_DISTANCE: u32 = 5556;
pub const FEMALE_TRAINERA_DISTANCE: u32 = 2778;
