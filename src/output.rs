use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::models::Race;

/// Prints the races as pretty JSON to stdout.
pub fn print_json(races: &[Race]) -> Result<()> {
    for race in races {
        println!("{}", race.to_json()?);
    }
    Ok(())
}

/// Saves the races to `<dir>/<file_name>.csv`, one row per participant.
pub fn save_csv(races: &[Race], dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{file_name}.csv"));
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record([
        "name",
        "date",
        "league",
        "town",
        "organizer",
        "gender",
        "modality",
        "type",
        "datasource",
        "race_ids",
        "cancelled",
        "club",
        "participant",
        "lane",
        "series",
        "laps",
        "distance",
        "disqualified",
    ])?;

    for race in races {
        let race_ids = race.race_ids.join(";");
        for participant in &race.participants {
            let lane = participant.lane.map(|l| l.to_string()).unwrap_or_default();
            let series = participant.series.map(|s| s.to_string()).unwrap_or_default();
            let laps = participant.laps.join(";");
            let distance = participant.distance.map(|d| d.to_string()).unwrap_or_default();
            writer.write_record([
                race.name.as_str(),
                race.date.as_str(),
                race.league.as_deref().unwrap_or(""),
                race.town.as_deref().unwrap_or(""),
                race.organizer.as_deref().unwrap_or(""),
                race.gender.as_deref().unwrap_or(""),
                race.modality.as_str(),
                race.race_type.as_str(),
                race.datasource.as_str(),
                race_ids.as_str(),
                if race.cancelled { "true" } else { "false" },
                participant.club_name.as_str(),
                participant.participant.as_str(),
                lane.as_str(),
                series.as_str(),
                laps.as_str(),
                distance.as_str(),
                if participant.disqualified { "true" } else { "false" },
            ])?;
        }
    }

    writer.flush()?;
    info!("saved {} races to {}", races.len(), path.display());
    Ok(path)
}
