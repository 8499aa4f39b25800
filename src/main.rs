use std::path::Path;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use rscraping::models::Datasource;
use rscraping::{find_race, find_race_ids, find_race_names, logging, output};

#[derive(Parser)]
#[command(name = "rscraping")]
#[command(about = "Trainera rowing race results scraper")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve and normalize one race from a datasource
    FindRace {
        /// Datasource from where to retrieve. Available: act, lgt
        datasource: String,
        /// Race to find
        race_id: String,
        /// Search in the female pages
        #[arg(long)]
        female: bool,
        /// Save the output to a csv file
        #[arg(long)]
        save: bool,
    },
    /// List the race ids celebrated in a year
    RaceIds {
        /// Datasource from where to retrieve
        datasource: String,
        /// Year to list
        year: i32,
        /// Search in the female pages
        #[arg(long)]
        female: bool,
    },
    /// List the raw race names celebrated in a year
    RaceNames {
        /// Datasource from where to retrieve
        datasource: String,
        /// Year to list
        year: i32,
        /// Search in the female pages
        #[arg(long)]
        female: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // held until exit so the file layer flushes everything
    let _guard = logging::init_logging("rscraping=info", Path::new("logs"))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::FindRace { datasource, race_id, female, save } => {
            let datasource = Datasource::from_str(&datasource)?;
            info!("finding race_id={race_id} in datasource={datasource} female={female}");

            match find_race(&race_id, datasource, female).await? {
                Some(race) => {
                    output::print_json(std::slice::from_ref(&race))?;
                    if save {
                        let file_name =
                            format!("race_{race_id}_{}", datasource.to_string().to_uppercase());
                        let path = output::save_csv(&[race], Path::new("output"), &file_name)?;
                        println!("saved to {}", path.display());
                    }
                }
                None => {
                    error!("not found race for race_id={race_id}");
                    anyhow::bail!("not found race for race_id={race_id}");
                }
            }
        }
        Commands::RaceIds { datasource, year, female } => {
            let datasource = Datasource::from_str(&datasource)?;
            for race_id in find_race_ids(year, datasource, female).await? {
                println!("{race_id}");
            }
        }
        Commands::RaceNames { datasource, year, female } => {
            let datasource = Datasource::from_str(&datasource)?;
            for race_name in find_race_names(year, datasource, female).await? {
                println!("{}\t{}", race_name.race_id, race_name.name);
            }
        }
    }

    Ok(())
}
