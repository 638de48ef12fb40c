//! CLI frontend for the Dungeon Master helper: world calendar and encounters.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use dmh_encounter::CreatureDraft;
use tracing::debug;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "dmh",
    about = "Dungeon Master helper: world calendar and encounter tracker",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the saved world date and encounters
    #[arg(long, env = "DMH_DATA_DIR", default_value = ".dmh", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current world date, weekday, moon and festivals
    Date,

    /// Move the world clock forward (or back, with negative values)
    Advance {
        /// Minutes to add
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,

        /// Hours to add
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<i64>,

        /// Days to add
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
    },

    /// Set the world clock to a specific date
    Set {
        /// Year
        year: i64,

        /// Season (spring, summer, autumn, winter)
        season: String,

        /// Day of the season (1-30)
        day: u32,

        /// Hour of the day (0-23)
        #[arg(long, default_value = "0")]
        hour: u32,

        /// Minute of the hour (0-59)
        #[arg(long, default_value = "0")]
        minute: u32,
    },

    /// Reset the world clock to the epoch (year 1000, spring 1, 05:00)
    Reset,

    /// Display a season as a weekday-aligned grid
    Grid {
        /// Year (default: current year)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i64>,

        /// Season (default: current season)
        #[arg(long)]
        season: Option<String>,
    },

    /// List the festival calendar
    Events {
        /// Only show one season
        #[arg(long)]
        season: Option<String>,
    },

    /// Manage saved encounters
    Encounter {
        #[command(subcommand)]
        command: EncounterCommands,
    },
}

#[derive(Subcommand)]
enum EncounterCommands {
    /// List saved encounters
    List,

    /// Save a new, empty encounter
    New {
        /// Title of the encounter
        title: String,
    },

    /// Change the title of a saved encounter
    Rename {
        /// Saved encounter id
        id: String,

        /// New title
        title: String,
    },

    /// Add creatures to an encounter
    Add {
        /// Saved encounter id
        id: String,

        /// Creature name (default: "Creature #<n>")
        #[arg(long, default_value = "")]
        name: String,

        /// Hit points (current and maximum)
        #[arg(long, allow_negative_numbers = true)]
        hp: Option<i64>,

        /// Armour class, a number or free text such as "15 (shield)"
        #[arg(long, default_value = "")]
        ac: String,

        /// Initiative
        #[arg(long, allow_negative_numbers = true)]
        init: Option<i64>,

        /// Number of identical creatures to add
        #[arg(long, default_value = "1")]
        qty: u32,
    },

    /// Change fields of a creature
    Edit {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Current hit points
        #[arg(long, allow_negative_numbers = true)]
        hp: Option<i64>,

        /// Maximum hit points
        #[arg(long, allow_negative_numbers = true)]
        max_hp: Option<i64>,

        /// Initiative
        #[arg(long, allow_negative_numbers = true)]
        init: Option<i64>,

        /// Armour class
        #[arg(long)]
        ac: Option<String>,

        /// Mark the creature as dead
        #[arg(long, conflicts_with = "alive")]
        dead: bool,

        /// Mark the creature as alive
        #[arg(long)]
        alive: bool,
    },

    /// Remove a creature from an encounter
    Remove {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,
    },

    /// Attach a note to a creature
    Note {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// Note text
        text: String,
    },

    /// Remove a note from a creature
    Unnote {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// Note id
        note: i64,
    },

    /// Give a creature empty spell slot tables
    Caster {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,
    },

    /// Set spell slots of one level
    Slot {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// Spell level (1-9)
        level: u8,

        /// Slots available
        #[arg(long, allow_negative_numbers = true)]
        total: Option<i64>,

        /// Slots spent
        #[arg(long, allow_negative_numbers = true)]
        used: Option<i64>,
    },

    /// Add a limited-use spell or ability
    Spell {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// Spell label
        label: String,

        /// Uses available
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        uses: i64,
    },

    /// Remove a spell by its key
    Unspell {
        /// Saved encounter id
        id: String,

        /// Creature id
        creature: i64,

        /// Spell key, as shown by `encounter show`
        key: String,
    },

    /// Import a battle tracker JSON file and save it
    Import {
        /// JSON file to import
        file: PathBuf,

        /// Title for the saved encounter
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Export a saved encounter as battle tracker JSON
    Export {
        /// Saved encounter id
        id: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the creatures of a saved encounter in initiative order
    Show {
        /// Saved encounter id
        id: String,
    },

    /// Delete a saved encounter
    Delete {
        /// Saved encounter id
        id: String,
    },

    /// Save a copy of an encounter
    Duplicate {
        /// Saved encounter id
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = CliConfig::default().with_data_dir(cli.data_dir);
    debug!(data_dir = %config.data_dir.display(), "using data directory");

    let result = match cli.command {
        Commands::Date => commands::date::show(&config),
        Commands::Advance {
            minutes,
            hours,
            days,
        } => commands::date::advance(&config, minutes, hours, days),
        Commands::Set {
            year,
            season,
            day,
            hour,
            minute,
        } => commands::date::set(&config, year, &season, day, hour, minute),
        Commands::Reset => commands::date::reset(&config),
        Commands::Grid { year, season } => commands::grid::run(&config, year, season.as_deref()),
        Commands::Events { season } => commands::events::run(season.as_deref()),
        Commands::Encounter { command } => match command {
            EncounterCommands::List => commands::encounter::list(&config),
            EncounterCommands::New { title } => commands::encounter::new(&config, &title),
            EncounterCommands::Rename { id, title } => {
                commands::encounter::rename(&config, &id, &title)
            }
            EncounterCommands::Add {
                id,
                name,
                hp,
                ac,
                init,
                qty,
            } => {
                let mut draft = CreatureDraft::named(name).with_ac(ac).with_quantity(qty);
                draft.hp = hp;
                draft.initiative = init;
                commands::encounter::add(&config, &id, &draft)
            }
            EncounterCommands::Edit {
                id,
                creature,
                name,
                hp,
                max_hp,
                init,
                ac,
                dead,
                alive,
            } => {
                let changes = commands::encounter::CreatureChanges {
                    name,
                    hp,
                    max_hp,
                    initiative: init,
                    ac,
                    alive: if dead {
                        Some(false)
                    } else if alive {
                        Some(true)
                    } else {
                        None
                    },
                };
                commands::encounter::edit(&config, &id, creature, changes)
            }
            EncounterCommands::Remove { id, creature } => {
                commands::encounter::remove(&config, &id, creature)
            }
            EncounterCommands::Note { id, creature, text } => {
                commands::encounter::note(&config, &id, creature, &text)
            }
            EncounterCommands::Unnote { id, creature, note } => {
                commands::encounter::unnote(&config, &id, creature, note)
            }
            EncounterCommands::Caster { id, creature } => {
                commands::encounter::caster(&config, &id, creature)
            }
            EncounterCommands::Slot {
                id,
                creature,
                level,
                total,
                used,
            } => commands::encounter::slot(&config, &id, creature, level, total, used),
            EncounterCommands::Spell {
                id,
                creature,
                label,
                uses,
            } => commands::encounter::spell(&config, &id, creature, &label, uses),
            EncounterCommands::Unspell { id, creature, key } => {
                commands::encounter::unspell(&config, &id, creature, &key)
            }
            EncounterCommands::Import { file, title } => {
                commands::encounter::import(&config, &file, title.as_deref())
            }
            EncounterCommands::Export { id, output } => {
                commands::encounter::export(&config, &id, output.as_deref())
            }
            EncounterCommands::Show { id } => commands::encounter::show(&config, &id),
            EncounterCommands::Delete { id } => commands::encounter::delete(&config, &id),
            EncounterCommands::Duplicate { id } => commands::encounter::duplicate(&config, &id),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
