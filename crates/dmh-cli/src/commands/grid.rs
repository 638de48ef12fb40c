use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use dmh_calendar::grid::leading_blanks;
use dmh_calendar::weekday::DAYS_PER_WEEK;
use dmh_calendar::{CALENDAR_EVENTS, DayCell, Weekday, build_season_grid};

use crate::config::CliConfig;

pub fn run(config: &CliConfig, year: Option<i64>, season: Option<&str>) -> Result<(), String> {
    let today = config.date_store().load();
    let year = year.unwrap_or(today.year);
    let season = match season {
        Some(raw) => super::parse_season(raw)?,
        None => today.season,
    };

    let cells = build_season_grid(year, season, CALENDAR_EVENTS);
    let blanks = leading_blanks(year, season);

    println!("  {} {}", season.label().bold(), year.to_string().dimmed());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(Weekday::ALL.iter().map(|w| w.short_label()).collect::<Vec<_>>());

    let mut slots: Vec<Option<&DayCell>> = vec![None; blanks];
    slots.extend(cells.iter().map(Some));
    let is_today =
        |cell: &DayCell| today.year == year && today.season == season && today.day == cell.day;

    for week in slots.chunks(DAYS_PER_WEEK as usize) {
        let row: Vec<Cell> = week
            .iter()
            .map(|slot| match *slot {
                Some(cell) => Cell::new(format_cell(cell, is_today(cell))),
                None => Cell::new(""),
            })
            .collect();
        table.add_row(row);
    }

    println!("{table}");

    let festivals: Vec<_> = cells
        .iter()
        .flat_map(|c| c.events.iter().map(move |e| (c.day, *e)))
        .collect();
    if !festivals.is_empty() {
        println!();
        for (day, event) in festivals {
            println!("  {:>2}  {}", day, event.title);
        }
    }

    Ok(())
}

fn format_cell(cell: &DayCell, today: bool) -> String {
    let marker = if cell.events.is_empty() { "" } else { "*" };
    let day = if today {
        format!("[{}]", cell.day)
    } else {
        cell.day.to_string()
    };
    format!("{day}{marker}\n{}", cell.moon.phase.symbol())
}
