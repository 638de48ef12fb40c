use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dmh_calendar::{CALENDAR_EVENTS, CalendarEvent};
use dmh_calendar::events::events_in_season;

pub fn run(season: Option<&str>) -> Result<(), String> {
    let events: Vec<&CalendarEvent> = match season {
        Some(raw) => events_in_season(super::parse_season(raw)?, CALENDAR_EVENTS),
        None => CALENDAR_EVENTS.iter().collect(),
    };

    if events.is_empty() {
        println!("  No festivals found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Season", "Day", "Festival", "Deity", "Tags"]);

    for event in &events {
        table.add_row(vec![
            event.season.label().to_string(),
            event.day.to_string(),
            event.title.to_string(),
            event.deity.map(|d| d.as_str()).unwrap_or("-").to_string(),
            event.tags.join(", "),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} festival{}",
        events.len().to_string().bold(),
        if events.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
