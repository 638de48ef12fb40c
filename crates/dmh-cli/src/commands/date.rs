use colored::Colorize;
use dmh_calendar::{CALENDAR_EVENTS, WorldClock, WorldDate};

use crate::config::CliConfig;

pub fn show(config: &CliConfig) -> Result<(), String> {
    let clock = WorldClock::new(config.date_store().load());
    print_clock(&clock);
    Ok(())
}

pub fn advance(
    config: &CliConfig,
    minutes: Option<i64>,
    hours: Option<i64>,
    days: Option<i64>,
) -> Result<(), String> {
    if minutes.is_none() && hours.is_none() && days.is_none() {
        return Err("nothing to advance: pass --minutes, --hours or --days".into());
    }

    let store = config.date_store();
    let mut clock = WorldClock::new(store.load());
    let before = clock.current();

    if let Some(days) = days {
        clock.advance_days(days);
    }
    if let Some(hours) = hours {
        clock.advance_hours(hours);
    }
    if let Some(minutes) = minutes {
        clock.advance_minutes(minutes);
    }

    save(config, &clock.current())?;
    println!("  {} {}", "was".dimmed(), before);
    print_clock(&clock);
    Ok(())
}

pub fn set(
    config: &CliConfig,
    year: i64,
    season: &str,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<(), String> {
    let season = super::parse_season(season)?;
    let date = WorldDate::new(year, season, day, hour, minute)
        .validated()
        .map_err(|e| e.to_string())?;

    let mut clock = WorldClock::default();
    clock.set(date);
    save(config, &clock.current())?;
    print_clock(&clock);
    Ok(())
}

pub fn reset(config: &CliConfig) -> Result<(), String> {
    let mut clock = WorldClock::new(config.date_store().load());
    clock.reset();
    save(config, &clock.current())?;
    print_clock(&clock);
    Ok(())
}

fn save(config: &CliConfig, date: &WorldDate) -> Result<(), String> {
    let store = config.date_store();
    store
        .save(date)
        .map_err(|e| format!("cannot save world date to {}: {e}", store.path().display()))
}

fn print_clock(clock: &WorldClock) {
    let moon = clock.moon();
    println!("  {}", clock.current().to_string().bold());
    println!("  weekday: {}", clock.weekday().label());
    println!("  moon:    {} {}", moon.phase.symbol(), moon.label);

    let events = clock.events_today(CALENDAR_EVENTS);
    if events.is_empty() {
        return;
    }
    println!();
    for event in events {
        println!("  {} {}", "*".yellow(), event.title.bold());
        println!("    {}", event.description.dimmed());
    }
}
