use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gw_simulation::{WeatherConfig, WeatherSystem, WeatherType};

pub fn run(ticks: u64, seed: u64, start: Option<&str>) -> Result<(), String> {
    let initial = match start {
        Some(name) => name.parse::<WeatherType>().map_err(|e| e.to_string())?,
        None => WeatherType::default(),
    };
    let config = WeatherConfig {
        initial,
        ..WeatherConfig::default()
    };
    let mut weather = WeatherSystem::new(config).map_err(|e| e.to_string())?;
    let mut rng = StdRng::seed_from_u64(seed);

    println!(
        "  {} {}",
        "Forecast".bold(),
        format!("({ticks} ticks, seed={seed}, starting {initial})").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tick", "Weather", "Intensity", "Remaining", ""]);

    let mut changes = 0;
    for tick in 1..=ticks {
        let update = weather.update(tick, &mut rng).map_err(|e| e.to_string())?;
        let current = weather.current();
        let marker = match update.changed {
            Some(change) => {
                changes += 1;
                format!("{} -> {}", change.from, change.to)
            }
            None => String::new(),
        };
        table.add_row(vec![
            tick.to_string(),
            current.kind.to_string(),
            current.intensity.to_string(),
            current.remaining_duration.to_string(),
            marker,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {changes} weather changes");
    Ok(())
}
