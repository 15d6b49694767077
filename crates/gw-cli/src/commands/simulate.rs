use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use gw_simulation::creature::Behavior;
use gw_simulation::{CreatureEngine, SimEventKind, Simulation, WeatherSystem};

pub fn run(
    scenario: Option<&Path>,
    ticks: u64,
    seed: Option<u64>,
    verbose: bool,
    json: bool,
) -> Result<(), String> {
    let mut scenario = super::load_scenario(scenario)?;
    if let Some(seed) = seed {
        scenario = scenario.with_seed(seed);
    }
    let seed = scenario.config.seed;

    let mut sim = scenario
        .build()
        .map_err(|e| format!("simulation setup failed: {e}"))?;
    sim.run(ticks)
        .map_err(|e| format!("simulation error: {e}"))?;
    sim.commit()
        .map_err(|e| format!("simulation error: {e}"))?;

    if json {
        return print_json(&sim, &scenario.name, ticks, seed);
    }

    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        scenario.name,
        format!("({ticks} ticks, seed={seed})").dimmed()
    );
    println!(
        "  Day {}, {:05.2}h, {} events logged",
        sim.clock().day(),
        sim.clock().hour_of_day(),
        sim.events().len()
    );
    println!();

    print_events(&sim, verbose);
    print_weather(&sim);
    print_player(&sim);
    print_creatures(&sim);
    Ok(())
}

fn print_json(sim: &Simulation, name: &str, ticks: u64, seed: u64) -> Result<(), String> {
    let player = &sim.world().player;
    let creatures: Vec<_> = sim
        .get_system::<CreatureEngine>()
        .map(|engine| {
            engine
                .creatures()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "name": c.name(),
                        "disposition": c.disposition,
                        "behavior": c.behavior,
                        "position": c.position,
                        "satiation": c.satiation,
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let output = json!({
        "scenario": name,
        "ticks": ticks,
        "seed": seed,
        "environment": sim.environment(),
        "player": {
            "id": player.id,
            "hp": player.hp,
            "max_hp": player.max_hp,
            "body_temperature": player.body_temperature,
            "statuses": player.statuses,
            "position": player.position,
        },
        "creatures": creatures,
        "events": sim.events().events(),
    });
    let text = serde_json::to_string_pretty(&output).map_err(|e| format!("cannot encode: {e}"))?;
    println!("{text}");
    Ok(())
}

fn print_events(sim: &Simulation, verbose: bool) {
    let events: Vec<_> = sim
        .events()
        .events()
        .iter()
        .filter(|e| verbose || !e.kind.is_routine())
        .collect();
    let title = if verbose { "Event Log" } else { "Notable Events" };
    println!("  {}", title.bold().underline());
    println!();
    for event in &events {
        let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
        let desc = colorize_event(&event.kind, &event.description);
        println!("  {tick_label} {desc}");
    }
    if events.is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

fn print_weather(sim: &Simulation) {
    println!("  {}", "Weather".bold().underline());
    println!();

    let env = sim.environment();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Weather", "Intensity", "Remaining", "Visibility", "Ambient"]);
    let remaining = sim
        .get_system::<WeatherSystem>()
        .map(|w| format!("{} ticks", w.current().remaining_duration))
        .unwrap_or_else(|| "--".to_string());
    let ambient = env
        .ambient_temperature
        .map(|t| format!("{t:.1} C"))
        .unwrap_or_else(|| "--".to_string());
    table.add_row(vec![
        env.weather.to_string(),
        env.intensity.to_string(),
        remaining,
        format!("{:.0}%", env.visibility * 100.0),
        ambient,
    ]);
    println!("{table}");
    println!();
}

fn print_player(sim: &Simulation) {
    println!("  {}", "Player".bold().underline());
    println!();

    let player = &sim.world().player;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Player", "HP", "Body", "Position", "Statuses"]);
    let hp = format!(
        "[{}] {:.0}/{:.0}",
        super::ratio_bar(if player.max_hp > 0.0 { player.hp / player.max_hp } else { 0.0 }),
        player.hp,
        player.max_hp
    );
    let hp = if !player.is_alive() {
        hp.red().bold().to_string()
    } else if player.hp < player.max_hp * 0.3 {
        hp.yellow().to_string()
    } else {
        hp.green().to_string()
    };
    let statuses = if player.statuses.is_empty() {
        "--".to_string()
    } else {
        player.statuses.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    table.add_row(vec![
        player.id.to_string(),
        hp,
        format!("{:.1} C", player.body_temperature),
        player.position.to_string(),
        statuses,
    ]);
    println!("{table}");
    println!();
}

fn print_creatures(sim: &Simulation) {
    let Some(engine) = sim.get_system::<CreatureEngine>() else {
        return;
    };
    println!("  {}", "Creatures".bold().underline());
    println!();
    if engine.is_empty() {
        println!("  {}", "(none)".dimmed());
        println!();
        return;
    }

    let player = sim.world().player.position;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Creature",
        "Kind",
        "Disposition",
        "Behavior",
        "Position",
        "Distance",
        "Satiation",
    ]);
    for creature in engine.creatures() {
        let behavior = match creature.behavior {
            Behavior::Hunting => creature.behavior.to_string().red().to_string(),
            Behavior::Fleeing => creature.behavior.to_string().yellow().to_string(),
            Behavior::Eating => creature.behavior.to_string().green().to_string(),
            Behavior::Moving => creature.behavior.to_string().cyan().to_string(),
            Behavior::Idle => creature.behavior.to_string(),
        };
        table.add_row(vec![
            creature.id.to_string(),
            creature.name().to_string(),
            creature.disposition.to_string(),
            behavior,
            creature.position.to_string(),
            creature.position.chebyshev(player).to_string(),
            format!(
                "[{}] {:.0}/{:.0}",
                super::ratio_bar(creature.satiation_ratio()),
                creature.satiation,
                creature.max_satiation
            ),
        ]);
    }
    println!("{table}");
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::PlayerDowned { .. } => description.red().bold(),
        SimEventKind::CreatureAttacked { .. } => description.red(),
        SimEventKind::StatusGained { .. } | SimEventKind::DispositionEscalated { .. } => {
            description.yellow()
        }
        SimEventKind::StatusCleared { .. } | SimEventKind::CreatureAte { .. } => {
            description.green()
        }
        SimEventKind::WeatherChanged { .. } | SimEventKind::RegionalWeatherEnded { .. } => {
            description.blue()
        }
        SimEventKind::BehaviorChanged { .. } => description.cyan(),
        SimEventKind::CreatureMoved { .. } | SimEventKind::EffectExpired { .. } => {
            description.dimmed()
        }
        SimEventKind::Custom { .. } => description.normal(),
    }
}
