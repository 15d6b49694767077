pub mod forecast;
pub mod init;
pub mod simulate;

use std::path::Path;

use gw_simulation::Scenario;

/// Load a scenario file, or the built-in demo when no path is given.
fn load_scenario(path: Option<&Path>) -> Result<Scenario, String> {
    match path {
        Some(path) => Scenario::load(path).map_err(|e| e.to_string()),
        None => Scenario::demo().map_err(|e| e.to_string()),
    }
}

/// A ten-cell bar for a 0-1 ratio.
fn ratio_bar(ratio: f64) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * 10.0).round() as usize;
    format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(10_usize.saturating_sub(filled))
    )
}
