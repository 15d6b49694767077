use std::fs;
use std::path::Path;

use gw_simulation::scenario::DEMO_SCENARIO;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| format!("cannot create directory: {e}"))?;
    }
    fs::write(path, DEMO_SCENARIO).map_err(|e| format!("cannot write scenario: {e}"))?;

    println!("Created scenario {}", path.display());
    println!();
    println!("Get started:");
    println!("  # Edit the terrain, bestiary, and creatures");
    println!("  gw simulate --scenario {}", path.display());
    println!("  gw simulate --scenario {} --ticks 72 --verbose", path.display());

    Ok(())
}
