//! `ctxforge tools` — List built-in tools.

use ctxforge_tools::default_registry;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = default_registry();

    println!("🔧 Built-in tools ({})", registry.len());
    for def in registry.definitions() {
        println!("  {:<14} {}", def.name, def.description);
    }

    Ok(())
}
