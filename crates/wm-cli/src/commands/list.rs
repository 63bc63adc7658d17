use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path, world: Option<&str>, creator: Option<&str>) -> Result<(), String> {
    let directory = super::load_snapshot(file)?;

    let world = world.map(str::to_lowercase);
    let creator = creator.map(str::to_lowercase);
    let warps = directory.snapshot(|warp| {
        world
            .as_deref()
            .is_none_or(|w| warp.location().world.0.to_string().starts_with(w))
            && creator
                .as_deref()
                .is_none_or(|c| warp.creator().0.to_string().starts_with(c))
    });

    if warps.is_empty() {
        println!("  No warps found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Visibility", "Visits", "World"]);

    for warp in &warps {
        table.add_row(vec![
            warp.name.clone(),
            warp.visibility().to_string(),
            warp.visits().to_string(),
            warp.location().world.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} warps", warps.len());

    Ok(())
}
