use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path, name: &str) -> Result<(), String> {
    let directory = super::load_snapshot(file)?;

    let warp = directory
        .get(name)
        .ok_or_else(|| format!("warp not found: \"{name}\""))?;

    println!(
        "  {} [{}]",
        warp.name.bold(),
        warp.visibility().to_string().dimmed()
    );
    println!();

    let location = warp.location();
    println!("  world:    {}", location.world);
    println!("  position: {}", location.position);
    println!(
        "  rotation: pitch {:.1}, yaw {:.1}",
        location.rotation.pitch, location.rotation.yaw
    );
    println!("  creator:  {}", warp.creator());
    println!("  visits:   {}", warp.visits());
    println!("  created:  {}", warp.created_at.format("%Y-%m-%d %H:%M UTC"));

    if let Some(message) = warp.welcome_message() {
        println!();
        println!("  welcome: {message}");
    }

    let mut players: Vec<String> = warp.invited_players().map(|p| p.to_string()).collect();
    players.sort();
    if !players.is_empty() {
        println!();
        println!("  invited players: {}", players.join(", "));
    }

    let mut groups: Vec<&str> = warp.invited_groups().collect();
    groups.sort_unstable();
    if !groups.is_empty() {
        println!("  invited groups:  {}", groups.join(", "));
    }

    Ok(())
}
