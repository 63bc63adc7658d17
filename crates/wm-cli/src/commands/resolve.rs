use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wm_match::{RandomPolicy, Resolver};

pub fn run(file: &Path, query: &str, seed: u64) -> Result<(), String> {
    let directory = super::load_snapshot(file)?;
    let candidates = directory.snapshot(|_| true);

    // Snapshot inspection has no per-world configuration; every world
    // present in the snapshot is eligible for random mode.
    let mut policy = RandomPolicy::new();
    for warp in &candidates {
        policy = policy.with_world(warp.location().world);
    }

    let resolver = Resolver::new(policy);
    let mut rng = StdRng::seed_from_u64(seed);

    match resolver.resolve(query, &candidates, &mut rng) {
        Ok(warp) => {
            println!(
                "  {} [{}]",
                warp.name.bold(),
                warp.visibility().to_string().dimmed()
            );
            println!(
                "  world {} at {}",
                warp.location().world,
                warp.location().position
            );
            Ok(())
        }
        Err(no_match) if no_match.suggestions.is_empty() => Err(no_match.to_string()),
        Err(no_match) => Err(format!(
            "{no_match}; did you mean: {}?",
            no_match.suggestions.join(", ")
        )),
    }
}
