use std::path::Path;

use wm_match::Resolver;

pub fn run(file: &Path, prefix: &str) -> Result<(), String> {
    let directory = super::load_snapshot(file)?;
    let candidates = directory.snapshot(|_| true);

    let resolver = Resolver::default();
    for name in resolver.suggestions(prefix, &candidates) {
        println!("{name}");
    }

    Ok(())
}
