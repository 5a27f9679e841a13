use super::Cli;
use crate::kibana::Generator;
use std::path::PathBuf;

pub fn run(cli: &Cli) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let generator = Generator::new(
        cli.index.as_str(),
        &cli.beat_name,
        &cli.beat_dir,
        cli.kibana_version.as_str(),
    )?;

    let written: Vec<PathBuf> = generator
        .generate()?
        .into_iter()
        .map(|pattern| pattern.path)
        .collect();

    for path in &written {
        println!("Generated index pattern: {}", path.display());
    }

    Ok(written)
}
