pub mod generate;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kibana-index-pattern")]
#[command(about = "Generate Kibana index patterns from a beat's fields.yml", long_about = None)]
pub struct Cli {
    /// Index name the pattern matches, e.g. `metricbeat-*`
    #[arg(long)]
    pub index: String,

    /// Output file name; non-alphanumeric characters are stripped
    #[arg(long)]
    pub beat_name: String,

    /// Beat directory containing fields.yml
    #[arg(long, default_value = ".")]
    pub beat_dir: PathBuf,

    /// Kibana version recorded in the default pattern
    #[arg(long = "version")]
    pub kibana_version: String,
}
