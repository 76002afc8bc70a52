use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "student-roster")]
#[command(about = "Load, query and dump a student roster from a comma-separated file")]
pub struct CliConfig {
    /// Path to the roster file (header line + one student per line).
    #[arg(default_value = "studentsDB.csv")]
    pub roster_path: String,

    /// Only show students from this group.
    #[arg(long)]
    pub group: Option<String>,

    /// Dump the loaded roster to this path after the demo run.
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("roster_path", &self.roster_path)?;
        if let Some(output) = &self.output {
            validate_non_empty_string("output", output)?;
        }
        Ok(())
    }
}
