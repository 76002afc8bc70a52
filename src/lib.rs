pub mod config;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use domain::collection::StudentCollection;
pub use domain::model::{Person, Student, StudentField};
pub use utils::error::{Result, RosterError};
