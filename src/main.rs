use clap::Parser;
use student_roster::utils::{logger, validation::Validate};
use student_roster::{CliConfig, Student, StudentCollection};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting student-roster CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match run(&config) {
        Ok(()) => {
            tracing::info!("✅ Roster run completed successfully");
        }
        Err(e) => {
            tracing::error!("❌ Roster run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> student_roster::Result<()> {
    let mut roster = StudentCollection::load_from_file(&config.roster_path)?;

    println!("=== All students ===");
    for student in &roster {
        println!(
            "Student #{}: {} {}",
            student.number,
            student.surname(),
            student.first_name()
        );
    }

    println!("\n=== Sorted by first name ===");
    for student in roster.sort_by_string_field("first_name")? {
        println!("{}", student.first_name());
    }

    let new_student = Student::new(
        21,
        "Anton",
        "Pipisonov",
        "Arturovich",
        "pipison16@example.com",
        "UIDb-21",
    )?;
    let sample_group = new_student.group.clone();
    roster.add_student(new_student)?;

    let group = config.group.clone().unwrap_or(sample_group);
    println!("\n=== Students of group {} ===", group);
    for student in roster.students_by_group(&group) {
        println!("{}, group: {}", student.surname(), student.group);
    }

    if let Some(output) = &config.output {
        roster.save_to_file(output)?;
        println!("\n📁 Roster dumped to: {}", output);
    }

    Ok(())
}
