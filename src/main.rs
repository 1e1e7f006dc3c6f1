use clap::Parser;
use slidesplit::config::DEFAULT_CONFIG_FILE;
use slidesplit::{
    logging, Cli, OutputFormatter, OutputMode, SlideSplit, SlideSplitError, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    logging::init_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let slidesplit = match SlideSplit::from_cli(&cli) {
        Ok(slidesplit) => slidesplit,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&slidesplit);
    }

    match slidesplit.extract_slides() {
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "extraction aborted");
            slidesplit.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    match SlideSplit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nslidesplit picks up {} from the working directory automatically;", DEFAULT_CONFIG_FILE);
            println!("any other name can be passed with --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(slidesplit: &SlideSplit) -> i32 {
    let formatter = slidesplit.output_formatter();
    let config = slidesplit.config();

    formatter.warning("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    let plan = match slidesplit.plan_extraction() {
        Ok(plan) => plan,
        Err(e) => {
            slidesplit.handle_error(&e);
            return e.exit_code();
        }
    };

    if !formatter.is_quiet() && formatter.mode() != OutputMode::Json {
        println!("  Source:    {}", config.source.input.display());
        println!("  Markers:   {} ... {}", config.markers.begin, config.markers.end);
        println!("  Directory: {}", config.output.directory.display());
        println!();
    }

    for unit in &plan {
        formatter.planned_unit(unit.index, &unit.path, unit.bytes, unit.start_line);
    }

    formatter.print_separator();
    formatter.success(&format!("Dry run found {} slides", plan.len()));

    0
}

fn print_startup_error(error: &SlideSplitError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
