use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "learnpath", version, about = "learnpath diagnostic quiz CLI")]
struct Cli {
    /// Log state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnostic quiz
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Personalized learning roadmap
    Roadmap {
        #[command(subcommand)]
        action: commands::roadmap::RoadmapAction,
    },
    /// Course catalog
    Course {
        #[command(subcommand)]
        action: commands::course::CourseAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Roadmap { action } => commands::roadmap::run(action),
        Commands::Course { action } => commands::course::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
