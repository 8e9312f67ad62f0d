use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vibesync-cli", version, about = "VibeSync CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Flow score charts
    Flow {
        #[command(subcommand)]
        action: commands::flow::FlowAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Ambience track selection
    Ambience {
        #[command(subcommand)]
        action: commands::ambience::AmbienceAction,
    },
    /// Ask the advisory service for a theme/music pairing
    Adapt {
        /// Override (and remember) the self-reported mood
        #[arg(long)]
        mood: Option<vibesync_core::Mood>,
    },
    /// Turn an end-of-day reflection into a summary and mantra
    Reflect {
        /// Free-text reflection on the day
        text: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Flow { action } => commands::flow::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Ambience { action } => commands::ambience::run(action),
        Commands::Adapt { mood } => commands::advise::run_adapt(mood),
        Commands::Reflect { text } => commands::advise::run_reflect(&text),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
