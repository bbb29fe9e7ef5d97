//! NAVDEN CLI - terminal client for the GPS-denied navigation backend.
//!
//! One-shot REST commands print text (or JSON with `--json`); `watch`,
//! `view`, `run --dashboard` and `demo` open the live dashboard.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::api::{self, ApiCommand, OutputFormat};
use commands::config::ConfigCommands;
use commands::demo::DemoArgs;
use commands::plan::PlanCommands;
use error::CliError;
use navden::model::SimulationRequest;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "navden")]
#[command(version = navden::VERSION)]
#[command(about = "GPS-denied UAV navigation dashboard", long_about = None)]
struct Cli {
    /// Backend base URL (overrides backend.url)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Print backend responses as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is up
    Health,

    /// Show backend capabilities, algorithms and simulated sensors
    Info,

    /// Run a full simulation and print its results
    Run {
        /// Simulated seconds
        #[arg(long, default_value = "90")]
        duration: f64,

        /// Integration step in seconds
        #[arg(long, default_value = "0.1")]
        dt: f64,

        /// Show the results in the dashboard, then keep polling the backend
        #[arg(long)]
        dashboard: bool,

        /// Seconds between polls with --dashboard
        #[arg(long, default_value = "2")]
        interval: f64,
    },

    /// Show the current navigation state
    State,

    /// Print recorded trajectory samples
    Trajectory {
        /// Maximum samples to fetch (defaults to backend.trajectory_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show mission metrics
    Metrics,

    /// Show the GPS jamming analysis
    Jamming,

    /// Advance the simulation
    Step {
        /// Number of steps
        #[arg(long, default_value = "1")]
        count: u32,
    },

    /// Reset the simulation
    Reset,

    /// Live dashboard over the backend telemetry stream
    Watch,

    /// Dashboard fed by polling the backend's REST endpoints
    View {
        /// Seconds between polls
        #[arg(long, default_value = "2")]
        interval: f64,
    },

    /// Fly the planned mission with the local guidance demo
    Demo(DemoArgs),

    /// Edit the mission plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let command = match cli.command {
        // Local commands need neither logging nor a runtime.
        Commands::Plan { command } => return commands::plan::run(command),
        Commands::Config { command } => return commands::config::run(command),
        Commands::Health => ApiCommand::Health,
        Commands::Info => ApiCommand::Info,
        Commands::Run {
            duration,
            dt,
            dashboard: true,
            interval,
        } => {
            let runner = CliRunner::new(cli.debug, cli.backend)?;
            let config = commands::view::poller_config(
                interval,
                runner.config().backend.trajectory_limit,
                Some(SimulationRequest { duration, dt }),
            )?;
            return commands::view::run(&runner, config);
        }
        Commands::Run { duration, dt, .. } => ApiCommand::Run { duration, dt },
        Commands::State => ApiCommand::State,
        Commands::Trajectory { limit } => {
            let runner = CliRunner::new(cli.debug, cli.backend)?;
            let limit = limit.unwrap_or(runner.config().backend.trajectory_limit);
            return run_api(&runner, ApiCommand::Trajectory { limit }, format);
        }
        Commands::Metrics => ApiCommand::Metrics,
        Commands::Jamming => ApiCommand::Jamming,
        Commands::Step { count } => ApiCommand::Step { count },
        Commands::Reset => ApiCommand::Reset,
        Commands::Watch => {
            let runner = CliRunner::new(cli.debug, cli.backend)?;
            return commands::watch::run(&runner);
        }
        Commands::View { interval } => {
            let runner = CliRunner::new(cli.debug, cli.backend)?;
            let config = commands::view::poller_config(
                interval,
                runner.config().backend.trajectory_limit,
                None,
            )?;
            return commands::view::run(&runner, config);
        }
        Commands::Demo(args) => {
            let runner = CliRunner::new(cli.debug, cli.backend)?;
            return commands::demo::run(&runner, args);
        }
    };

    let runner = CliRunner::new(cli.debug, cli.backend)?;
    run_api(&runner, command, format)
}

fn run_api(runner: &CliRunner, command: ApiCommand, format: OutputFormat) -> Result<(), CliError> {
    runner.log_startup(command.name());
    let client = runner.create_client()?;
    let output = runner.block_on(api::execute(&client, command, format))?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "navden",
            "step",
            "--count",
            "3",
            "--backend",
            "http://uav:9000",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.backend.as_deref(), Some("http://uav:9000"));
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Step { count: 3 }));
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["navden", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                duration,
                dt,
                dashboard,
                interval,
            } => {
                assert_eq!(duration, 90.0);
                assert_eq!(dt, 0.1);
                assert!(!dashboard);
                assert_eq!(interval, 2.0);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_view_and_run_dashboard() {
        let cli = Cli::try_parse_from(["navden", "view", "--interval", "0.5"]).unwrap();
        assert!(matches!(cli.command, Commands::View { interval } if interval == 0.5));

        let cli = Cli::try_parse_from(["navden", "run", "--duration", "30", "--dashboard"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run {
                dashboard: true,
                ..
            }
        ));
    }

    #[test]
    fn test_plan_subcommand() {
        let cli = Cli::try_parse_from(["navden", "plan", "add", "100", "200", "--at", "2"]).unwrap();
        match cli.command {
            Commands::Plan { command } => assert_eq!(
                command,
                PlanCommands::Add {
                    x: 100.0,
                    y: 200.0,
                    at: Some(2)
                }
            ),
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_demo_flags() {
        let cli = Cli::try_parse_from(["navden", "demo", "--seed", "42", "--headless"]).unwrap();
        match cli.command {
            Commands::Demo(args) => {
                assert_eq!(args.seed, Some(42));
                assert!(args.headless);
            }
            _ => panic!("expected demo"),
        }
    }
}
