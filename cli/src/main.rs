use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use resonator_cli::commands::{self, SimulateOptions};
use resonator_cli::{CliContext, logging, readline};

fn main() -> Result<(), String> {
    logging::init();

    let cli = Cli::parse();
    let mut ctx = CliContext::new(cli.config).map_err(|e| e.to_string())?;

    // One-shot mode when a subcommand was given on the command line
    if let Some(command) = cli.command {
        respond_command(command, &mut ctx)?;
        return Ok(());
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Combat rotation runner")]
struct Cli {
    /// Config file to use instead of the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a rotation script and list its steps
    Parse {
        #[arg(short, long)]
        rotation: String,
    },
    /// Run the combat controller against a simulated encounter
    Simulate {
        #[arg(short, long)]
        rotation: Option<String>,
        #[arg(long, default_value_t = 5.0)]
        combat_secs: f64,
        #[arg(long)]
        die_after: Option<f64>,
        #[arg(long)]
        heuristic: bool,
        #[arg(long)]
        realm: bool,
        #[arg(long)]
        open_world: bool,
        #[arg(long)]
        json: bool,
    },
    Config,
    SetRotation {
        #[arg(short, long)]
        rotation: String,
    },
    SetMode {
        #[arg(long, action = ArgAction::Set)]
        enabled: bool,
    },
    SetKey {
        #[arg(short, long)]
        action: String,
        #[arg(short, long)]
        key: String,
    },
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "resonator".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    if cli.config.is_some() {
        return Err("error: --config can only be given at startup".to_string());
    }

    match cli.command {
        Some(command) => respond_command(command, ctx),
        None => Ok(false),
    }
}

fn respond_command(command: Commands, ctx: &mut CliContext) -> Result<bool, String> {
    match command {
        Commands::Parse { rotation } => commands::parse_rotation(&rotation)?,
        Commands::Simulate {
            rotation,
            combat_secs,
            die_after,
            heuristic,
            realm,
            open_world,
            json,
        } => {
            let options = SimulateOptions {
                rotation,
                combat_secs,
                die_after_secs: die_after,
                heuristic,
                realm,
                open_world,
                json,
            };
            commands::simulate(&options, ctx)?
        }
        Commands::Config => commands::show_config(ctx)?,
        Commands::SetRotation { rotation } => commands::set_rotation(&rotation, ctx)?,
        Commands::SetMode { enabled } => commands::set_mode(enabled, ctx)?,
        Commands::SetKey { action, key } => commands::set_key(&action, &key, ctx)?,
        Commands::Exit => {
            commands::exit();
            return Ok(true);
        }
    }
    Ok(false)
}
