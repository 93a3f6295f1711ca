use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;

use prompt_refiner::commands;
use prompt_refiner::config::{data_dir, resolve_config};
use prompt_refiner::{AppState, RefinementGoal};

#[derive(Parser)]
#[command(name = "prompt-refiner")]
#[command(about = "Turn a rough prompt into a clear, model-ready instruction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refine a prompt and record it in history
    Refine {
        /// Prompt text, or "-" to read it from stdin
        prompt: String,

        /// Refinement goal (defaults to the last one used)
        #[arg(long)]
        goal: Option<RefinementGoal>,

        /// Model id (defaults to the preferred model)
        #[arg(long)]
        model: Option<String>,
    },

    /// Show or clear past refinements
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// List models, or choose the preferred one
    Models {
        #[arg(long = "use", value_name = "ID")]
        use_model: Option<String>,
    },

    /// List refinement goals
    Goals,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Show whether a key is stored
    Status,
    /// Remove the stored key
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    prompt_refiner::init_tracing();
    let cli = Cli::parse();

    let config = resolve_config()?;
    let state = AppState::open(config, &data_dir()?)?;

    match cli.command {
        Command::Refine {
            prompt,
            goal,
            model,
        } => {
            let prompt = if prompt == "-" {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf
            } else {
                prompt
            };
            let entry =
                commands::refine::refine_prompt(&state, &prompt, goal, model.as_deref()).await?;
            println!("{}", entry.refined);
        }
        Command::History { clear } => {
            if clear {
                commands::history::clear_history(&state)?;
                println!("History cleared.");
            } else {
                let entries = commands::history::list_history(&state)?;
                if entries.is_empty() {
                    println!("No refinements yet.");
                }
                for entry in entries {
                    let when = chrono::DateTime::from_timestamp_millis(entry.timestamp)
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default();
                    println!("[{}] {} ({})", entry.id, when, entry.goal);
                    println!("  original: {}", entry.original);
                    println!("  refined:  {}", entry.refined);
                }
            }
        }
        Command::Key { action } => match action {
            KeyAction::Set { key } => {
                commands::keychain::set_api_key(&state, &key)?;
                println!("API key saved.");
            }
            KeyAction::Status => {
                let status = commands::keychain::get_api_key_status(&state)?;
                match status.hint {
                    Some(hint) => println!("API key set ({})", hint),
                    None => println!("No API key set."),
                }
            }
            KeyAction::Clear => {
                commands::keychain::clear_api_key(&state)?;
                println!("API key removed.");
            }
        },
        Command::Models { use_model } => {
            if let Some(id) = use_model {
                commands::models::set_preferred_model(&state, &id)?;
            }
            let preferred = commands::models::get_preferred_model(&state)?;
            for model in commands::models::list_models(&state) {
                let marker = if model.id == preferred { "*" } else { " " };
                println!("{} {:<28} {}", marker, model.id, model.name);
            }
        }
        Command::Goals => {
            let preferred = commands::config::get_preferred_goal(&state)?;
            for goal in commands::config::list_goals() {
                let marker = if goal.id == preferred.as_str() { "*" } else { " " };
                println!("{} {:<12} {}", marker, goal.id, goal.description);
            }
        }
    }

    Ok(())
}
