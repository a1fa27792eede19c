mod logging;
mod report;

use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use comanda_client::Config;
use comanda_story::{stories, Story, StoryEnv};

/// Output format for run results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// ComandaLivre story harness.
#[derive(Parser)]
#[command(name = "comanda", version, about = "Run integration stories against the ComandaLivre API")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a story against the configured deployment
    Run {
        /// Story name (see `list`); prompts interactively when omitted
        story: Option<String>,

        /// Number of times to run the story
        #[arg(short, long, default_value_t = 1)]
        iterations: u32,

        /// Run the story in an endless loop (Ctrl+C to stop)
        #[arg(short = 'l', long = "loop")]
        endless: bool,

        /// Delay in seconds between loop iterations
        #[arg(short, long, default_value_t = 1.0)]
        delay: f64,
    },

    /// List available stories
    List,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::List => {
            println!("Available stories:");
            for story in stories::all() {
                println!("  {:<24} {}", story.name, story.title);
            }
            0
        }
        Commands::Run {
            story,
            iterations,
            endless,
            delay,
        } => run_command(story, iterations, endless, delay, cli.output),
    };
    process::exit(code);
}

fn run_command(
    story_name: Option<String>,
    iterations: u32,
    endless: bool,
    delay: f64,
    output: OutputFormat,
) -> i32 {
    let story = match resolve_story(story_name) {
        Some(story) => story,
        None => return 2,
    };

    let config = Config::from_env();
    let mut total_failures = 0usize;
    let mut iteration = 0u32;

    loop {
        iteration += 1;
        // Every iteration is an independent run: fresh context, fresh
        // actor cache, nothing shared but configuration.
        let mut env = StoryEnv::from_config(&config);
        match story.execute(&mut env) {
            Ok(results) => {
                total_failures += results.iter().filter(|r| r.outcome.is_failure()).count();
                match output {
                    OutputFormat::Text => report::print_text(story, iteration, &results),
                    OutputFormat::Json => report::print_json(story, iteration, &results),
                }
            }
            Err(lint) => {
                eprintln!("error: story '{}' failed the step lint: {}", story.name, lint);
                return 2;
            }
        }

        if endless {
            thread::sleep(Duration::from_secs_f64(delay.max(0.0)));
            continue;
        }
        if iteration >= iterations {
            break;
        }
    }

    if total_failures > 0 {
        1
    } else {
        0
    }
}

/// Resolve a story by name, or prompt for one interactively.
fn resolve_story(name: Option<String>) -> Option<&'static Story> {
    match name {
        Some(name) => match stories::find(&name) {
            Some(story) => Some(story),
            None => {
                let known: Vec<&str> = stories::all().iter().map(|s| s.name).collect();
                eprintln!(
                    "error: story '{}' not found. Available: {}",
                    name,
                    known.join(", ")
                );
                None
            }
        },
        None => prompt_for_story(),
    }
}

fn prompt_for_story() -> Option<&'static Story> {
    let all = stories::all();
    println!("Choose a story to run:");
    for (index, story) in all.iter().enumerate() {
        println!("  {}. {} — {}", index + 1, story.name, story.title);
    }
    print!("Enter the number of your choice: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        eprintln!("error: could not read selection");
        return None;
    }
    match line.trim().parse::<usize>() {
        Ok(choice) if (1..=all.len()).contains(&choice) => Some(&all[choice - 1]),
        _ => {
            eprintln!("error: invalid selection '{}'", line.trim());
            None
        }
    }
}
