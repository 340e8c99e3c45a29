// SecAware Backend Entry Point
// Console front end over the matching engine

mod brain;
mod database;
mod error;
mod models;

#[cfg(test)]
mod tests;

use brain::engine::Engine;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Knowledge database location when `SECAWARE_DB_PATH` is not set.
const DEFAULT_DB_PATH: &str = "secaware.sqlite";

type StdinLines = io::Lines<io::StdinLock<'static>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("SECAWARE_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let pool = database::init_db(Path::new(&db_path)).await?;
    let engine = Engine::new(pool)?;

    println!("=== SecAware - Cybersecurity Awareness Bot ===");
    println!("Hello! I'm here to help you stay safe online.");
    print!("What is your name? ");
    io::stdout().flush()?;

    let mut lines = io::stdin().lock().lines();
    let name = match lines.next() {
        Some(line) => {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                "Guest".to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => return Ok(()),
    };
    println!(
        "Hello {name}! Ask me anything, or use /list, /topics, /tips, /add, /history, /reset, /topic. Type 'exit' to quit."
    );

    loop {
        print!("\nYou: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?.trim().to_string();

        if input.is_empty() {
            println!("Please ask something.");
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye! Stay cyber safe.");
            break;
        }
        if let Some(cmd) = input.strip_prefix('/') {
            handle_command(&engine, cmd, &mut lines).await?;
            continue;
        }

        match engine.lookup(&input).await {
            Ok(reply) => println!("Bot: {}", reply.answer),
            Err(e) => {
                error!("Lookup failed: {}", e);
                println!("Bot: Sorry, something went wrong on my side.");
            }
        }
    }

    Ok(())
}

/// Slash commands exposed by the console front end. Everything here is
/// presentation wiring; the engine does the work.
async fn handle_command(engine: &Engine, cmd: &str, lines: &mut StdinLines) -> anyhow::Result<()> {
    let (name, arg) = match cmd.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (cmd, ""),
    };

    match name.to_lowercase().as_str() {
        "list" => {
            println!("Keywords I know:");
            for keyword in engine.all_keywords().await? {
                println!("  - {keyword}");
            }
        }
        "topics" => {
            println!("Topic categories:");
            for category in engine.all_categories().await? {
                println!("  - {category}");
            }
        }
        "tips" if !arg.is_empty() => {
            let tips = engine.related_tips(arg).await?;
            if tips.is_empty() {
                println!("No tips for '{arg}'. Try /topics.");
            } else {
                for tip in tips {
                    println!("  - {tip}");
                }
            }
        }
        "add" => {
            print!("Keyword: ");
            io::stdout().flush()?;
            let keyword = read_line(lines)?;
            print!("Answer : ");
            io::stdout().flush()?;
            let answer = read_line(lines)?;

            if engine.insert_entry(&keyword, &answer).await {
                println!("Added!");
            } else {
                println!("Add failed.");
            }
        }
        "history" => {
            println!("History:");
            for entry in engine.history().await {
                println!("  - {entry}");
            }
        }
        "reset" => {
            engine.reset_memory().await;
            println!("Memory cleared.");
        }
        "topic" if !arg.is_empty() => {
            engine.remember_topic(arg).await;
            println!("Got it, I'll keep {arg} in mind.");
        }
        _ => println!(
            "Unknown command. Try /list, /topics, /tips <category>, /add, /history, /reset or /topic <name>."
        ),
    }

    Ok(())
}

fn read_line(lines: &mut StdinLines) -> io::Result<String> {
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Ok(String::new()),
    }
}
