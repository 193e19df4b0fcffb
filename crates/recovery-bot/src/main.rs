//! A terminal front-end for the sentiment recovery bot.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use recovery_bot::core::{ErrorKind, Transcript};
use recovery_bot::model::{CaseDetails, Message, Sentiment};
use recovery_bot::{Config, SessionBuilder};
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum SessionEvent {
    Message(Message),
    Idle,
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let builder = match SessionBuilder::from_config(&config) {
        Ok(builder) => builder,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = builder
        .on_message({
            let event_tx = event_tx.clone();
            move |msg| {
                event_tx.send(SessionEvent::Message(msg.clone())).ok();
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .build();

    print_case(session.case());
    let Ok(transcript) = session.snapshot().await else {
        return;
    };
    for msg in transcript.messages() {
        print_message(msg);
    }
    print_status(&transcript);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut summary_printed = false;

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/status" | "/transcript" => {
                let Ok(transcript) = session.snapshot().await else {
                    break;
                };
                if line == "/status" {
                    print_status(&transcript);
                } else {
                    print_json(&transcript);
                }
                continue;
            }
            _ => {}
        }

        if let Err(err) = session.send_message(line) {
            error!("cannot send the message: {err}");
            if err.kind() == ErrorKind::SessionClosed {
                break;
            }
            continue;
        }

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message("💬 Typing...");
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = &progress_bar {
                progress_bar.finish_and_clear();
            }
            progress_bar = None;

            match event {
                SessionEvent::Message(msg) => print_message(&msg),
                SessionEvent::Idle => break,
            }
        }

        let Ok(transcript) = session.snapshot().await else {
            break;
        };
        print_status(&transcript);
        if transcript.phase().is_resolved() && !summary_printed {
            print_summary(&transcript);
            summary_printed = true;
        }
    }

    session.close();
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

fn print_case(case: &CaseDetails) {
    let bar = BAR_CHAR.bright_yellow();
    println!("{bar}{}", "AI Recovery Bot".bright_white().bold());
    println!("{bar}Customer: {}", case.customer);
    println!("{bar}Product: {}", case.product);
    println!("{bar}Issue: {}", case.issue);
    println!();
}

fn print_message(msg: &Message) {
    if msg.is_bot() {
        println!(
            "{}🤖 {}",
            BAR_CHAR.bright_cyan(),
            msg.content().bright_white()
        );
        return;
    }
    if let Some(sentiment) = msg.sentiment() {
        println!("  ↳ sentiment: {}", sentiment_badge(sentiment));
    }
}

fn print_status(transcript: &Transcript) {
    println!(
        "{}",
        format!(
            "[{}] customer sentiment: {}",
            transcript.phase().label(),
            transcript.sentiment().as_str().to_uppercase()
        )
        .dimmed()
    );
}

fn print_summary(transcript: &Transcript) {
    println!();
    for line in summary_lines(transcript) {
        println!("{line}");
    }
    println!();
}

fn summary_lines(transcript: &Transcript) -> Vec<String> {
    let bar = BAR_CHAR.bright_green();
    vec![
        format!("{bar}{}", "✓ Recovery Successful".bright_green().bold()),
        format!(
            "{bar}Customer sentiment: {} → {}",
            sentiment_badge(transcript.initial_sentiment()),
            sentiment_badge(transcript.sentiment())
        ),
        format!("{bar}Messages exchanged: {}", transcript.len()),
    ]
}

fn print_json(transcript: &Transcript) {
    match serde_json::to_string_pretty(transcript) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("cannot serialize the transcript: {err}"),
    }
}

fn sentiment_badge(sentiment: Sentiment) -> String {
    let tag = sentiment.as_str().to_uppercase();
    match sentiment {
        Sentiment::Positive => tag.bright_green().to_string(),
        Sentiment::Negative => tag.bright_red().to_string(),
        Sentiment::Neutral => tag.dimmed().to_string(),
    }
}
