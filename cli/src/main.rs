use anyhow::Context;
use clap::Parser;
use crowdmines_core::{GuessKind, RoundController, Snapshot};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use web_time::Instant;

use input::Input;

mod input;
mod logger;
mod render;
mod settings;

/// Plays a crowd minesweeper session from stdin, one chat message per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    settings: settings::SettingsArgs,

    /// Print snapshots as JSON lines instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn publish(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        writeln!(stdout, "{}", snapshot.to_json()?)?;
    } else {
        writeln!(stdout, "{}", render::render(snapshot))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Sleeps until the next deadline, or forever when nothing is scheduled.
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Applies one input line, returning whether the board should be published again.
fn dispatch(round: &mut RoundController, input: Input, now: Instant) -> bool {
    match input {
        Input::Chat(event) => round.handle_chat(&event, now).has_update(),
        Input::Click {
            kind: GuessKind::Check,
            coords,
        } => round.check_tile(coords, now).has_update(),
        Input::Click {
            kind: GuessKind::Flag,
            coords,
        } => round.flag_tile(coords, now).has_update(),
        Input::Show => true,
        Input::Quit => false,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter())?;

    let settings = args.settings.load()?;
    let mut round = RoundController::new(&settings);
    publish(&round.snapshot(), args.json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    log::info!("Session started");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                let Some(input) = input::parse_line(&line, round.config().size) else {
                    continue;
                };
                if input == Input::Quit {
                    break;
                }

                let now = Instant::now();
                // timers that came due while waiting settle before the line is applied
                let report = round.tick(now);
                let updated = dispatch(&mut round, input, now);
                if updated || report.restarted {
                    publish(&round.snapshot(), args.json)?;
                }
            }
            () = wait_for(round.next_deadline()) => {
                let report = round.tick(Instant::now());
                if report.released > 0 {
                    log::debug!("{} cooldowns ended", report.released);
                }
                if report.restarted {
                    publish(&round.snapshot(), args.json)?;
                }
            }
        }
    }

    log::info!("Session ended");
    Ok(())
}
