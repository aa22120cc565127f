//! RepQuest CLI
//!
//! Usage:
//!   repquest --exercise squat                      # Frames as JSON lines on stdin
//!   repquest --exercise leftArm --reps 10 --sets 3 # With a rep/set goal
//!   repquest --exercise squat --frames poses.jsonl # Frames from a file
//!   repquest --report                              # Progress report
//!   repquest --serve                               # HTTP API server
//!
//! Each frame line is `{"landmarks": [{"x":..,"y":..,"z":..,"visibility":..}, ...]}`;
//! `{"landmarks": null}` means no body in view. `end` on its own line ends the session.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::time::Duration;
use tracing::{error, warn};

use repquest::config::TargetConfig;
use repquest::core::{run_server, FileStore, ProgressReport, ProgressStore, SessionContext, SessionRecorder};
use repquest::logging::{init_logging, LogFormat};
use repquest::types::{ExerciseKind, FrameEvent, FrameOutput, FramePayload, PositionState, SetEvent};
use repquest::{VERSION, WORKOUT_COMPLETE_GRACE_MS};

#[derive(Parser, Debug)]
#[command(
    name = "repquest",
    version = VERSION,
    about = "RepQuest - count exercise reps from pose landmarks and track daily streaks",
    long_about = "RepQuest turns a stream of body-landmark frames into counted repetitions,\n\
                  tracks progress against a rep/set goal, records each session and keeps\n\
                  a consecutive-day streak.\n\n\
                  Exercises:\n  \
                  doubleArmRaise, leftArmRaise, rightArmRaise,\n  \
                  leftLegRaise, rightLegRaise, bodyTilt, squat\n\n\
                  Modes:\n  \
                  --exercise  Count reps from JSON frame lines\n  \
                  --report    Print the progress report\n  \
                  --clear     Delete history and streak\n  \
                  --serve     HTTP API server mode"
)]
struct Args {
    /// Exercise to count (e.g. squat, leftArmRaise, tilt)
    #[arg(short, long)]
    exercise: Option<String>,

    /// Reps per set (0 or invalid = free count)
    #[arg(short, long)]
    reps: Option<String>,

    /// Number of sets (0 or invalid = free count)
    #[arg(short, long)]
    sets: Option<String>,

    /// Read frames from this file instead of stdin
    #[arg(short, long)]
    frames: Option<String>,

    /// Run as HTTP API server
    #[arg(long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Print the progress report
    #[arg(long)]
    report: bool,

    /// Delete all recorded sessions and the streak
    #[arg(long)]
    clear: bool,

    /// Directory for session history and streak
    #[arg(long, default_value = "./repquest-data")]
    store_dir: String,

    /// Keep progress separate per user
    #[arg(long)]
    user: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print every frame, not only rep and set events
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    // Server mode logs request-level events by default
    let default_level = if args.serve || args.verbose { "info" } else { "warn" };
    init_logging(LogFormat::from_env(), default_level);

    let store = open_store(&args);

    if args.serve {
        run_serve(&args, store).await;
    } else if args.clear {
        run_clear(store);
    } else if args.report {
        run_report(&args, store);
    } else if let Some(ref exercise) = args.exercise {
        run_session(exercise, &args, store).await;
    } else {
        eprintln!("Nothing to do: pass --exercise, --report, --clear or --serve (see --help)");
        std::process::exit(2);
    }
}

fn open_store(args: &Args) -> ProgressStore {
    let store = ProgressStore::new(FileStore::new(&args.store_dir));
    match &args.user {
        Some(user) => store.with_namespace(user.trim()),
        None => store,
    }
}

/// Count reps from frame lines until input ends, `end` is read, or the workout completes
///
/// Only task on the runtime, so the blocking line reads and store writes stall nothing else.
async fn run_session(exercise: &str, args: &Args, store: ProgressStore) {
    let kind: ExerciseKind = match exercise.parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Known exercises: {}", ExerciseKind::ALL.map(|k| k.id()).join(", "));
            std::process::exit(2);
        }
    };
    let targets = TargetConfig::from_inputs(args.reps.as_deref(), args.sets.as_deref());

    let reader: Box<dyn BufRead> = match &args.frames {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Cannot open {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    if !args.json {
        print_header(kind, targets, args.no_color);
    }

    let mut ctx = SessionContext::start(kind, targets);

    for (line_no, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stopped reading frames");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("end") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let payload: FramePayload = match serde_json::from_str(line) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping malformed frame");
                continue;
            }
        };

        let output = ctx.process(&FrameEvent::from(payload));
        print_output(&output, args);

        if output.workout_complete {
            if !args.json {
                println!("{}", paint("\x1b[32m", "  ✓ WORKOUT COMPLETE", args.no_color));
            }
            tokio::time::sleep(Duration::from_millis(WORKOUT_COMPLETE_GRACE_MS)).await;
            break;
        }
    }

    let mut recorder = SessionRecorder::new(store);
    match recorder.finish(&ctx) {
        Ok(record) => {
            if args.json {
                match serde_json::to_string(&record) {
                    Ok(json) => println!("{}", json),
                    Err(e) => error!(error = %e, "failed to encode record"),
                }
            } else {
                println!();
                println!("Session saved. {}", record.summary());
                if let Ok(streak) = recorder.store().streak() {
                    println!("Current streak: {} days", streak.streak);
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to save session: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print one frame result; quiet frames are skipped unless --verbose or --json
fn print_output(output: &FrameOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "failed to encode frame output"),
        }
        return;
    }

    if output.rep.is_none() && output.set_event.is_none() && !args.verbose {
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if let Some(SetEvent::SetComplete { set }) = output.set_event {
        println!(
            "{}",
            paint("\x1b[36m", &format!("  ✓ Set {} complete - take a breath", set), args.no_color)
        );
    }
}

fn run_report(args: &Args, store: ProgressStore) {
    let report = store
        .sessions()
        .and_then(|sessions| Ok(ProgressReport::build(&sessions, &store.streak()?, chrono::Utc::now())));

    match report {
        Ok(report) if args.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "failed to encode report"),
        },
        Ok(report) => {
            println!("RepQuest - Full Progress Report");
            println!();
            print!("{}", report.to_text());
        }
        Err(e) => {
            eprintln!("Failed to read progress: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_clear(mut store: ProgressStore) {
    if let Err(e) = store.clear() {
        eprintln!("Failed to clear progress: {}", e);
        std::process::exit(1);
    }
    println!("Progress and streak deleted.");
}

/// Print header
fn print_header(kind: ExerciseKind, targets: TargetConfig, no_color: bool) {
    let goal = if targets.is_free_mode() {
        "free count".to_string()
    } else {
        format!("{} sets × {} reps", targets.target_sets, targets.target_reps)
    };
    println!("{}", paint("\x1b[1m", &format!("RepQuest v{} - {} ({})", VERSION, kind.label(), goal), no_color));
    println!("Reading frames... send 'end' or close input to finish.");
    println!();
}

fn paint(color: &str, text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("{}{}{}", color, text, PositionState::color_reset())
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, store: ProgressStore) {
    println!("RepQuest API Server v{} on {}", VERSION, args.addr);

    if let Err(e) = run_server(&args.addr, store).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
