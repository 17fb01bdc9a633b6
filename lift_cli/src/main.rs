use clap::{Parser, Subcommand};
use lift_core::calendar::{format_date, CalendarDate};
use lift_core::journal;
use lift_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Strength training log and progression advisor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List known exercise names
    Exercises,

    /// Log a set
    Log {
        /// Exercise name
        #[arg(long)]
        exercise: String,

        /// Load lifted
        #[arg(long)]
        weight: f64,

        /// Repetitions completed
        #[arg(long)]
        reps: f64,

        /// Date as YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        date: Option<String>,
    },

    /// List logged sets, newest first
    Sets {
        /// Only show this exercise
        #[arg(long)]
        exercise: Option<String>,
    },

    /// Delete a set by id
    Delete {
        /// Set id as shown by `sets`
        id: String,
    },

    /// Show the daily-best progress series for an exercise
    Progress {
        #[arg(long)]
        exercise: String,
    },

    /// Recommend the next target for an exercise
    Next {
        #[arg(long)]
        exercise: String,

        /// Plate step used to round suggested loads (defaults to config)
        #[arg(long)]
        step: Option<f64>,
    },

    /// Export sets to a CSV file
    Export {
        /// Destination file
        #[arg(long)]
        output: PathBuf,

        /// Only export this exercise
        #[arg(long)]
        exercise: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        lift_core::logging::init_with_level("debug");
    } else {
        lift_core::logging::init();
    }

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let store = SetStore::new(data_dir);
    let json = cli.json;

    match cli.command {
        Commands::Exercises => cmd_exercises(&store, &config, json),
        Commands::Log {
            exercise,
            weight,
            reps,
            date,
        } => cmd_log(&store, exercise, weight, reps, date, json),
        Commands::Sets { exercise } => cmd_sets(&store, exercise, json),
        Commands::Delete { id } => cmd_delete(&store, &id, json),
        Commands::Progress { exercise } => cmd_progress(&store, &exercise, json),
        Commands::Next { exercise, step } => {
            let step = step.unwrap_or(config.progression.plate_step);
            cmd_next(&store, &exercise, step, json)
        }
        Commands::Export { output, exercise } => cmd_export(&store, output, exercise, json),
    }
}

fn cmd_exercises(store: &SetStore, config: &Config, json: bool) -> Result<()> {
    let sets = store.read_all()?;
    let names = journal::list_exercises(&sets, &config.exercises.custom);

    if json {
        print_json(&serde_json::json!({ "exercises": names }))?;
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}

fn cmd_log(
    store: &SetStore,
    exercise: String,
    weight: f64,
    reps: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = date.unwrap_or_else(|| format_date(CalendarDate::today()));
    let input = NewSet {
        exercise,
        date,
        weight,
        reps,
    };

    let set = store.update(|sets| journal::create_set(sets, input))?;
    tracing::debug!("Logged set {}", set.id);

    if json {
        print_json(&set)?;
    } else {
        println!(
            "✓ Logged {} {} on {} (e1RM {})",
            set.exercise,
            describe_load(set.weight, set.reps),
            set.date,
            fmt_num(set.e1rm)
        );
        println!("  id: {}", set.id);
    }
    Ok(())
}

fn cmd_sets(store: &SetStore, exercise: Option<String>, json: bool) -> Result<()> {
    let history = store.read_all()?;
    let sets = journal::list_sets(&history, exercise.as_deref());

    if json {
        print_json(&serde_json::json!({ "sets": sets }))?;
        return Ok(());
    }

    if sets.is_empty() {
        println!("No sets logged.");
        return Ok(());
    }
    for set in &sets {
        println!(
            "{}  {:<20} {:>14}  e1RM {:>7}  {}",
            set.date,
            set.exercise,
            describe_load(set.weight, set.reps),
            fmt_num(set.e1rm),
            set.id
        );
    }
    Ok(())
}

fn cmd_delete(store: &SetStore, id: &str, json: bool) -> Result<()> {
    let removed = store.update(|sets| journal::delete_set(sets, id))?;

    if json {
        print_json(&serde_json::json!({ "deleted": removed }))?;
    } else {
        println!("✓ Deleted set {}", removed.id);
    }
    Ok(())
}

fn cmd_progress(store: &SetStore, exercise: &str, json: bool) -> Result<()> {
    let history = store.read_all()?;
    let progress = journal::get_progress(&history, exercise)?;

    if json {
        print_json(&progress)?;
        return Ok(());
    }

    println!(
        "{}: {} sets over {} days",
        progress.exercise,
        progress.total_sessions,
        progress.series.len()
    );
    for point in &progress.series {
        println!(
            "  {}  {:>14}  e1RM {}",
            point.date,
            describe_load(point.weight, point.reps),
            fmt_num(point.e1rm)
        );
    }
    Ok(())
}

fn cmd_next(store: &SetStore, exercise: &str, step: f64, json: bool) -> Result<()> {
    let history = store.read_all()?;
    let decision = journal::get_next_target(&history, exercise, step, CalendarDate::today())?;

    if json {
        print_json(&decision)?;
        return Ok(());
    }

    println!("{}", decision.status());
    match &decision {
        ProgressionDecision::NoHistory { .. } => {
            println!("  No sets logged for {}. Log a baseline set first.", exercise.trim());
        }
        ProgressionDecision::NotAllowed {
            earliest_next_date,
            alt,
            last_top,
        } => {
            println!("  Progression locked until {}", earliest_next_date);
            print_last_top(last_top);
            println!(
                "  Alternative: {} (e1RM {})",
                describe_load(alt.weight, alt.reps),
                fmt_num(alt.e1rm)
            );
        }
        ProgressionDecision::Allowed { target, last_top } => {
            print_last_top(last_top);
            println!(
                "  Target: {} (e1RM {})",
                describe_load(target.weight, target.reps),
                fmt_num(target.e1rm)
            );
        }
    }
    Ok(())
}

fn cmd_export(
    store: &SetStore,
    output: PathBuf,
    exercise: Option<String>,
    json: bool,
) -> Result<()> {
    let history = store.read_all()?;
    let sets = journal::list_sets(&history, exercise.as_deref());
    let count = lift_core::export::write_csv(&sets, &output)?;

    if json {
        print_json(&serde_json::json!({ "exported": count, "path": output }))?;
    } else {
        println!("✓ Exported {} sets", count);
        println!("  CSV: {}", output.display());
    }
    Ok(())
}

fn print_last_top(set: &TrainingSet) {
    println!(
        "  Last top: {} on {} (e1RM {})",
        describe_load(set.weight, set.reps),
        set.date,
        fmt_num(set.e1rm)
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe_load(weight: f64, reps: f64) -> String {
    format!("{} x {}", fmt_num(weight), fmt_num(reps))
}

/// One decimal place, dropping a trailing `.0`
fn fmt_num(value: f64) -> String {
    let fixed = format!("{:.1}", value);
    match fixed.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => fixed,
    }
}
