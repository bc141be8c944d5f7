use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use routine_core::clock::second_of_day;
use routine_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pacer")]
#[command(
    about = "Personal daily-routine tracker: water, meals, and guided workouts",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live tracker loop, one snapshot per second (default)
    Watch {
        /// Replay from a fixed wall-clock time (HH:MM or HH:MM:SS) instead
        /// of following the system clock; replays at full speed
        #[arg(long)]
        at: Option<String>,

        /// Stop after this many ticks (0 = run until interrupted)
        #[arg(long, default_value_t = 0)]
        ticks: u64,
    },

    /// Evaluate the schedule once and print the snapshot
    Status {
        /// Evaluate at a fixed wall-clock time (HH:MM or HH:MM:SS)
        #[arg(long)]
        at: Option<String>,

        /// Emit the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the full daily schedule
    Schedule {
        /// Mark past/future relative to this time instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Print the step-by-step plan for a workout
    Plan {
        /// Workout id, e.g. wo1
        workout_id: String,
    },

    /// Show or change the audio cue preference
    Audio {
        #[arg(value_enum)]
        action: Option<AudioAction>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AudioAction {
    On,
    Off,
    Toggle,
    Show,
}

fn main() -> Result<()> {
    routine_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Schedule validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::ScheduleValidation("Invalid schedule".into()));
    }

    match cli.command {
        Some(Commands::Watch { at, ticks }) => cmd_watch(catalog, &config, &data_dir, at, ticks),
        Some(Commands::Status { at, json }) => cmd_status(catalog, &config, at, json),
        Some(Commands::Schedule { at }) => cmd_schedule(catalog, at),
        Some(Commands::Plan { workout_id }) => cmd_plan(catalog, &config, &workout_id),
        Some(Commands::Audio { action }) => cmd_audio(&data_dir, action),
        None => cmd_watch(catalog, &config, &data_dir, None, 0),
    }
}

// ============================================================================
// Watch loop
// ============================================================================

/// Simulated clock for `watch --at`: starts at the given instant and
/// advances one second per tick.
struct ReplayClock {
    next: NaiveDateTime,
}

impl TickSource for ReplayClock {
    fn now(&mut self) -> NaiveDateTime {
        let now = self.next;
        self.next += chrono::Duration::seconds(1);
        now
    }
}

/// Speech delivery for a terminal: announcements are printed. Nothing is
/// queued, so cancel has nothing to do.
struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn speak(&mut self, text: &str) {
        println!("  >> {}", text);
    }
}

/// Vibration for a terminal: the pattern is printed with a bell.
struct ConsoleHaptics;

impl Haptics for ConsoleHaptics {
    fn vibrate(&mut self, vibration: &Vibration) {
        match vibration {
            Vibration::Single(ms) => println!("  ~~ buzz {}ms\x07", ms),
            Vibration::Pattern(pattern) => {
                let parts: Vec<String> = pattern.iter().map(|ms| ms.to_string()).collect();
                println!("  ~~ buzz {}ms\x07", parts.join("/"));
            }
        }
    }
}

fn cmd_watch(
    catalog: &Catalog,
    config: &Config,
    data_dir: &Path,
    at: Option<String>,
    ticks: u64,
) -> Result<()> {
    let prefs = UserPrefs::load(&prefs_path(data_dir))?;

    let simulated = at.is_some();
    let mut clock: Box<dyn TickSource> = match at {
        Some(spec) => Box::new(ReplayClock {
            next: at_today(&spec)?,
        }),
        None => Box::new(SystemClock),
    };

    let mut announcer: Box<dyn Announcer> = if prefs.audio_enabled {
        Box::new(ConsoleAnnouncer)
    } else {
        Box::new(NullAnnouncer)
    };
    let mut haptics = ConsoleHaptics;
    let mut edges = EdgeDetector::new();

    // The timeline is rebuilt only when the active workout changes, not
    // every tick.
    let mut plan: Option<(String, Vec<TimelineStep>)> = None;
    let mut count = 0u64;

    loop {
        let now = clock.now();
        let eval = evaluate(catalog, now);

        let mut cues = Vec::new();
        if let Some(cue) = edges.observe_status(&eval.status) {
            cues.push(cue);
        }
        if let Some(cue) = edges.observe_challenge(&eval.challenge) {
            cues.push(cue);
        }

        if let Some(workout) = eval.active_workout {
            let stale = plan.as_ref().map_or(true, |(id, _)| id != &workout.id);
            let exercises = workout.payload.exercises().unwrap_or(&[]);
            if stale {
                plan = Some((
                    workout.id.clone(),
                    build_timeline(exercises, &config.timing),
                ));
            }
            if let Some((_, steps)) = &plan {
                let elapsed = second_of_day(&now) as f64 - workout.start.seconds() as f64;
                let view = display(exercises, steps, elapsed, &config.timing);
                println!(
                    "[{}] {} {:>3.0}% | {}",
                    now.format("%H:%M:%S"),
                    workout.id,
                    progress_percent(steps, elapsed),
                    step_line(&view)
                );
                if let Some(cue) = edges.observe_workout(exercises, steps, elapsed) {
                    cues.push(cue);
                }
            }
        } else {
            plan = None;
            edges.workout_ended();
            println!(
                "[{}] {} | {}",
                now.format("%H:%M:%S"),
                eval.status.message,
                challenge_line(catalog, &eval.challenge)
            );
        }

        for cue in &cues {
            announcer.speak(&cue.speech);
            haptics.vibrate(&cue.vibration);
        }

        count += 1;
        if ticks != 0 && count >= ticks {
            return Ok(());
        }
        if !simulated {
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    }
}

// ============================================================================
// One-shot commands
// ============================================================================

fn cmd_status(catalog: &Catalog, config: &Config, at: Option<String>, json: bool) -> Result<()> {
    let now = resolve_now(at)?;
    let eval = evaluate(catalog, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
        return Ok(());
    }

    println!("{}  {}", now.format("%H:%M:%S"), eval.status.message);

    if let Some(workout) = eval.active_workout {
        let exercises = workout.payload.exercises().unwrap_or(&[]);
        let steps = build_timeline(exercises, &config.timing);
        let elapsed = second_of_day(&now) as f64 - workout.start.seconds() as f64;
        let end = workout
            .end
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".into());
        println!("Active workout: {} ({} - {})", workout.id, workout.start, end);
        println!(
            "  {:>3.0}% | {}",
            progress_percent(&steps, elapsed),
            step_line(&display(exercises, &steps, elapsed, &config.timing))
        );
    }

    println!("{}", challenge_line(catalog, &eval.challenge));
    println!("{}", next_line("water", eval.next.water));
    println!("{}", next_line("meal", eval.next.meal));
    println!("{}", next_line("workout", eval.next.workout));

    Ok(())
}

fn cmd_schedule(catalog: &Catalog, at: Option<String>) -> Result<()> {
    let now = resolve_now(at)?;
    let now_minutes = routine_core::clock::minute_of_day(&now);

    println!("Daily schedule:");
    for event in &catalog.events {
        let past = match event.end {
            Some(end) => end.minutes() < now_minutes,
            None => event.start.minutes() < now_minutes,
        };
        let marker = if past { "-" } else { " " };
        let time = match event.end {
            Some(end) => format!("{} - {}", event.start.twelve_hour(), end.twelve_hour()),
            None => event.start.twelve_hour(),
        };
        println!(
            "{} {:<20} {:<8} {}",
            marker,
            time,
            event.category.to_string().to_lowercase(),
            event.payload.summary()
        );
    }

    let windows: Vec<String> = catalog
        .challenge_times
        .iter()
        .map(|t| t.twelve_hour())
        .collect();
    println!("Optional challenge windows: {}", windows.join(", "));

    Ok(())
}

fn cmd_plan(catalog: &Catalog, config: &Config, workout_id: &str) -> Result<()> {
    let Some(workout) = catalog.workout_by_id(workout_id) else {
        eprintln!("Available workouts: {}", catalog.workout_ids().join(", "));
        return Err(Error::UnknownWorkout(workout_id.to_string()));
    };

    let exercises = workout.payload.exercises().unwrap_or(&[]);
    let steps = build_timeline(exercises, &config.timing);

    let end = workout
        .end
        .map(|t| t.to_string())
        .unwrap_or_else(|| "?".into());
    println!("Plan for {} ({} - {}):", workout.id, workout.start, end);

    for (index, step) in steps.iter().enumerate() {
        let label = match step.kind {
            StepKind::ExerciseActive => {
                let name = exercises
                    .get(step.exercise_index)
                    .map(|e| e.name.as_str())
                    .unwrap_or("?");
                format!(
                    "{} set {}/{} ({})",
                    name,
                    step.current_set,
                    step.total_sets,
                    exercises
                        .get(step.exercise_index)
                        .map(effort_label)
                        .unwrap_or_default()
                )
            }
            StepKind::SetRest => format!("rest {}s", step.duration_seconds()),
            StepKind::ExerciseRest => format!("rest {}s, change exercise", step.duration_seconds()),
        };
        println!(
            "  {:>2}  {} - {}  {}",
            index + 1,
            mmss(step.start_seconds),
            mmss(step.end_seconds),
            label
        );
    }

    println!("Total: {} planned", mmss(total_seconds(&steps)));
    Ok(())
}

fn cmd_audio(data_dir: &Path, action: Option<AudioAction>) -> Result<()> {
    let path = prefs_path(data_dir);

    let prefs = match action.unwrap_or(AudioAction::Show) {
        AudioAction::Show => UserPrefs::load(&path)?,
        AudioAction::On => UserPrefs::update(&path, |p| p.audio_enabled = true)?,
        AudioAction::Off => UserPrefs::update(&path, |p| p.audio_enabled = false)?,
        AudioAction::Toggle => UserPrefs::update(&path, |p| p.audio_enabled = !p.audio_enabled)?,
    };

    let state = if prefs.audio_enabled {
        "enabled"
    } else {
        "disabled"
    };
    println!("Audio cues: {}", state);
    Ok(())
}

// ============================================================================
// Rendering helpers
// ============================================================================

fn prefs_path(data_dir: &Path) -> PathBuf {
    data_dir.join("prefs.json")
}

fn at_today(spec: &str) -> Result<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(spec, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(spec, "%H:%M"))
        .map_err(|_| {
            Error::Other(format!(
                "invalid time '{}': expected HH:MM or HH:MM:SS",
                spec
            ))
        })?;
    Ok(Local::now().date_naive().and_time(time))
}

fn resolve_now(at: Option<String>) -> Result<NaiveDateTime> {
    match at {
        Some(spec) => at_today(&spec),
        None => {
            let mut clock = SystemClock;
            Ok(clock.now())
        }
    }
}

fn step_line(view: &StepDisplay) -> String {
    match view {
        StepDisplay::TimedSet {
            name,
            current_set,
            total_sets,
            remaining_seconds,
        } => format!(
            "{} set {}/{}: {}s left",
            name, current_set, total_sets, remaining_seconds
        ),
        StepDisplay::RepSet {
            name,
            current_set,
            total_sets,
            rep_number,
            phase,
        } => {
            let phase = match phase {
                Some(PacePhase::Up) => " (UP)",
                Some(PacePhase::Down) => " (DOWN)",
                None => "",
            };
            format!(
                "{} set {}/{}: rep {}{}",
                name, current_set, total_sets, rep_number, phase
            )
        }
        StepDisplay::MaxEffortSet {
            name,
            current_set,
            total_sets,
        } => format!("{} set {}/{}: max effort", name, current_set, total_sets),
        StepDisplay::Rest {
            remaining_seconds,
            next_name,
            next_set,
        } => format!(
            "REST {}s - next: {} (set {})",
            remaining_seconds, next_name, next_set
        ),
        StepDisplay::Completed => "Workout complete!".to_string(),
    }
}

fn effort_label(exercise: &Exercise) -> String {
    match &exercise.effort {
        Effort::Timed { seconds } => format!("{}s", seconds),
        Effort::Reps { target, tempo } => {
            let reps = match target {
                RepTarget::Count(n) => format!("{} reps", n),
                RepTarget::Max => "max reps".to_string(),
            };
            match tempo.describe() {
                Some(pacing) => format!("{}, {}", reps, pacing),
                None => reps,
            }
        }
    }
}

fn challenge_line(catalog: &Catalog, challenge: &ChallengeStatus) -> String {
    match challenge {
        ChallengeStatus::Inactive => "No optional challenges configured".to_string(),
        ChallengeStatus::Prompt => {
            let exercise = &catalog.challenge_exercise;
            match exercise.effort {
                Effort::Reps {
                    target: RepTarget::Count(reps),
                    ..
                } => format!(
                    "Optional challenge available: {} set of {} {}",
                    exercise.sets.total(),
                    reps,
                    exercise.name
                ),
                _ => format!("Optional challenge available: {}", exercise.name),
            }
        }
        ChallengeStatus::Countdown { minutes } => {
            let hours = (minutes / 60.0).floor() as i64;
            let remainder = (minutes % 60.0).ceil() as i64;
            if hours > 0 {
                format!("Next optional challenge in {}h {}m", hours, remainder)
            } else {
                format!("Next optional challenge in {}m", remainder)
            }
        }
    }
}

fn next_line(label: &str, upcoming: Option<Upcoming<'_>>) -> String {
    match upcoming {
        Some(upcoming) => format!(
            "Next {:<8} {}  {}",
            format!("{}:", label),
            hms(upcoming.seconds_until),
            upcoming.event.payload.summary()
        ),
        None => format!("Next {:<8} all done", format!("{}:", label)),
    }
}

fn hms(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

fn mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
