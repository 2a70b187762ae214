//! Interactive session shell.
//!
//! Reads one command per line from stdin. While an exercise runs, the
//! countdown is driven by a tokio interval; `stop` cancels it and any other
//! input is queued until the exercise ends. Everything recorded here lives
//! only as long as the process.

use std::collections::VecDeque;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use visionquest_core::export::{export_csv, export_pdf};
use visionquest_core::{
    run_countdown, score_breakdown, stop_signal, target_frame, ClinicalMeasurement, Completion,
    Config, Difficulty, Event, ExerciseKind, PatientCategory, PatientProfile, PatientRatings,
    RunOutcome, SessionContext, TherapistRatings,
};

use super::render;

#[derive(Args)]
pub struct SessionArgs {
    /// Countdown length in ticks (overrides session.countdown_units)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    countdown: Option<u32>,
    /// Tick interval in milliseconds (overrides session.tick_interval_ms)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,
    /// Print events and status as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "session", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Set the patient: patient <age> <name...>
    Patient {
        age: u32,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// child or adult (derived from age when omitted)
        #[arg(long)]
        category: Option<PatientCategory>,
    },
    /// Pre-exercise near points in cm: pre <npc> <npa>
    Pre {
        #[arg(allow_negative_numbers = true)]
        npc: f64,
        #[arg(allow_negative_numbers = true)]
        npa: f64,
    },
    /// Post-exercise near points in cm: post <npc> <npa>
    Post {
        #[arg(allow_negative_numbers = true)]
        npc: f64,
        #[arg(allow_negative_numbers = true)]
        npa: f64,
    },
    /// Select an exercise (idle only)
    Select { exercise: ExerciseKind },
    /// Start the selected (or named) exercise
    Start { exercise: Option<ExerciseKind> },
    /// Stop the running exercise
    Stop,
    /// Show the exercise state
    Status,
    /// Enter ratings
    Rate {
        #[command(subcommand)]
        target: RateTarget,
    },
    /// Preview the composite score for the current inputs
    Score,
    /// Score the current inputs and append them to the log
    Save,
    /// Show the session log
    Log,
    /// Show aggregate statistics
    Stats,
    /// Export the log
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
    /// Clear the session log
    Clear,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum RateTarget {
    /// Six therapist ratings, 0-100
    Therapist {
        #[arg(num_args = 6, required = true)]
        values: Vec<u32>,
    },
    /// Patient self-report: <clarity 1-10> <comfort 1-10> <difficulty> <completion>
    Patient {
        clarity: u32,
        comfort: u32,
        difficulty: Difficulty,
        completion: Completion,
    },
}

#[derive(Subcommand)]
enum ExportFormat {
    /// Flat CSV, one row per session
    Csv { path: Option<PathBuf> },
    /// PDF report with patient and statistics
    Pdf { path: Option<PathBuf> },
}

enum Flow {
    Continue,
    Run,
    Quit,
}

struct Shell {
    ctx: SessionContext,
    json: bool,
    interactive: bool,
    export_dir: PathBuf,
    pending: VecDeque<String>,
    eof: bool,
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut settings = config.session_settings();
    if let Some(units) = args.countdown {
        settings.countdown_units = units;
    }
    if let Some(ms) = args.tick_ms {
        settings.tick_interval = Duration::from_millis(ms);
    }

    let mut shell = Shell {
        ctx: SessionContext::new(settings, config.default_patient()),
        json: args.json,
        interactive: std::io::stdin().is_terminal(),
        export_dir: config.export_dir(),
        pending: VecDeque::new(),
        eof: false,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(shell.run());
    // A stdin read may still be parked on the blocking pool.
    runtime.shutdown_background();
    result?;
    Ok(())
}

impl Shell {
    async fn run(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        if self.interactive {
            println!("VisionQuest session for {}. Type 'help' for commands.", self.ctx.patient().name);
        }

        loop {
            let line = match self.pending.pop_front() {
                Some(line) => line,
                None if self.eof => break,
                None => {
                    if self.interactive {
                        print!("> ");
                        std::io::stdout().flush()?;
                    }
                    match lines.next_line().await? {
                        Some(line) => line,
                        None => break,
                    }
                }
            };

            match self.handle(&line) {
                Flow::Continue => {}
                Flow::Quit => break,
                Flow::Run => self.run_exercise(&mut lines).await?,
            }
        }
        Ok(())
    }

    async fn run_exercise(&mut self, lines: &mut Lines<BufReader<Stdin>>) -> std::io::Result<()> {
        let (handle, signal) = stop_signal();
        let period = self.ctx.settings().tick_interval;
        let exercise = self.ctx.exercise_settings();
        let json = self.json;
        let mut frame_index = 0usize;

        let run = run_countdown(&mut self.ctx, period, signal, |report, _| {
            if json {
                print_json(&report.event);
                return;
            }
            match &report.event {
                Event::ExerciseTicked { remaining, .. } => {
                    let frame = target_frame(exercise.kind, report.elapsed);
                    let glyph = exercise.target_glyph(frame_index);
                    frame_index += 1;
                    println!("{}  {remaining} left", render::frame_line(&frame, glyph));
                }
                Event::ExerciseCompleted { exercise, .. } => {
                    println!("{exercise} complete");
                }
                Event::ExerciseStopped { exercise, remaining, .. } => {
                    println!("{exercise} stopped with {remaining} left");
                }
                _ => {}
            }
        });
        tokio::pin!(run);

        let outcome = loop {
            tokio::select! {
                outcome = &mut run => break outcome,
                line = lines.next_line(), if !self.eof => match line? {
                    Some(line) if line.trim() == "stop" => handle.stop(),
                    Some(line) => {
                        if self.interactive {
                            eprintln!("(queued until the exercise ends; type 'stop' to end it now)");
                        }
                        self.pending.push_back(line);
                    }
                    None => self.eof = true,
                },
            }
        };
        tracing::debug!(?outcome, "exercise run finished");
        if outcome == RunOutcome::NotRunning && !json {
            println!("no exercise running");
        }
        Ok(())
    }

    fn handle(&mut self, line: &str) -> Flow {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Flow::Continue;
        }
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                let _ = e.print();
                return Flow::Continue;
            }
        };

        match parsed.command {
            ShellCommand::Patient { age, name, category } => {
                let name = name.join(" ");
                let patient = match category {
                    Some(category) => PatientProfile::new(name, age, category),
                    None => PatientProfile::with_age(name, age),
                };
                println!(
                    "patient: {} ({}, {})",
                    patient.name,
                    patient.age(),
                    patient.category.as_str()
                );
                self.ctx.set_patient(patient);
            }
            ShellCommand::Pre { npc, npa } => {
                let m = ClinicalMeasurement::new(npc, npa);
                println!("pre: npc {:.1} cm, npa {:.1} cm", m.npc_cm(), m.npa_cm());
                self.ctx.set_pre(m);
            }
            ShellCommand::Post { npc, npa } => {
                let m = ClinicalMeasurement::new(npc, npa);
                println!("post: npc {:.1} cm, npa {:.1} cm", m.npc_cm(), m.npa_cm());
                self.ctx.set_post(m);
            }
            ShellCommand::Select { exercise } => match self.ctx.select(exercise) {
                Some(event) => self.emit(&event, &format!("selected {exercise}")),
                None => println!("cannot change exercise while one is running"),
            },
            ShellCommand::Start { exercise } => {
                let kind = exercise.unwrap_or_else(|| self.ctx.session().exercise());
                let event = self.ctx.start(kind);
                let text = format!(
                    "started {kind} training for {} ({} ticks)",
                    self.ctx.patient().name,
                    self.ctx.session().duration()
                );
                self.emit(&event, &text);
                return Flow::Run;
            }
            // A running exercise consumes `stop` inside run_exercise.
            ShellCommand::Stop => println!("no exercise running"),
            ShellCommand::Status => {
                let snapshot = self.ctx.session().snapshot();
                if self.json {
                    print_json(&snapshot);
                } else {
                    println!(
                        "{}: {:?}, {}/{} left",
                        snapshot.exercise, snapshot.state, snapshot.remaining, snapshot.duration
                    );
                }
            }
            ShellCommand::Rate { target } => match target {
                RateTarget::Therapist { values } => {
                    let Ok(values) = <[u32; 6]>::try_from(values.as_slice()) else {
                        println!("expected six therapist ratings");
                        return Flow::Continue;
                    };
                    let ratings = TherapistRatings::from_values(values);
                    println!("therapist ratings: {:?}", ratings.values());
                    self.ctx.set_therapist_ratings(ratings);
                }
                RateTarget::Patient {
                    clarity,
                    comfort,
                    difficulty,
                    completion,
                } => {
                    let ratings = PatientRatings::new(clarity, comfort, difficulty, completion);
                    println!(
                        "patient ratings: clarity {}, comfort {}, {}, {}",
                        ratings.clarity,
                        ratings.comfort,
                        ratings.difficulty.as_str(),
                        ratings.completion.as_str()
                    );
                    self.ctx.set_patient_ratings(ratings);
                }
            },
            ShellCommand::Score => {
                let b = score_breakdown(
                    self.ctx.therapist_ratings(),
                    self.ctx.patient_ratings(),
                    self.ctx.post(),
                );
                if self.json {
                    print_json(&b);
                } else {
                    println!(
                        "therapist {:.2}, patient {:.0}, npc gain {:.1}, npa gain {:.1} -> {}%",
                        b.therapist_avg, b.patient_avg, b.npc_gain, b.npa_gain, b.composite
                    );
                }
            }
            ShellCommand::Save => {
                let event = self.ctx.save_assessment();
                if let Event::AssessmentSaved { composite, log_len, .. } = &event {
                    let text = format!("saved session #{log_len}: score {composite}%");
                    self.emit(&event, &text);
                }
            }
            ShellCommand::Log => {
                if self.json {
                    print_json(self.ctx.log());
                } else {
                    print!("{}", render::log_table(self.ctx.log()));
                }
            }
            ShellCommand::Stats => {
                let summary = self.ctx.summary();
                if self.json {
                    print_json(&summary);
                } else {
                    print!("{}", render::summary_text(&summary));
                }
            }
            ShellCommand::Export { format } => self.export(format),
            ShellCommand::Clear => {
                let event = self.ctx.clear_log();
                self.emit(&event, "session log cleared");
            }
            ShellCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn export(&self, format: ExportFormat) {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let result = match format {
            ExportFormat::Csv { path } => {
                let path = path.unwrap_or_else(|| self.export_dir.join(format!("visionquest_{stamp}.csv")));
                export_csv(self.ctx.log(), &path)
            }
            ExportFormat::Pdf { path } => {
                let path = path.unwrap_or_else(|| self.export_dir.join(format!("visionquest_{stamp}.pdf")));
                export_pdf(self.ctx.patient(), self.ctx.log(), &path)
            }
        };
        match result {
            Ok(Some(path)) => println!("exported to {}", path.display()),
            Ok(None) => println!("nothing to export"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    fn emit(&self, event: &Event, text: &str) {
        if self.json {
            print_json(event);
        } else {
            println!("{text}");
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize output"),
    }
}
