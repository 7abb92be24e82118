use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use glam::Vec3;
use sysinfo::System;

use orbital_tutorial::error::AppResult;
use orbital_tutorial::{
    Body, EventBus, GameContext, InputEvent, RenderPayload, RenderSink, StepRegistry,
    TutorialConfig, TutorialController, TutorialProgress,
};

const LOG_TARGET_STARTUP: &str = "orbital_tutorial::startup";

/// Simulated frame rate of the console host
const FRAME_DT: f32 = 1.0 / 60.0;

/// Frames simulated after every command, enough to cover a transition
const FRAMES_PER_COMMAND: usize = 36;

/// Install the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Logs roll daily under
/// `<config dir>/OrbitalTutorial/logs`; debug builds also echo to stderr so
/// stdout stays reserved for the panel.
fn initialize_tracing(config: &TutorialConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = TutorialConfig::app_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let dir_error = std::fs::create_dir_all(&log_dir).err();

    let file_layer = dir_error.is_none().then(|| {
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(&log_dir, "orbital-tutorial.log"))
            .with_ansi(false)
            .with_line_number(true)
    });
    let console_layer = cfg!(debug_assertions).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    match dir_error {
        None => tracing::info!("Log directory: {}", log_dir.display()),
        Some(e) => tracing::warn!("File logging disabled, cannot create {}: {}", log_dir.display(), e),
    }
}

fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());

    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting Orbital Tutorial v{} on ({})",
        version,
        std::env::consts::ARCH
    );
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

/// Prints the tutorial panel to stdout
struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render(&mut self, payload: &RenderPayload) {
        println!();
        println!(
            "── [{}/{}] {} ──",
            payload.step_number, payload.total_steps, payload.title
        );
        println!("{}", payload.message);
        if let Some(feedback) = &payload.feedback {
            println!("✓ {}", feedback);
        }
        println!("» {}", payload.hint);
    }

    fn show(&mut self) {}

    fn hide(&mut self) {
        println!("(tutorial panel hidden)");
    }
}

fn demo_context(completed: bool) -> GameContext {
    let mut ctx = GameContext::new()
        .with_spaceship(Body::new("Shuttle", Vec3::new(0.0, 0.0, 70.0), 0.5))
        .with_earth(Body::new("Earth", Vec3::ZERO, 63.7));
    ctx.tutorial_completed = completed;
    ctx
}

fn print_help() {
    println!("Commands:");
    println!("  <key>          press a key (enter, 1, s, w, ...)");
    println!("  wheel          scroll the mouse wheel");
    println!("  pause          toggle the simulation pause");
    println!("  drag X Y Z     plan a velocity adjustment while paused");
    println!("  burn           commit the planned adjustment");
    println!("  checkpoint     fly through the checkpoint");
    println!("  collide        simulate a collision");
    println!("  hide | show    hide or show the tutorial panel");
    println!("  skip | quit | help");
}

fn main() -> AppResult<()> {
    let (config, config_error) = match TutorialConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (TutorialConfig::default(), Some(e)),
    };

    initialize_tracing(&config);
    log_runtime_environment();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load tutorial config: {}, using defaults", e);
    }

    let args: Vec<String> = std::env::args().collect();
    let reset = args.iter().any(|a| a == "--reset");
    let force = args.iter().any(|a| a == "--force");

    let progress_path = TutorialProgress::file_path().context("Locating progress file")?;
    if reset {
        TutorialProgress::delete_at(&progress_path).context("Resetting tutorial progress")?;
        println!("✓ Tutorial progress reset");
    }

    let progress = match TutorialProgress::load() {
        Ok(progress) => progress,
        Err(e) => {
            tracing::warn!("Failed to load tutorial progress: {}, starting fresh", e);
            TutorialProgress::default()
        }
    };

    let mut ctx = demo_context(progress.completed);
    if ctx.tutorial_completed && !force {
        println!("Tutorial already completed. Run with --force to replay or --reset to clear.");
        return Ok(());
    }

    let bus = EventBus::new();
    let (events, _id) = bus.subscribe();
    let mut controller =
        TutorialController::new(StepRegistry::standard(), config, ConsoleSink).with_event_bus(bus);

    print_help();
    controller.start(&mut ctx);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while controller.is_active() {
        print!("> ");
        io::stdout().flush().context("Flushing prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Reading command")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => {
                controller.end(&mut ctx);
            }
            "help" => print_help(),
            "skip" => controller.skip(&mut ctx),
            "hide" => controller.pause(),
            "show" => controller.resume(&ctx),
            "checkpoint" => ctx.checkpoint_collected = true,
            "collide" => ctx.recent_collision_time = 2.0,
            "drag" => {
                let values: Vec<f32> = words.filter_map(|w| w.parse().ok()).collect();
                if let [x, y, z] = values[..] {
                    ctx.velocity_adjustment = Vec3::new(x, y, z);
                } else {
                    println!("usage: drag X Y Z");
                }
            }
            "pause" => {
                ctx.is_paused = !ctx.is_paused;
                if let Some(event) = InputEvent::parse(command, ctx.is_paused) {
                    controller.handle_input(&event);
                }
            }
            "burn" => {
                if ctx.is_paused {
                    ctx.velocity_adjustment = Vec3::ZERO;
                    controller.handle_input(&InputEvent::VelocityApplied);
                } else {
                    println!("Pause the simulation to plan a burn.");
                }
            }
            "wheel" | "scroll" => {
                ctx.camera.distance = (ctx.camera.distance * 0.9).max(5.0);
                if let Some(event) = InputEvent::parse(command, ctx.is_paused) {
                    controller.handle_input(&event);
                }
            }
            _ => {
                controller.handle_input(&InputEvent::key(command));
            }
        }

        for _ in 0..FRAMES_PER_COMMAND {
            ctx.advance_cooldowns(FRAME_DT);
            controller.tick(FRAME_DT, &mut ctx);
        }

        for event in events.try_iter() {
            tracing::debug!("{}", event.description());
            let saved = TutorialProgress::save_on_finish(&event, &progress_path)
                .context("Saving tutorial progress")?;
            if saved {
                println!("✓ Tutorial progress saved");
            }
        }
    }

    // Input closed before the flow ended
    if controller.is_active() {
        controller.end(&mut ctx);
    }

    Ok(())
}
