use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trajectory_engine::cli_api::{self, OutputFormat as RenderFormat};
use trajectory_engine::constants::{
    HOST_DEFAULT_DRAG, HOST_DEFAULT_SPEED_MPS, HOST_DISPLAY_TIME_STEP_S, HOST_SOLVE_TIME_STEP_S,
};
use trajectory_engine::sweep::{angle_range_degrees, log_spaced_time_steps, range_vs_angle, range_vs_time_step};
use trajectory_engine::{
    integrate, solve, solve_with_trajectory, AngleSearchProblem, ImpactMode, SimulationParams,
};

#[derive(Parser)]
#[command(name = "trajectory-cli")]
#[command(version)]
#[command(about = "Drag-aware projectile trajectories and launch-angle solving", long_about = None)]
struct Cli {
    /// Log every integration step and bisection iteration to stderr
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a single trajectory
    Trajectory {
        /// JSON file with simulation parameters; flags below override it
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Initial speed (m/s) [default: 75]
        #[arg(short = 'v', long)]
        velocity: Option<f64>,

        /// Launch angle (degrees) [default: 0]
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        angle: Option<f64>,

        /// Time step (seconds) [default: 0.0001]
        #[arg(long)]
        time_step: Option<f64>,

        /// Drag coefficient (1/m) [default: 0.0003747]
        #[arg(short = 'k', long)]
        drag: Option<f64>,

        /// Initial height (meters) [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        height: Option<f64>,

        /// Stop when the projectile drops below this height (meters) [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        stop_height: Option<f64>,

        /// Stop once past this horizontal distance (meters) [default: 10000]
        #[arg(long)]
        stop_distance: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Show every trajectory point
        #[arg(long)]
        full: bool,

        /// Number of evenly spaced points to show
        #[arg(short = 'n', long)]
        points: Option<usize>,
    },

    /// Find the launch angle that lands at a target distance
    Solve {
        /// Target distance (meters)
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        distance: f64,

        /// Initial speed (m/s)
        #[arg(short = 'v', long, default_value_t = HOST_DEFAULT_SPEED_MPS)]
        velocity: f64,

        /// Time step used while searching (seconds)
        #[arg(long, default_value_t = HOST_SOLVE_TIME_STEP_S)]
        time_step: f64,

        /// Drag coefficient (1/m)
        #[arg(short = 'k', long, default_value_t = HOST_DEFAULT_DRAG)]
        drag: f64,

        /// Measure the miss distance where the path crosses the target, or where it lands
        #[arg(long, default_value = "crossing")]
        mode: Mode,

        /// Lower search bound (degrees) [default: -90]
        #[arg(long, allow_hyphen_values = true)]
        lower: Option<f64>,

        /// Upper search bound (degrees) [default: 45]
        #[arg(long, allow_hyphen_values = true)]
        upper: Option<f64>,

        /// Maximum bisection iterations [default: 200]
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Re-run the solved angle and show the path
        #[arg(long)]
        show_trajectory: bool,

        /// Time step for the displayed path (seconds)
        #[arg(long, default_value_t = HOST_DISPLAY_TIME_STEP_S)]
        display_time_step: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Run a batch of integrations over a parameter range
    Sweep {
        #[command(subcommand)]
        kind: SweepKind,
    },

    /// Display engine information
    Info,
}

#[derive(Subcommand)]
enum SweepKind {
    /// Final distance for each launch angle
    Angles {
        #[arg(short = 'v', long, default_value_t = HOST_DEFAULT_SPEED_MPS)]
        velocity: f64,

        #[arg(short = 'k', long, default_value_t = HOST_DEFAULT_DRAG)]
        drag: f64,

        #[arg(long, default_value_t = HOST_SOLVE_TIME_STEP_S)]
        time_step: f64,

        /// First angle (degrees)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,

        /// Last angle (degrees)
        #[arg(long, default_value_t = 45.0, allow_hyphen_values = true)]
        end: f64,

        /// Angle increment (degrees)
        #[arg(long, default_value_t = 5.0)]
        step: f64,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Final distance for log-spaced time steps
    TimeSteps {
        #[arg(short = 'v', long, default_value_t = HOST_DEFAULT_SPEED_MPS)]
        velocity: f64,

        /// Launch angle (degrees)
        #[arg(short = 'a', long, default_value_t = 3.0, allow_hyphen_values = true)]
        angle: f64,

        #[arg(short = 'k', long, default_value_t = HOST_DEFAULT_DRAG)]
        drag: f64,

        /// Exponent of the first time step
        #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
        start_exponent: f64,

        /// Exponent increment between steps
        #[arg(long, default_value_t = 0.02)]
        exponent_step: f64,

        /// Number of time steps
        #[arg(long, default_value_t = 50)]
        count: usize,

        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<OutputFormat> for RenderFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => RenderFormat::Table,
            OutputFormat::Json => RenderFormat::Json,
            OutputFormat::Csv => RenderFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Crossing,
    Landing,
}

impl From<Mode> for ImpactMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Crossing => ImpactMode::Crossing,
            Mode::Landing => ImpactMode::Landing,
        }
    }
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn emit(out: String) {
    if out.ends_with('\n') {
        print!("{out}");
    } else {
        println!("{out}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.trace);

    match cli.command {
        Commands::Trajectory {
            config, velocity, angle, time_step, drag, height,
            stop_height, stop_distance, output, full, points,
        } => {
            let mut params = match config {
                Some(path) => SimulationParams::from_json_file(path)?,
                None => SimulationParams::default(),
            };
            if let Some(v) = velocity {
                params.initial_speed = v;
            }
            if let Some(a) = angle {
                params.initial_heading = a.to_radians();
            }
            if let Some(dt) = time_step {
                params.time_step = dt;
            }
            if let Some(k) = drag {
                params.drag_coefficient = k;
            }
            if let Some(h) = height {
                params.initial_y = h;
            }
            if let Some(h) = stop_height {
                params.stop_height = h;
            }
            if let Some(d) = stop_distance {
                params.stop_distance = d;
            }
            params.trace |= cli.trace;

            let traj = integrate(&params)?;
            emit(cli_api::render_trajectory(&traj, output.into(), full, points)?);
        }

        Commands::Solve {
            distance, velocity, time_step, drag, mode, lower, upper,
            max_iterations, show_trajectory, display_time_step, output,
        } => {
            let mut problem = AngleSearchProblem::new(velocity, distance, time_step, drag);
            problem.search.mode = mode.into();
            if let Some(lower) = lower {
                problem.search.lower_angle = lower.to_radians();
            }
            if let Some(upper) = upper {
                problem.search.upper_angle = upper.to_radians();
            }
            if let Some(n) = max_iterations {
                problem.search.max_iterations = n;
            }

            let (solution, traj) = if show_trajectory {
                solve_with_trajectory(&problem, display_time_step)?
            } else {
                (solve(&problem)?, None)
            };
            emit(cli_api::render_solution(&problem, &solution, traj.as_ref(), output.into())?);
        }

        Commands::Sweep { kind } => match kind {
            SweepKind::Angles { velocity, drag, time_step, start, end, step, output } => {
                let base = SimulationParams::launch(velocity, 0.0, time_step, drag);
                let angles = angle_range_degrees(start, end, step);
                let samples = range_vs_angle(&base, &angles)?;
                emit(cli_api::render_angle_sweep(&samples, output.into())?);
            }
            SweepKind::TimeSteps {
                velocity, angle, drag, start_exponent, exponent_step, count, output,
            } => {
                let base = SimulationParams::launch(velocity, angle.to_radians(), HOST_DISPLAY_TIME_STEP_S, drag);
                let steps = log_spaced_time_steps(start_exponent, exponent_step, count);
                let samples = range_vs_time_step(&base, &steps)?;
                emit(cli_api::render_time_step_sweep(&samples, output.into())?);
            }
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      TRAJECTORY ENGINE v{:<8}       ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Point-mass trajectories with           ║");
            println!("║ quadratic drag.                        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Fixed-step Euler integration         ║");
            println!("║ • Launch-angle bisection solver        ║");
            println!("║ • Parallel angle / time-step sweeps    ║");
            println!("║ • Table, JSON and CSV output           ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
