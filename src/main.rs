mod conditions;
mod frame;
mod loading;
mod report;

use clap::Parser;
use conditions::apply_frame_supports;
use frame::build_frame_part;
use framex::{Backend, Model, Settings, UnitSystem, BACKEND_VAR, UNITS_VAR};
use loading::{define_problem, PROBLEM_NAME};
use log::info;
use report::render_report;
use std::error::Error;
use std::path::PathBuf;

/// Build the simple frame model, print its summaries and optionally export it.
#[derive(Debug, Parser)]
#[command(name = "framex", version, about, long_about = None)]
struct Cli {
    /// Unit system of the model (SI, SI_mm, imperial).
    #[arg(long, env = UNITS_VAR, default_value = "SI_mm")]
    units: UnitSystem,

    /// Analysis backend the model is prepared for (abaqus, sofistik, opensees).
    #[arg(long, env = BACKEND_VAR, default_value = "abaqus")]
    backend: Backend,

    /// Directory receiving the input deck of the problem.
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Path of a JSON copy of the model.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str()))
        .init();

    let settings = Settings::new(cli.units, cli.backend);
    info!("units {}, backend {}", settings.units, settings.backend);

    // Nodes, material, section and the chain of beams, sized in millimetres.
    let (part, _) = build_frame_part(settings.units)?;
    let mut model = Model::new("simple_frame", settings);
    let frame = model.add_part(part)?;

    // Pin at the left corner, roller along X at the right one.
    apply_frame_supports(&mut model, frame)?;

    // Live load at (200, 110, 0) mm under the ULS combination.
    let problem = define_problem(&model, frame)?;
    model.add_problem(problem.clone())?;
    model.check()?;

    println!("{}", render_report(&model, &problem));

    if let Some(directory) = &cli.input_dir {
        let path = model.write_input(PROBLEM_NAME, directory)?;
        println!("Input deck written to {}", path.display());
    }
    if let Some(path) = &cli.save {
        model.save(path)?;
        println!("Model saved to {}", path.display());
    }

    Ok(())
}
