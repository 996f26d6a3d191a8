mod args;
mod batch;
mod config;
mod error;
mod print;
mod render;
mod repl;

use args::Args;
use clap::Parser;
use config::Config;
use env_logger::{Builder, Env};
use error::Error;
use print::Printer;
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal},
    process::ExitCode,
};
use stepwise_core::{Envelope, StepSolver, SubprocessSolver};

/// Renders an animation of a successful result.
fn animate(args: &Args, config: &Config, envelope: &Envelope, printer: &Printer) -> Result<(), Error> {
    let mut render = config.render.clone();
    if let Some(quality) = args.quality {
        render.quality = quality;
    }
    if args.no_preview {
        render.preview = false;
    }

    printer.info(format!("Rendering animation with {}...", render.program));
    match render::animate(envelope, &render)? {
        Some(path) => printer.info(format!("Video saved to: {}", path.display())),
        None => printer.info(format!("Rendering finished; no video found in {}", render.video_dir().display())),
    }
    Ok(())
}

/// Processes the inputs selected by the command-line arguments, returning whether every input
/// succeeded.
fn run(args: &Args) -> Result<bool, Error> {
    let config = Config::load(args.config.as_deref())?;
    let adapter = StepSolver::new(SubprocessSolver::new(config.solver.clone()))
        .with_retry(config.solver.retry);
    let printer = Printer { quiet: args.quiet, json: args.json };

    let results = if let Some(equation) = &args.equation {
        printer.banner();
        let envelope = adapter.solve(equation);
        printer.envelope(&envelope);

        if args.animate {
            if envelope.is_success() {
                animate(args, &config, &envelope, &printer)?;
            } else {
                log::warn!("not rendering an animation for a failed result");
            }
        }
        vec![envelope]
    } else if let Some(path) = &args.file {
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.clone()),
            _ => Error::Io(err),
        })?;
        let inputs = batch::read_inputs(BufReader::new(file))?;
        if inputs.is_empty() {
            return Err(Error::NoInputs(path.clone()));
        }

        printer.banner();
        if args.batch {
            batch::run(&adapter, &inputs, usize::from(args.jobs), &printer)
        } else {
            batch::run_each(&adapter, &inputs, &printer)
        }
    } else if !io::stdin().is_terminal() {
        let inputs = batch::read_inputs(io::stdin().lock())?;
        batch::run_each(&adapter, &inputs, &printer)
    } else {
        printer.banner();
        repl::run(&adapter, &printer)?
    };

    if let Some(path) = &args.save {
        batch::save(path, &results)?;
        printer.saved(path);
    }

    // a single input fails the run; a batch reports failures in its summary
    let single = args.equation.is_some();
    Ok(!single || results.iter().all(Envelope::is_success))
}

fn main() -> ExitCode {
    let args = Args::parse();
    Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            err.report_to_stderr();
            err.exit_code()
        },
    }
}
