use crate::render::Quality;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  stepwise -e \"5x+3=0\"                       # solve an equation, step by step
  stepwise -e \"2x^2+4x+2\"                    # simplify an expression
  stepwise -e \"\\sqrt{x+5}-2=\\sqrt{7-x}+3\"     # LaTeX notation is accepted
  stepwise -e \"5x+3=0\" --animate -q h        # render a high quality animation
  stepwise -f equations.txt --batch -j 4      # process a file, 4 inputs at a time
  stepwise -f equations.txt --save out.json   # save the results as JSON
  stepwise                                    # interactive mode

Quality options:
  l = 480p15, m = 720p30, h = 1080p60, k = 2160p60";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "stepwise",
    version,
    about = "Step-by-step equation solver and simplifier, with animated solutions",
    after_help = EXAMPLES,
)]
pub struct Args {
    /// Single equation or expression to process.
    #[arg(short = 'e', long)]
    pub equation: Option<String>,

    /// File containing equations, one per line. Blank lines and lines starting with `#` are
    /// skipped.
    #[arg(short = 'f', long, conflicts_with = "equation")]
    pub file: Option<PathBuf>,

    /// Show progress and a summary while processing the file.
    #[arg(long, requires = "file", conflicts_with = "equation")]
    pub batch: bool,

    /// Number of inputs to process in parallel in batch mode.
    #[arg(short = 'j', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Render an animation of the solution.
    #[arg(long, requires = "equation", conflicts_with = "file")]
    pub animate: bool,

    /// Animation quality. Overrides the configuration file.
    #[arg(short = 'q', long, value_enum)]
    pub quality: Option<Quality>,

    /// Do not open a preview after rendering.
    #[arg(long)]
    pub no_preview: bool,

    /// Save the results to a JSON file.
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Increase logging verbosity (-v for info, -vv for debug).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file. Defaults to `stepwise.toml` in the working directory, if present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// The default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, _) => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let args = Args::try_parse_from(["stepwise", "-e", "5x+3=0", "--animate", "-q", "h", "-vv"]).unwrap();
        assert_eq!(args.equation.as_deref(), Some("5x+3=0"));
        assert!(args.animate);
        assert_eq!(args.quality, Some(Quality::H));
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn batch_requires_file() {
        assert!(Args::try_parse_from(["stepwise", "-e", "x=1", "--batch"]).is_err());
        assert!(Args::try_parse_from(["stepwise", "-f", "eqs.txt", "--batch", "-j", "4"]).is_ok());
    }

    #[test]
    fn animate_requires_equation() {
        assert!(Args::try_parse_from(["stepwise", "-f", "eqs.txt", "--animate"]).is_err());
        assert!(Args::try_parse_from(["stepwise", "--animate"]).is_err());
    }

    #[test]
    fn jobs_must_be_positive() {
        assert!(Args::try_parse_from(["stepwise", "-f", "eqs.txt", "-j", "0"]).is_err());
    }
}
