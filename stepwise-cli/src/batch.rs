//! Processing of many inputs at once.

use crate::print::Printer;
use log::warn;
use rayon::prelude::*;
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::{
    collections::HashMap,
    fs,
    io::{self, BufRead},
    path::Path,
};
use stepwise_core::{Envelope, Solver, StepSolver};

/// Reads inputs, one per line, skipping blank lines and lines starting with `#`.
pub fn read_inputs(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

/// Processes each input in order, printing each result as it is produced.
pub fn run_each<S: Solver>(adapter: &StepSolver<S>, inputs: &[String], printer: &Printer) -> Vec<Envelope> {
    inputs.iter()
        .map(|input| {
            let envelope = adapter.solve(input);
            printer.envelope(&envelope);
            envelope
        })
        .collect()
}

/// Processes each input in order, printing its position before solving it and its result right
/// after.
fn run_sequential<S: Solver>(adapter: &StepSolver<S>, inputs: &[String], printer: &Printer) -> Vec<Envelope> {
    inputs.iter()
        .enumerate()
        .map(|(i, input)| {
            printer.progress(i + 1, inputs.len());
            let envelope = adapter.solve(input);
            printer.envelope(&envelope);
            envelope
        })
        .collect()
}

/// Processes the inputs with up to `jobs` inputs in flight at once, followed by a summary.
///
/// With a single job, progress and results are printed as each input finishes. Otherwise, the
/// results are printed in input order once all of them are ready.
pub fn run<S: Solver>(adapter: &StepSolver<S>, inputs: &[String], jobs: usize, printer: &Printer) -> Vec<Envelope> {
    printer.info(format!("Batch processing {} equations...", inputs.len()));

    let pool = if jobs > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|err| warn!("failed to start {} workers ({}), processing sequentially", jobs, err))
            .ok()
    } else {
        None
    };

    let results = match pool {
        Some(pool) => {
            let results: Vec<Envelope> = pool.install(|| inputs.par_iter().map(|input| adapter.solve(input)).collect());
            for (i, envelope) in results.iter().enumerate() {
                printer.progress(i + 1, results.len());
                printer.envelope(envelope);
            }
            results
        },
        None => run_sequential(adapter, inputs, printer),
    };
    printer.summary(&results);

    results
}

/// Serializes results as a JSON object mapping each input to its result.
///
/// If an input appears more than once, the last result for it is kept, at the position of its
/// first appearance.
struct ResultMap<'a>(&'a [Envelope]);

impl Serialize for ResultMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&str, &Envelope)> = Vec::with_capacity(self.0.len());
        let mut positions = HashMap::new();
        for envelope in self.0 {
            match positions.get(envelope.input()) {
                Some(&i) => entries[i] = (envelope.input(), envelope),
                None => {
                    positions.insert(envelope.input(), entries.len());
                    entries.push((envelope.input(), envelope));
                },
            }
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (input, envelope) in entries {
            map.serialize_entry(input, envelope)?;
        }
        map.end()
    }
}

/// Writes the results to a JSON file, creating its parent directories.
pub fn save(path: &Path, results: &[Envelope]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&ResultMap(results)).map_err(io::Error::from)?;
    fs::write(path, json + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stepwise_core::{RawState, RawStep, SolverError};

    /// Solves `x=<n>` in one step; every other input is rejected.
    struct Trivial;

    impl Solver for Trivial {
        fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
            Ok(vec![RawStep::new("SWAP_SIDES", RawState::rendered(text), RawState::rendered(text))])
        }

        fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
            Err(SolverError::Rejected(format!("cannot simplify {}", text)))
        }
    }

    fn quiet() -> Printer {
        Printer { quiet: true, json: false }
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let inputs = read_inputs("5x+3=0\n\n# a comment\n  x^2=4  \n".as_bytes()).unwrap();
        assert_eq!(inputs, vec!["5x+3=0", "x^2=4"]);
    }

    #[test]
    fn parallel_preserves_order() {
        let inputs = (0..32).map(|i| format!("x={}", i)).collect::<Vec<_>>();
        let adapter = StepSolver::new(Trivial);

        let results = run(&adapter, &inputs, 4, &quiet());
        assert_eq!(results.iter().map(Envelope::input).collect::<Vec<_>>(), inputs);
        assert_eq!(results, run(&adapter, &inputs, 1, &quiet()));
    }

    /// Records the order in which inputs are solved and results are printed.
    struct Recording(std::sync::Mutex<Vec<String>>);

    impl Solver for Recording {
        fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
            self.0.lock().unwrap().push(text.to_string());
            Trivial.solve_equation(text)
        }

        fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
            Trivial.simplify_expression(text)
        }
    }

    #[test]
    fn sequential_solves_in_order() {
        let inputs = vec!["x=1".to_string(), "x=2".to_string(), "x=3".to_string()];
        let adapter = StepSolver::new(Recording(Default::default()));

        let results = run(&adapter, &inputs, 1, &quiet());
        assert_eq!(results.len(), 3);
        assert_eq!(*adapter.solver().0.lock().unwrap(), inputs);
    }

    #[test]
    fn failures_are_kept() {
        let inputs = vec!["x=1".to_string(), "2+".to_string()];
        let results = run_each(&StepSolver::new(Trivial), &inputs, &quiet());
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
    }

    #[test]
    fn save_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.json");
        let inputs = vec!["x=2".to_string(), "x=1".to_string(), "x=2".to_string()];
        let results = run_each(&StepSolver::new(Trivial), &inputs, &quiet());

        save(&path, &results).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let object = saved.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["x=1"]["status"], "success");
        assert_eq!(object["x=2"]["steps"][0]["after"], "x=2");
    }
}
