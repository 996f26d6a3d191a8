use crate::print::Printer;
use rustyline::{error::ReadlineError, DefaultEditor};
use stepwise_core::{Envelope, Solver, StepSolver};

/// Reads one line from the prompt and processes it.
///
/// Returns [`None`] if the line was blank.
fn process_line<S: Solver>(
    rl: &mut DefaultEditor,
    adapter: &StepSolver<S>,
    printer: &Printer,
) -> Result<Option<Envelope>, ReadlineError> {
    let input = rl.readline("> ")?;
    if input.trim().is_empty() {
        return Ok(None);
    }

    rl.add_history_entry(&input)?;

    let envelope = adapter.solve(&input);
    printer.envelope(&envelope);
    Ok(Some(envelope))
}

/// Runs the interactive prompt until end of input or an interrupt, returning every result
/// produced.
pub fn run<S: Solver>(adapter: &StepSolver<S>, printer: &Printer) -> Result<Vec<Envelope>, ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let mut results = Vec::new();

    printer.info("Enter an equation or expression; press Ctrl-D to exit.");
    loop {
        match process_line(&mut rl, adapter, printer) {
            Ok(Some(envelope)) => results.push(envelope),
            Ok(None) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(results)
}
