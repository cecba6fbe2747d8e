use std::io::{BufRead, Write};

use crate::commands::dashboard::{get_dashboard, parse_date_arg};
use crate::error::AppError;
use crate::render::render_dashboard;
use crate::state::{AppState, DatasetAccess};

#[derive(Debug, PartialEq)]
enum ExploreInput {
    Quit,
    Range(Option<String>, Option<String>),
}

fn parse_input(line: &str) -> ExploreInput {
    let trimmed = line.trim();
    if matches!(trimmed, "q" | "quit" | "exit") {
        return ExploreInput::Quit;
    }
    let mut parts = trimmed.split_whitespace().map(str::to_string);
    ExploreInput::Range(parts.next(), parts.next())
}

/// Interactive loop: each input line is a date range (`START END`, `START`,
/// `- END`, or empty for the full span); the dashboard is rebuilt and printed
/// for it. Range errors are reported and the loop keeps going. Ends on `q` or EOF.
pub fn run_explore<R: BufRead, W: Write>(
    state: &AppState,
    input: R,
    mut output: W,
) -> Result<(), AppError> {
    if let Some((min, max)) = state.with_dataset(|ds| Ok(ds.approval_bounds()))? {
        writeln!(output, "Data spans {min} → {max}.")?;
    }
    writeln!(
        output,
        "Enter a range as YYYY-MM-DD YYYY-MM-DD ('-' keeps a bound, empty line = everything, q quits)."
    )?;
    prompt(&mut output)?;

    for line in input.lines() {
        let line = line?;
        let (start, end) = match parse_input(&line) {
            ExploreInput::Quit => break,
            ExploreInput::Range(start, end) => (start, end),
        };

        let rendered = parse_date_arg(start.as_deref().unwrap_or(""))
            .and_then(|s| Ok((s, parse_date_arg(end.as_deref().unwrap_or(""))?)))
            .and_then(|(s, e)| get_dashboard(state, s, e))
            .map(|report| render_dashboard(&report, &state.config));

        match rendered {
            Ok(text) => writeln!(output, "{text}")?,
            Err(e) => {
                log::warn!("Range rejected: {}", e);
                writeln!(output, "Error: {e}")?;
            }
        }
        prompt(&mut output)?;
    }

    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> Result<(), AppError> {
    write!(output, "range> ")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::test_support::line;
    use crate::dataset::OrderDataset;

    fn state() -> AppState {
        let state = AppState::new(DashboardConfig::default());
        state
            .replace_dataset(OrderDataset::new(vec![
                line("a", "c1", "2018-01-01 08:00:00", 10.0),
                line("b", "c2", "2018-01-01 09:00:00", 20.0),
                line("c", "c3", "2018-01-03 10:00:00", 5.0),
            ]))
            .unwrap();
        state
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        run_explore(&state(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(" q "), ExploreInput::Quit);
        assert_eq!(parse_input(""), ExploreInput::Range(None, None));
        assert_eq!(
            parse_input("2018-01-01 2018-01-02"),
            ExploreInput::Range(Some("2018-01-01".into()), Some("2018-01-02".into()))
        );
        assert_eq!(
            parse_input("- 2018-01-02"),
            ExploreInput::Range(Some("-".into()), Some("2018-01-02".into()))
        );
    }

    #[test]
    fn test_full_range_then_quit() {
        let out = run("\nq\n2018-01-01\n");
        assert!(out.contains("Data spans 2018-01-01 → 2018-01-03."));
        assert_eq!(out.matches("== Daily Orders ==").count(), 1);
        assert!(out.contains("R$ 35,00"));
    }

    #[test]
    fn test_each_line_re_renders() {
        let out = run("2018-01-01 2018-01-01\n2018-01-03\n");
        assert_eq!(out.matches("== Daily Orders ==").count(), 2);
        assert!(out.contains("R$ 30,00"));
        assert!(out.contains("R$ 5,00"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let out = run("2018-01-02 2018-01-02\nnot-a-date\n2018-01-03 2018-01-01\n\n");
        assert!(out.contains("Error: No orders approved between 2018-01-02 and 2018-01-02"));
        assert!(out.contains("Error: Invalid date: not-a-date"));
        assert!(out.contains("Error: Invalid date range"));
        assert_eq!(out.matches("== Daily Orders ==").count(), 1);
    }
}
