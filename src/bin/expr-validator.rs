use std::{env, path::PathBuf, process::ExitCode};

use expr_validator::{validate_file, LineReport};

#[derive(Debug, Default)]
struct OutputOptions {
    json: bool,
    pretty: bool,
    quiet: bool,
}

#[derive(Debug)]
struct Invocation {
    options: OutputOptions,
    inputs: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(env::args().collect()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every checked expression was valid.
fn run(args: Vec<String>) -> Result<bool, String> {
    if args.len() < 3 {
        return Err("not enough arguments".to_string());
    }

    let command = args[1].as_str();
    let invocation = parse_options(&args[2..])?;

    let reports: Vec<LineReport> = match command {
        "check" => invocation
            .inputs
            .iter()
            .enumerate()
            .map(|(idx, expr)| LineReport::new(idx + 1, expr))
            .collect(),
        "file" => {
            let [path] = invocation.inputs.as_slice() else {
                return Err("file requires exactly one input path".to_string());
            };
            let path = PathBuf::from(path);
            validate_file(&path).map_err(|e| format!("{}: {e}", path.display()))?
        }
        _ => return Err(format!("unknown command '{command}'")),
    };

    emit(&reports, &invocation.options)?;
    Ok(reports.iter().all(|r| r.valid))
}

fn parse_options(args: &[String]) -> Result<Invocation, String> {
    let mut options = OutputOptions::default();
    let mut inputs = Vec::new();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--pretty" => options.pretty = true,
            "--quiet" => options.quiet = true,
            "--" => {
                inputs.extend(args[i + 1..].iter().cloned());
                break;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{other}'"));
            }
            other => inputs.push(other.to_string()),
        }
        i += 1;
    }

    if inputs.is_empty() {
        return Err("no input given".to_string());
    }
    if options.pretty && !options.json {
        return Err("--pretty requires --json".to_string());
    }

    Ok(Invocation { options, inputs })
}

fn emit(reports: &[LineReport], options: &OutputOptions) -> Result<(), String> {
    let shown: Vec<&LineReport> = reports
        .iter()
        .filter(|r| !(options.quiet && r.valid))
        .collect();

    if options.json {
        let out = if options.pretty {
            serde_json::to_string_pretty(&shown)
        } else {
            serde_json::to_string(&shown)
        }
        .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    for report in shown {
        match &report.message {
            None => println!("{}: OK", report.line),
            Some(message) => println!("{}: {message}", report.line),
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("usage:");
    eprintln!("  expr-validator check <expression>... [--json [--pretty]] [--quiet]");
    eprintln!("  expr-validator file <path> [--json [--pretty]] [--quiet]");
    eprintln!();
    eprintln!("file input holds one expression per line; blank lines and lines");
    eprintln!("starting with '#' are skipped.");
    eprintln!();
    eprintln!("use '--' before expressions that begin with '--'.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_collects_expressions_and_flags() {
        let inv = parse_options(&strings(&["f(1)", "--json", "-5"])).unwrap();
        assert!(inv.options.json);
        assert!(!inv.options.pretty);
        assert_eq!(inv.inputs, strings(&["f(1)", "-5"]));
    }

    #[test]
    fn parse_double_dash_ends_options() {
        let inv = parse_options(&strings(&["--quiet", "--", "--5", "--json"])).unwrap();
        assert!(inv.options.quiet);
        assert!(!inv.options.json);
        assert_eq!(inv.inputs, strings(&["--5", "--json"]));
    }

    #[test]
    fn parse_rejects_unknown_option() {
        let err = parse_options(&strings(&["--yaml", "1"])).unwrap_err();
        assert!(err.contains("unknown option '--yaml'"));
    }

    #[test]
    fn parse_requires_input() {
        let err = parse_options(&strings(&["--json"])).unwrap_err();
        assert!(err.contains("no input"));
    }

    #[test]
    fn pretty_requires_json() {
        let err = parse_options(&strings(&["--pretty", "1"])).unwrap_err();
        assert!(err.contains("--pretty requires --json"));
    }

    #[test]
    fn check_reports_overall_verdict() {
        assert!(run(strings(&["expr-validator", "check", "1 == 2", "TRUE"])).unwrap());
        assert!(!run(strings(&["expr-validator", "check", "1 = 2"])).unwrap());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let err = run(strings(&["expr-validator", "lint", "1"])).unwrap_err();
        assert!(err.contains("unknown command 'lint'"));
    }

    #[test]
    fn file_requires_single_path() {
        let err = run(strings(&["expr-validator", "file", "a", "b"])).unwrap_err();
        assert!(err.contains("exactly one input path"));
    }
}
