use super::Commands;
use crate::ElapsedTime;
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::Command;

pub type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Runs a parsed command against the process' stdio and returns the exit
/// code to report.
pub fn run_command(command: Commands) -> CliResult<i32> {
    match command {
        Commands::Run {
            output,
            program,
            args,
        } => {
            let mut stdout = io::stdout();
            time_program(&program, &args, output.as_deref(), &mut stdout)
        }
        Commands::Show { file } => {
            show_record(file.as_deref(), io::stdin(), &mut io::stdout())?;
            Ok(0)
        }
    }
}

/// Times `program` to completion. The record goes to `output` when given,
/// otherwise to `out`. Returns the child's exit code, or 1 when it was
/// terminated without one.
pub fn time_program<W: Write>(
    program: &str,
    args: &[String],
    output: Option<&Path>,
    out: &mut W,
) -> CliResult<i32> {
    let mut elapsed = ElapsedTime::new();

    tracing::info!(program, ?args, "running");
    elapsed.start();
    let status = Command::new(program).args(args).status()?;
    elapsed.stop();
    tracing::info!(%status, %elapsed, "finished");

    let record = elapsed.to_json()?;
    match output {
        Some(path) => std::fs::write(path, record + "\n")?,
        None => writeln!(out, "{}", record)?,
    }
    eprintln!("{} took {}", program, elapsed);

    Ok(status.code().unwrap_or(1))
}

/// Renders the record in `file`, or the one on `stdin` when `file` is
/// missing or `-`.
pub fn show_record<R: Read, W: Write>(
    file: Option<&Path>,
    mut stdin: R,
    out: &mut W,
) -> CliResult<()> {
    let bytes = match file {
        Some(path) if path != Path::new("-") => std::fs::read(path)?,
        _ => {
            let mut buf = vec![];
            stdin.read_to_end(&mut buf)?;
            buf
        }
    };

    let elapsed = ElapsedTime::from_slice(&bytes)?;
    writeln!(out, "{} ({})", elapsed, elapsed.state())?;

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{ElapsedTimeError, State};
    use std::io::Cursor;

    const RECORD: &str = r#"{"start":"2021-06-01T12:00:00Z","stop":"2021-06-01T13:02:03.004Z"}"#;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn run_writes_record_to_stdout() {
        let mut out = vec![];
        let code = time_program("true", &[], None, &mut out).unwrap();

        assert_eq!(code, 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let elapsed = ElapsedTime::from_json(text.trim_end()).unwrap();
        assert_eq!(elapsed.state(), State::Stopped);
    }

    #[test]
    fn run_propagates_exit_code() {
        let mut out = vec![];

        assert_eq!(time_program("false", &[], None, &mut out).unwrap(), 1);
        assert_eq!(
            time_program("sh", &args(&["-c", "exit 3"]), None, &mut out)
                .unwrap(),
            3
        );
    }

    #[test]
    fn run_killed_child_reports_one() {
        let mut out = vec![];
        let code =
            time_program("sh", &args(&["-c", "kill -9 $$"]), None, &mut out)
                .unwrap();

        assert_eq!(code, 1);
    }

    #[test]
    fn run_writes_record_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let mut out = vec![];

        let code =
            time_program("true", &[], Some(path.as_path()), &mut out).unwrap();

        assert_eq!(code, 0);
        assert!(out.is_empty());
        let bytes = std::fs::read(&path).unwrap();
        let elapsed = ElapsedTime::from_slice(&bytes).unwrap();
        assert_eq!(elapsed.state(), State::Stopped);
    }

    #[test]
    fn run_missing_program_fails() {
        let mut out = vec![];

        assert!(time_program("timet-no-such-program", &[], None, &mut out)
            .is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn show_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, RECORD).unwrap();
        let mut out = vec![];

        show_record(Some(path.as_path()), io::empty(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1h2m3.004s (stopped)\n");
    }

    #[test]
    fn show_dash_reads_stdin() {
        let mut out = vec![];

        show_record(Some(Path::new("-")), Cursor::new(RECORD), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1h2m3.004s (stopped)\n");
    }

    #[test]
    fn show_without_file_reads_stdin() {
        let mut out = vec![];

        show_record(None, Cursor::new("{}"), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0s (initial)\n");
    }

    #[test]
    fn show_rejects_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, r#"{"start": "soon"}"#).unwrap();
        let mut out = vec![];

        let err = show_record(Some(path.as_path()), io::empty(), &mut out)
            .unwrap_err();

        let err = err.downcast::<ElapsedTimeError>().unwrap();
        assert!(matches!(*err, ElapsedTimeError::Parse { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn show_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = vec![];

        let missing = dir.path().join("missing.json");
        let result = show_record(Some(missing.as_path()), io::empty(), &mut out);
        assert!(result.is_err());
    }
}
