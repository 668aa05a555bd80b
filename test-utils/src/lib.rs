use std::{
    error::Error,
    io,
    path::Path,
    process::{Command, Output},
    str,
};

const COFFEE_BEAN_PATH: &str = "./target/debug/coffee_bean";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_interpreter(src_path: &Path) -> Result<Output, io::Error> {
    Command::new(COFFEE_BEAN_PATH).arg(src_path).output()
}

/// Runs a Coffee Bean source file through the compiled `coffee_bean` binary
/// and asserts its captured stdout/stderr match `expected`, and that it
/// exited successfully.
pub fn check_script(src_path: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(src_path)?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "coffee_bean exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Runs a Coffee Bean source file expected to fail at some stage of the
/// pipeline (lex/parse/runtime) and asserts the two-line `Line N`/`Error:
/// ...` message printed to stdout, plus a non-zero exit status.
pub fn check_failing_script(src_path: &Path, expected_stdout: &str) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(src_path)?;

    assert_eq!(str::from_utf8(&output.stdout)?, expected_stdout);
    assert!(
        !output.status.success(),
        "coffee_bean should have exited with a non-zero status"
    );

    Ok(())
}
