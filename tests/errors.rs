use std::{error::Error, path::Path};

use coffee_bean_test_support::check_failing_script;

#[test]
fn undefined_variable_reports_line_and_message() -> Result<(), Box<dyn Error>> {
    check_failing_script(
        Path::new("./demos/undefined_variable.cb"),
        "Line 1\nError: Undefined variable 'y'.\n",
    )
}

#[test]
fn missing_end_is_a_parser_error() -> Result<(), Box<dyn Error>> {
    check_failing_script(
        Path::new("./demos/missing_end.cb"),
        "Line 3\nError: Expected 'end' to close block.\n",
    )
}

#[test]
fn unterminated_string_is_a_lexer_error() -> Result<(), Box<dyn Error>> {
    check_failing_script(
        Path::new("./demos/unterminated_string.cb"),
        "Line 1\nError: Unterminated string\n",
    )
}
