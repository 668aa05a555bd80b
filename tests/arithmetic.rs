use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/arithmetic.cb";
const EXPECTED: Expected = Expected {
    stdout: "7\n9\n2.5\n",
    stderr: "",
};

#[test]
fn arithmetic_precedence_and_grouping() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
