use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/closures.cb";
const EXPECTED: Expected = Expected {
    stdout: "8\n15\n",
    stderr: "",
};

#[test]
fn functions_capture_their_defining_environment() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
