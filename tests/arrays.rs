use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/arrays.cb";
const EXPECTED: Expected = Expected {
    stdout: "4\n",
    stderr: "",
};

#[test]
fn array_literal_and_indexing() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
