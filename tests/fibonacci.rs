use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/fibonacci.cb";
const EXPECTED: Expected = Expected {
    stdout: "55\n",
    stderr: "",
};

#[test]
fn recursive_fibonacci() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
