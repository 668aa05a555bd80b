use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/scope.cb";
const EXPECTED: Expected = Expected {
    stdout: "2\n",
    stderr: "",
};

#[test]
fn assignment_walks_outward_to_find_an_existing_binding() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
