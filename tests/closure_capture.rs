use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/closure_capture.cb";
const EXPECTED: Expected = Expected {
    stdout: "10\n",
    stderr: "",
};

#[test]
fn function_defined_inside_a_block_still_works_after_the_block_exits() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
