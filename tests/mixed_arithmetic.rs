use std::{error::Error, path::Path};

use coffee_bean_test_support::{check_script, Expected};

const SRC_PATH: &str = "./demos/mixed_arithmetic.cb";
const EXPECTED: Expected = Expected {
    stdout: "3.5\n2.0\n",
    stderr: "",
};

#[test]
fn mixed_int_float_arithmetic_promotes_to_float() -> Result<(), Box<dyn Error>> {
    check_script(Path::new(SRC_PATH), EXPECTED)
}
