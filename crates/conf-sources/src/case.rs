//! Name folding between the public naming convention and source conventions

use heck::{ToLowerCamelCase, ToShoutySnakeCase};

/// Fold a name into lowerCamelCase (`CAMEL_CASE_STRING` -> `camelCaseString`).
pub fn camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Fold a name into CONSTANT_CASE (`typeConfTestObject` -> `TYPE_CONF_TEST_OBJECT`).
pub fn constant_case(name: &str) -> String {
    name.to_shouty_snake_case()
}
