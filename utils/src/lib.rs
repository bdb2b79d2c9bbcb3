mod logging;
mod module;
mod overrides;
mod rules;
mod string_utils;
mod variables;

pub use logging::setup_logging;
pub use module::{load, load_dir, load_file, load_path};
pub use overrides::{
    coerce_raw_value, load_var_file, merge_overrides, parse_var_assignment, parse_var_flags,
};
pub use rules::verify_validation_rules;
pub use string_utils::{to_snake_case, verify_variable_name_casing};
pub use variables::{resolve, validate};
