mod list;
mod resolve;
mod validate;

pub use list::handle_list;
pub use resolve::{handle_resolve, OutputFormat};
pub use validate::handle_validate;

use colored::Colorize;
use log::debug;

pub(crate) fn exit_with_error(context: &str, err: anyhow::Error) -> ! {
    debug!("{}: {:?}", context, err);
    eprintln!("{} {}: {:#}", "Error:".red().bold(), context, err);
    std::process::exit(1);
}
