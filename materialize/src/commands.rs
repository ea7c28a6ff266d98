use crate::{CLAP_STYLING, DEFAULT_DIAGRAM};
use clap::arg;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("materialize")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("materialize")
        .about("Enumerate STRIDE threats from a data flow diagram and create test case stubs")
        .styles(CLAP_STYLING)
        .arg(
            arg!(--"diagram" <PATH>)
                .required(false)
                .help("The data flow diagram filename")
                .default_value(DEFAULT_DIAGRAM),
        )
        .arg(
            arg!(--"featurefile" <PATH>)
                .required(false)
                .help("The feature filename to write (default: <diagram file name>.feature)"),
        )
}
