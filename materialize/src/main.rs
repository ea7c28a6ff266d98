use materialize::commands::command_argument_builder;
use materialize::handle_materialize;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = command_argument_builder().get_matches();
    handle_materialize(&matches);
}
