use std::io;

fn main() {
    doukit_cli::logging::init_logging();
    let args = std::env::args().collect::<Vec<_>>();
    let code = doukit_cli::run(args, &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
