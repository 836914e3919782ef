fn main() {
    if let Err(err) = arith_drill_gen::cli::run() {
        eprintln!("Error: {:#}", err);
        #[allow(clippy::exit)]
        std::process::exit(1);
    }
}
