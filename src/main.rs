use std::process;
use std::time::Duration;

use clap::Parser;

use ssosign::cli::{self, Args};
use ssosign::{KeyringStore, TimedStore};

fn main() {
    env_logger::init();
    let args = Args::parse();
    let store = TimedStore::new(KeyringStore::new(), Duration::from_secs(args.timeout));
    match cli::run(&args, store) {
        Ok(rendered) => println!("{}", rendered),
        Err(err) => {
            eprintln!("ssosign: {}", err);
            process::exit(1);
        }
    }
}
