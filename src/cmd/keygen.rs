use std::fs::OpenOptions;
use std::path::PathBuf;

use cipher::rsa::KeyPairGenerator;
use cipher::DefaultRand;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use super::Cmd;

/// RSA key pair generation, the key pair is persisted as json.
#[derive(Default)]
pub struct KeygenCmd;

impl Cmd for KeygenCmd {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate an rsa key pair")
            .arg(
                Arg::new("bits")
                    .long("bits")
                    .short('b')
                    .value_parser(value_parser!(usize))
                    .default_value("2048")
                    .help("modulus length in bits"),
            )
            .arg(
                Arg::new("rounds")
                    .long("rounds")
                    .value_parser(value_parser!(usize))
                    .help("miller-rabin rounds per primality test"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_parser(value_parser!(PathBuf))
                    .required(true)
                    .action(ArgAction::Set)
                    .help("file the key pair is written to"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let bits = m.get_one::<usize>("bits").copied().unwrap_or(2048);
        let mut generator = KeyPairGenerator::new(bits)?;
        if let Some(rounds) = m.get_one::<usize>("rounds") {
            generator = generator.with_test_rounds(*rounds);
        }

        log::info!("generating a {} bit rsa key pair", bits);
        let key = generator.generate(&mut DefaultRand::default())?;

        let path = m.get_one::<PathBuf>("output").cloned().unwrap_or_default();
        let file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)?;
        serde_json::to_writer_pretty(file, &key)?;
        println!("key pair written to {}", path.display());

        Ok(())
    }
}
