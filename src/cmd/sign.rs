use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use cipher::rsa::{PrivateKey, PssSign, PssVerify, PublicKey};
use cipher::{DefaultRand, Sign, Verify};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crypto_hash::Digest;

use super::Cmd;
use crate::GnudError;

fn key_arg() -> Arg {
    Arg::new("key")
        .long("key")
        .short('k')
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .action(ArgAction::Set)
        .help("json key file")
}

fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .short('f')
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .action(ArgAction::Set)
        .help("file holding the message")
}

fn hash_arg() -> Arg {
    Arg::new("hash")
        .long("hash")
        .default_value("sha256")
        .action(ArgAction::Set)
        .help("digest algorithm, sha1 or sha256")
}

fn salt_arg() -> Arg {
    Arg::new("salt")
        .long("salt")
        .value_parser(value_parser!(usize))
        .help("salt length in bytes, defaults to the digest length")
}

fn hasher(m: &ArgMatches) -> anyhow::Result<Box<dyn Digest>> {
    let name = m.get_one::<String>("hash").cloned().unwrap_or_default();
    match crypto_hash::by_name(&name) {
        Some(hasher) => Ok(hasher),
        None => bail!(GnudError::UnknownHash(name)),
    }
}

/// RSA-PSS signing of a file with a json private key.
#[derive(Default)]
pub struct SignCmd;

impl Cmd for SignCmd {
    const NAME: &'static str = "sign";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("sign a file with rsa-pss")
            .arg(key_arg())
            .arg(file_arg())
            .arg(hash_arg())
            .arg(salt_arg())
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_parser(value_parser!(PathBuf))
                    .action(ArgAction::Set)
                    .help("signature file, hex on stdout when omitted"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let key_path = m.get_one::<PathBuf>("key").cloned().unwrap_or_default();
        let key: PrivateKey = serde_json::from_reader(File::open(key_path)?)?;

        let salt_len = m.get_one::<usize>("salt").copied();
        let pss = PssSign::new(key, hasher(m)?, DefaultRand::default(), salt_len)?;

        let file = m.get_one::<PathBuf>("file").cloned().unwrap_or_default();
        let msg = std::fs::read(file)?;
        let mut signature = vec![];
        pss.sign(&msg, &mut signature)?;

        match m.get_one::<PathBuf>("output") {
            Some(path) => {
                let mut out = OpenOptions::new().create_new(true).write(true).open(path)?;
                out.write_all(&signature)?;
            }
            None => println!("{}", encode::base16::encode(&signature)),
        }

        Ok(())
    }
}

/// RSA-PSS verification against a json public key. The key file may hold
/// either a bare public key or a full key pair.
#[derive(Default)]
pub struct VerifyCmd;

impl Cmd for VerifyCmd {
    const NAME: &'static str = "verify";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("verify an rsa-pss signature")
            .arg(key_arg())
            .arg(file_arg())
            .arg(hash_arg())
            .arg(salt_arg())
            .arg(
                Arg::new("signature")
                    .long("signature")
                    .short('s')
                    .value_parser(value_parser!(PathBuf))
                    .required(true)
                    .action(ArgAction::Set)
                    .help("signature file in the raw wire format"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let key_path = m.get_one::<PathBuf>("key").cloned().unwrap_or_default();
        let key: serde_json::Value = serde_json::from_reader(File::open(key_path)?)?;
        let key: PublicKey = match key.get("pk") {
            Some(pk) => serde_json::from_value(pk.clone())?,
            None => serde_json::from_value(key)?,
        };

        let salt_len = m.get_one::<usize>("salt").copied();
        let pss = PssVerify::new(key, hasher(m)?, salt_len)?;

        let file = m.get_one::<PathBuf>("file").cloned().unwrap_or_default();
        let msg = std::fs::read(file)?;
        let sig_path = m
            .get_one::<PathBuf>("signature")
            .cloned()
            .unwrap_or_default();
        let signature = std::fs::read(sig_path)?;

        if pss.verify(&msg, &signature) {
            println!("Validation success.");
            Ok(())
        } else {
            bail!("Validation failed.")
        }
    }
}
