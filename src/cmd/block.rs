use anyhow::bail;
use cipher::block_cipher::registry;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use super::Cmd;
use crate::GnudError;

/// Single-block encryption and decryption through the cipher registry.
#[derive(Default)]
pub struct BlockCmd;

impl Cmd for BlockCmd {
    const NAME: &'static str = "cipher";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("encrypt or decrypt a single block, or list the registered ciphers")
            .arg(
                Arg::new("list")
                    .long("list")
                    .short('l')
                    .action(ArgAction::SetTrue)
                    .help("list the registered cipher names"),
            )
            .arg(
                Arg::new("name")
                    .long("name")
                    .short('n')
                    .action(ArgAction::Set)
                    .default_value("serpent")
                    .help("cipher name"),
            )
            .arg(
                Arg::new("key")
                    .long("key")
                    .short('k')
                    .action(ArgAction::Set)
                    .help("key material, hex encoded"),
            )
            .arg(
                Arg::new("block-size")
                    .long("block-size")
                    .short('b')
                    .value_parser(value_parser!(usize))
                    .help("block size in bytes, the cipher default when omitted"),
            )
            .arg(
                Arg::new("decrypt")
                    .long("decrypt")
                    .short('d')
                    .action(ArgAction::SetTrue)
                    .help("decrypt instead of encrypt"),
            )
            .arg(
                Arg::new("block")
                    .action(ArgAction::Set)
                    .help("one block of data, hex encoded"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        if m.get_flag("list") {
            for name in registry::names() {
                println!("{}", name);
            }
            return Ok(());
        }

        let name = m.get_one::<String>("name").cloned().unwrap_or_default();
        let mut engine = match registry::create(&name)? {
            Some(engine) => engine,
            None => bail!(GnudError::UnknownCipher(name)),
        };

        let key = match m.get_one::<String>("key") {
            Some(key) => encode::base16::decode(key)?,
            None => bail!("--key is required unless --list is given"),
        };
        engine.init(&key, m.get_one::<usize>("block-size").copied())?;

        let block = match m.get_one::<String>("block") {
            Some(block) => encode::base16::decode(block)?,
            None => bail!("no block given"),
        };
        let block_size = engine.current_block_size()?;
        if block.len() != block_size {
            bail!(GnudError::InvalidBlockLen {
                expect: block_size,
                got: block.len()
            });
        }

        let mut out = vec![0u8; block_size];
        if m.get_flag("decrypt") {
            engine.decrypt_block(&block, &mut out)?;
        } else {
            engine.encrypt_block(&block, &mut out)?;
        }
        println!("{}", encode::base16::encode(&out));

        Ok(())
    }
}
