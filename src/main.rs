use clap::Command;
use gnud::cmd::{BlockCmd, Cmd, KeygenCmd, SignCmd, VerifyCmd};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = Command::new("gnud")
        .version(env!("CARGO_PKG_VERSION"))
        .about("block ciphers and rsa-pss signatures")
        .subcommand(BlockCmd::cmd())
        .subcommand(KeygenCmd::cmd())
        .subcommand(SignCmd::cmd())
        .subcommand(VerifyCmd::cmd())
        .get_matches();

    match app.subcommand() {
        Some((BlockCmd::NAME, m)) => BlockCmd.run(m),
        Some((KeygenCmd::NAME, m)) => KeygenCmd.run(m),
        Some((SignCmd::NAME, m)) => SignCmd.run(m),
        Some((VerifyCmd::NAME, m)) => VerifyCmd.run(m),
        _ => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
