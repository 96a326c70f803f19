use clap::{ArgMatches, Command};

mod block;
mod keygen;
mod sign;

pub use block::BlockCmd;
pub use keygen::KeygenCmd;
pub use sign::{SignCmd, VerifyCmd};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}
