use std::env;

use camino::Utf8PathBuf;
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use log::LevelFilter;

use rpmkit::{env_cmd::EnvCmd, flags::FlagSet, simple_logger::SimpleLogger};

fn main() -> Result<()> {
    color_eyre::install()?;
    log::set_boxed_logger(Box::new(SimpleLogger))?;
    log::set_max_level(LevelFilter::Info);

    let mut flags = FlagSet::new("rpm-env");
    flags.set_boolean("clean", None, "clean build directory");
    flags.parse_or_exit(env::args().skip(1));

    let root =
        Utf8PathBuf::from_path_buf(env::current_dir().context("unable to get current directory")?)
            .map_err(|path| eyre!("current directory {path:?} is not valid UTF-8"))?;

    EnvCmd {
        clean: flags.get_bool("clean"),
        root,
    }
    .run()
}
