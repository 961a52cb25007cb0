use std::env;

use color_eyre::Result;
use log::LevelFilter;

use rpmkit::{
    flags::FlagSet,
    simple_logger::SimpleLogger,
    spec_cmd::{SpecCmd, DEFAULT_TEMPLATE},
};

fn main() -> Result<()> {
    color_eyre::install()?;
    log::set_boxed_logger(Box::new(SimpleLogger))?;
    log::set_max_level(LevelFilter::Info);

    let mut flags = FlagSet::new("gen-spec");
    flags.set_string("summary", None, "short summary");
    flags.set_string("name", None, "project name");
    flags.set_string("version", None, "version number");
    flags.set_string("release", None, "release number");
    flags.set_string("license", None, "license type");
    flags.set_string("description", None, "description of the package");
    flags.set_string("sourceloc", None, "location of source tar");
    flags.set_string("group", None, "package group");
    flags.set_string("type", Some("bin"), "src or bin package");
    flags.set_string("buildarch", Some("noarch"), "build architecture");
    flags.set_string("deps", None, "rpm dependencies");
    flags.set_string(
        "template",
        Some(DEFAULT_TEMPLATE),
        "path to the spec template",
    );
    flags.parse_or_exit(env::args().skip(1));

    SpecCmd::from_flags(&flags).run()
}
