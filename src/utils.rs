use std::{
    fs::File,
    io::{BufWriter, Write},
};

use camino::Utf8Path;
use color_eyre::{eyre::Context, Result};

pub fn write_to_file(
    destination: &Utf8Path,
    contents: &str,
) -> Result<()> {
    BufWriter::new(
        File::create(destination)
            .with_context(|| format!("unable to create file {:?}", destination))?,
    )
    .write(contents.as_bytes())
    .with_context(|| format!("unable to write to file {:?}", destination))?;

    Ok(())
}
