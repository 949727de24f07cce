use crate::error::Result;
use crate::generator;
use crate::schema::Family;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    Truncate,
    Append,
}

pub fn write_families(dir: &Path, families: &[Family], mode: WriteMode) -> Result<()> {
    for family in families.iter() {
        write_family(dir, family, mode)?;
    }
    Ok(())
}

/// Writes one family's artifact to `<dir>/<BaseName>.java` through a
/// single scoped handle. `Truncate` fully regenerates the artifact;
/// `Append` adds the whole generated family after any existing content.
pub fn write_family(dir: &Path, family: &Family, mode: WriteMode) -> Result<()> {
    let path = dir.join(format!("{}.java", family.base_name));

    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match mode {
        WriteMode::Truncate => options.truncate(true),
        WriteMode::Append => options.append(true),
    };

    let mut file = options.open(path)?;
    for line in generator::generate(family) {
        writeln!(file, "{}", line)?;
    }

    Ok(())
}
