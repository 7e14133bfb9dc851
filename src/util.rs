use crate::config::Config;
use crate::emit::Cases;
use std::fs::File;
use std::io::{BufWriter, Error, ErrorKind, Result, Write};
use std::path::Path;

/// Attach the offending path to an I/O error, keeping its kind.
fn with_path(path: &Path, e: Error) -> Error {
    Error::new(e.kind(), format!("{}: {}", path.display(), e))
}

/// Read the given file into a generator config.
pub fn read_config(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path).map_err(|e| with_path(path, e))?;
    let config: Config = match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("{}: {}", path.display(), e),
            ))
        }
    };
    config.validate().map_err(|e| with_path(path, e))?;
    Ok(config)
}

/// Read the given SQL file and classify each of its lines.
pub fn read_cases<'a>(path: &Path, config: &'a Config) -> Result<Cases<'a>> {
    let data = std::fs::read_to_string(path).map_err(|e| with_path(path, e))?;
    Ok(Cases::from_source(&data, config))
}

/// Open the sink generated cases are written to: the given file, or stdout
/// when there is none.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let f = File::create(path).map_err(|e| with_path(path, e))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}
