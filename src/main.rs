//! Command-line entry point for walls
//!
//! `walls [config_file]` — one linear run: load config, walk the tagged
//! search, select a rendition, clear the image directory, download, exit.
//! Success prints the chosen URL on stdout and exits 0; every handled
//! failure writes one line to stderr and exits 1.

use std::path::PathBuf;
use std::process::ExitCode;

use walls::flickr::{FlickrClient, PhotoSource};
use walls::{Config, config, download, find_first_match};

fn main() -> ExitCode {
    // Program output goes to stdout; logs are opt-in via WALLS_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WALLS_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Run one search-and-download cycle, reducing every outcome to the exit
/// contract: `Ok` for success, a single printable line for failure
fn run(args: &[String]) -> Result<(), String> {
    let path = config_path(args)?;
    let config = Config::load(&path).map_err(|e| e.to_string())?;

    match pipeline(&config) {
        Ok(Some(url)) => {
            println!("{url}");
            Ok(())
        }
        Ok(None) => Err("No matching photos found.".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Resolve the config file path from the argument list
fn config_path(args: &[String]) -> Result<PathBuf, String> {
    match args {
        [_] => config::default_path().ok_or_else(|| "Could not determine home directory.".to_string()),
        [_, path] => Ok(PathBuf::from(path)),
        _ => Err("Usage: walls [config_file]".to_string()),
    }
}

/// Find one qualifying photo and store it; `Ok(None)` when the search stream
/// is exhausted without a match
fn pipeline(config: &Config) -> walls::Result<Option<String>> {
    let client = FlickrClient::new(&config.api_key)?;

    let found = find_first_match(
        client.walk_tagged(&config.tags),
        |id| client.rendition_sizes(id),
        &config.constraint(),
    )?;

    let Some(url) = found else {
        return Ok(None);
    };

    download::clear_directory(&config.image_dir)?;
    download::save_image(client.http(), &url, &config.image_dir)?;
    Ok(Some(url))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn explicit_config_path_is_used() {
        let path = config_path(&args(&["walls", "/tmp/custom.toml"])).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn too_many_arguments_is_a_usage_error() {
        let err = config_path(&args(&["walls", "a", "b"])).unwrap_err();
        assert_eq!(err, "Usage: walls [config_file]");
    }

    #[test]
    fn no_arguments_falls_back_to_home_wallsrc() {
        if let Ok(path) = config_path(&args(&["walls"])) {
            assert!(path.ends_with(".wallsrc"), "unexpected default: {path:?}");
        }
    }

    #[test]
    fn unloadable_config_surfaces_one_error_line() {
        let err = run(&args(&["walls", "/nonexistent/wallsrc.toml"])).unwrap_err();
        assert!(
            err.contains("couldn't load config"),
            "unexpected message: {err}"
        );
        assert!(!err.contains('\n'), "error must be a single line: {err:?}");
    }
}
