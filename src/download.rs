//! Image directory maintenance and download-to-disk

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename used when the URL has no usable path segment
const FALLBACK_FILENAME: &str = "wallpaper.jpg";

/// Remove the regular files directly inside the image directory
///
/// Subdirectories and their contents are left untouched, so after the next
/// download the directory holds exactly one wallpaper at its top level.
pub fn clear_directory(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Download `url` into `dir`, replacing an existing file of the same name
///
/// One blocking request, streamed straight to disk. A non-2xx status is a
/// [`Error::Transport`] — a different failure than a malformed API payload,
/// and reported as such.
pub fn save_image(http: &reqwest::blocking::Client, url: &str, dir: &Path) -> Result<PathBuf> {
    let mut response = http.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Transport {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let path = dir.join(filename_from_url(url));
    let mut file = fs::File::create(&path)?;
    io::copy(&mut response, &mut file)?;

    tracing::info!(url, path = %path.display(), "saved wallpaper");
    Ok(path)
}

/// Last path segment of the URL, or a fixed fallback
fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url)
        && let Some(mut segments) = parsed.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        return last.to_string();
    }

    FALLBACK_FILENAME.to_string()
}
