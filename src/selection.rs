//! Rendition parsing and minimum-area size selection
//!
//! The heart of the program: given the list of renditions Flickr offers for
//! a photo, pick the smallest one that is still at least as large as the
//! configured wallpaper dimensions.

use crate::error::{Error, Result};
use serde_json::Value;

/// One available image variant (width, height, source URL) for a photo
///
/// Constructed fresh from each `photos.getSizes` response; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendition {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Direct URL of the image file
    pub source: String,
}

/// Minimum dimensions a rendition must meet to qualify
///
/// Built once from the validated configuration and immutable for the
/// lifetime of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraint {
    /// Minimum acceptable width in pixels
    pub min_width: u32,
    /// Minimum acceptable height in pixels
    pub min_height: u32,
}

/// Parse a raw `photos.getSizes` payload into renditions
///
/// The expected shape is `{"sizes": {"size": [{"width", "height", "source"},
/// ...]}}`. Flickr serves `width`/`height` either as JSON numbers or as
/// numeric strings depending on the size class; both are accepted. A missing
/// key, a non-array container, or a non-numeric dimension is a
/// [`Error::MalformedResponse`] — never skipped, never swallowed.
pub fn parse_renditions(raw: &Value) -> Result<Vec<Rendition>> {
    let container = raw
        .get("sizes")
        .and_then(|sizes| sizes.get("size"))
        .ok_or_else(|| Error::MalformedResponse("payload missing sizes.size".to_string()))?;

    let entries = container
        .as_array()
        .ok_or_else(|| Error::MalformedResponse("sizes.size is not an array".to_string()))?;

    let mut renditions = Vec::with_capacity(entries.len());
    for entry in entries {
        let width = dimension(entry, "width")?;
        let height = dimension(entry, "height")?;
        let source = entry
            .get("source")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedResponse("size entry missing source".to_string()))?
            .to_string();

        renditions.push(Rendition {
            width,
            height,
            source,
        });
    }

    Ok(renditions)
}

/// Extract one pixel dimension from a size entry, accepting number or string
fn dimension(entry: &Value, key: &str) -> Result<u32> {
    let value = entry
        .get(key)
        .ok_or_else(|| Error::MalformedResponse(format!("size entry missing {key}")))?;

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Error::MalformedResponse(format!("non-integer {key}: {n}"))),
        Value::String(s) => s
            .parse::<u32>()
            .map_err(|_| Error::MalformedResponse(format!("non-numeric {key}: {s:?}"))),
        other => Err(Error::MalformedResponse(format!(
            "unexpected {key} value: {other}"
        ))),
    }
}

/// Return the URL of the smallest rendition satisfying the constraint
///
/// Single left-to-right scan. Renditions below either minimum are skipped;
/// among the qualifiers, the one with the smallest area (width × height)
/// wins. The best candidate is replaced only on a strictly smaller area, so
/// equal-area ties keep the first rendition seen — downstream behavior
/// depends on this exact tie-break, do not "improve" it to a stable sort.
///
/// Returns `None` when the list is empty or nothing qualifies.
pub fn select_smallest<'a>(renditions: &'a [Rendition], constraint: &Constraint) -> Option<&'a str> {
    let mut best: Option<(&'a str, u64)> = None;

    for rendition in renditions {
        if rendition.width < constraint.min_width || rendition.height < constraint.min_height {
            continue;
        }

        let area = u64::from(rendition.width) * u64::from(rendition.height);
        match best {
            Some((_, best_area)) if area >= best_area => {}
            _ => best = Some((rendition.source.as_str(), area)),
        }
    }

    best.map(|(url, _)| url)
}
