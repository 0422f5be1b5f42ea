//! First-match photo search driver

use crate::error::Result;
use crate::selection::{Constraint, Rendition, select_smallest};

/// Walk photo ids in server order and return the first qualifying URL
///
/// For each id, fetches its renditions and runs the size selection; the
/// first photo that admits a qualifying rendition wins and the walk stops
/// there — no ranking across photos. An exhausted stream is `Ok(None)`, a
/// reportable outcome rather than an error.
///
/// Any error from the id stream or from `fetch_renditions` aborts the whole
/// search. A bad photo is not skipped: malformed data from one photo likely
/// means the API contract changed for all of them.
pub fn find_first_match<I, F>(
    photo_ids: I,
    mut fetch_renditions: F,
    constraint: &Constraint,
) -> Result<Option<String>>
where
    I: IntoIterator<Item = Result<String>>,
    F: FnMut(&str) -> Result<Vec<Rendition>>,
{
    for photo_id in photo_ids {
        let photo_id = photo_id?;
        let renditions = fetch_renditions(&photo_id)?;

        if let Some(url) = select_smallest(&renditions, constraint) {
            tracing::debug!(photo_id = %photo_id, url, "found qualifying rendition");
            return Ok(Some(url.to_string()));
        }

        tracing::debug!(photo_id = %photo_id, "no qualifying rendition, trying next photo");
    }

    Ok(None)
}
