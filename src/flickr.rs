//! Flickr-backed photo source
//!
//! Wraps the two read-only Flickr REST calls the program needs: a paged tag
//! search (`flickr.photos.search`) walked lazily one page at a time, and the
//! per-photo size listing (`flickr.photos.getSizes`). Both go through the
//! [`PhotoSource`] trait so tests can substitute an in-memory double without
//! touching the search pipeline.

use crate::error::{Error, Result};
use crate::selection::{Rendition, parse_renditions};
use serde::Deserialize;
use std::time::Duration;

/// Endpoint for all Flickr REST calls
const REST_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

/// Photos requested per search page
const PAGE_SIZE: u32 = 100;

/// Request timeout for every API call
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Capability needed by the search pipeline
///
/// Two operations: enumerate photos matching a tag filter, and fetch the
/// available renditions of one photo. The production implementation is
/// [`FlickrClient`]; test doubles implement the same trait.
pub trait PhotoSource {
    /// Lazily enumerate ids of photos matching `tags`, in server order
    ///
    /// Each id is yielded exactly once; a failed page fetch surfaces through
    /// the iterator as an error and ends the walk.
    fn walk_tagged<'a>(&'a self, tags: &str) -> Box<dyn Iterator<Item = Result<String>> + 'a>;

    /// Fetch the available renditions for one photo
    fn rendition_sizes(&self, photo_id: &str) -> Result<Vec<Rendition>>;
}

/// Client for the Flickr REST API
pub struct FlickrClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl FlickrClient {
    /// Create a client against the public Flickr endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, REST_ENDPOINT)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// The underlying HTTP client, shared with the image downloader
    pub fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    /// Issue one REST call and return the decoded JSON envelope
    ///
    /// A non-2xx status is a transport error; an undecodable body or a
    /// `stat != "ok"` envelope is a malformed response.
    fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
                ("nojsoncallback", "1"),
            ])
            .query(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| Error::MalformedResponse(format!("undecodable {method} response: {e}")))?;

        if payload.get("stat").and_then(serde_json::Value::as_str) != Some("ok") {
            let detail = payload
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("missing stat");
            return Err(Error::MalformedResponse(format!("{method} failed: {detail}")));
        }

        Ok(payload)
    }

    /// Fetch one search result page
    fn search_page(&self, tags: &str, page: u32) -> Result<SearchPage> {
        let page_param = page.to_string();
        let per_page = PAGE_SIZE.to_string();
        let payload = self.call(
            "flickr.photos.search",
            &[
                ("tags", tags),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ],
        )?;

        let envelope: SearchEnvelope = serde_json::from_value(payload)
            .map_err(|e| Error::MalformedResponse(format!("unexpected search payload: {e}")))?;

        tracing::debug!(
            page,
            pages = envelope.photos.pages,
            count = envelope.photos.photo.len(),
            "fetched search page"
        );
        Ok(envelope.photos)
    }
}

impl PhotoSource for FlickrClient {
    fn walk_tagged<'a>(&'a self, tags: &str) -> Box<dyn Iterator<Item = Result<String>> + 'a> {
        Box::new(PhotoWalk {
            client: self,
            tags: tags.to_string(),
            next_page: 1,
            pages: None,
            buffered: Vec::new().into_iter(),
            failed: false,
        })
    }

    fn rendition_sizes(&self, photo_id: &str) -> Result<Vec<Rendition>> {
        let payload = self.call("flickr.photos.getSizes", &[("photo_id", photo_id)])?;
        parse_renditions(&payload)
    }
}

/// `flickr.photos.search` response envelope
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    photos: SearchPage,
}

/// One page of search results
#[derive(Debug, Deserialize)]
struct SearchPage {
    /// Total page count advertised by the server
    pages: u32,
    /// Photo records on this page; only the id is consumed
    photo: Vec<PhotoEntry>,
}

/// A single search result; the id is all the pipeline needs
#[derive(Debug, Deserialize)]
struct PhotoEntry {
    id: String,
}

/// Lazy page-at-a-time iterator over search result ids
///
/// Page N+1 is requested only once page N has been drained, and the walk
/// stops at the page count the server advertised. After an error the
/// iterator is fused.
struct PhotoWalk<'a> {
    client: &'a FlickrClient,
    tags: String,
    next_page: u32,
    /// Advertised page count, known after the first fetch
    pages: Option<u32>,
    buffered: std::vec::IntoIter<String>,
    failed: bool,
}

impl Iterator for PhotoWalk<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(id) = self.buffered.next() {
                return Some(Ok(id));
            }

            if let Some(pages) = self.pages
                && self.next_page > pages
            {
                return None;
            }

            match self.client.search_page(&self.tags, self.next_page) {
                Ok(page) => {
                    self.pages = Some(page.pages);
                    self.next_page += 1;
                    self.buffered = page
                        .photo
                        .into_iter()
                        .map(|entry| entry.id)
                        .collect::<Vec<_>>()
                        .into_iter();
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
