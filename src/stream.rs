// Resolves a command-line image reference to a readable byte stream.

use crate::error::{FaceError, Result};
use log::debug;
use reqwest::blocking::{Body, Client, Response};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Image bytes handed to the face service. Files keep their type so the
/// upload can carry a Content-Length.
pub enum ImageStream {
    File(File),
    Remote(Response),
}

impl Read for ImageStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            ImageStream::File(f) => f.read(buf),
            ImageStream::Remote(r) => r.read(buf),
        }
    }
}

impl From<ImageStream> for Body {
    fn from(stream: ImageStream) -> Body {
        match stream {
            ImageStream::File(f) => Body::from(f),
            ImageStream::Remote(r) => Body::new(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    File(PathBuf),
}

impl ImageSource {
    /// Anything starting with the literal prefix `http` is fetched over
    /// the network, everything else is a local path.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http") {
            ImageSource::Url(reference.to_string())
        } else {
            ImageSource::File(PathBuf::from(reference))
        }
    }
}

#[derive(Clone)]
pub struct StreamOpener {
    http: Client,
}

impl StreamOpener {
    pub fn new() -> Result<Self> {
        Ok(StreamOpener {
            http: Client::builder().build()?,
        })
    }

    pub fn open(&self, reference: &str) -> Result<ImageStream> {
        self.open_source(&ImageSource::parse(reference))
    }

    pub fn open_source(&self, source: &ImageSource) -> Result<ImageStream> {
        match source {
            ImageSource::Url(url) => {
                debug!("GET {url}");
                let res = self.http.get(url).send()?.error_for_status()?;
                Ok(ImageStream::Remote(res))
            }
            ImageSource::File(path) => {
                let file = File::open(path).map_err(|e| FaceError::io(path, e))?;
                Ok(ImageStream::File(file))
            }
        }
    }
}
