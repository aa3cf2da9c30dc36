// SPDX-License-Identifier: MPL-2.0
//! Fetching and decoding card thumbnails.

use crate::config::defaults::{EMBED_REQUEST_TIMEOUT_SECS, THUMBNAIL_MAX_EDGE_PX};
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A decoded, downscaled image ready for display.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Where an item's image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
}

impl ImageSource {
    /// Classifies an image reference. Relative paths resolve against `base_dir`.
    #[must_use]
    pub fn parse(reference: &str, base_dir: Option<&Path>) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return ImageSource::Remote(reference.to_string());
        }
        let path = PathBuf::from(reference.strip_prefix("file://").unwrap_or(reference));
        match base_dir {
            Some(base) if path.is_relative() => ImageSource::Local(base.join(path)),
            _ => ImageSource::Local(path),
        }
    }
}

/// Decodes `bytes` and shrinks the image so neither edge exceeds `max_edge`.
pub fn decode_thumbnail(bytes: &[u8], max_edge: u32) -> Result<Thumbnail> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();
    let resized = if width > max_edge || height > max_edge {
        decoded.thumbnail(max_edge, max_edge)
    } else {
        decoded
    };

    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Thumbnail {
        handle: image::Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

/// Loads thumbnails. Cheap to clone; clones share the HTTP client.
#[derive(Debug, Clone)]
pub struct ThumbnailLoader {
    client: reqwest::Client,
    base_dir: Option<PathBuf>,
    max_edge: u32,
}

impl ThumbnailLoader {
    /// `base_dir` resolves relative image paths, usually the data file's directory.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(EMBED_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("prompt_gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_dir,
            max_edge: THUMBNAIL_MAX_EDGE_PX,
        })
    }

    pub async fn load(&self, reference: &str) -> Result<Thumbnail> {
        let bytes = match ImageSource::parse(reference, self.base_dir.as_deref()) {
            ImageSource::Remote(url) => {
                let response = self.client.get(&url).send().await?.error_for_status()?;
                response.bytes().await?.to_vec()
            }
            ImageSource::Local(path) => tokio::fs::read(&path).await?,
        };

        let max_edge = self.max_edge;
        tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, max_edge))
            .await
            .map_err(|e| Error::Image(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn urls_are_remote() {
        assert_eq!(
            ImageSource::parse("https://picsum.photos/1", None),
            ImageSource::Remote("https://picsum.photos/1".into())
        );
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/data");
        assert_eq!(
            ImageSource::parse("img/a.png", Some(base)),
            ImageSource::Local(PathBuf::from("/data/img/a.png"))
        );
        assert_eq!(
            ImageSource::parse("file:///abs/b.png", Some(base)),
            ImageSource::Local(PathBuf::from("/abs/b.png"))
        );
    }

    #[test]
    fn large_images_are_downscaled_keeping_aspect() {
        let thumb = decode_thumbnail(&png_bytes(1024, 512), 256).expect("decode");
        assert_eq!((thumb.width, thumb.height), (256, 128));
    }

    #[test]
    fn small_images_keep_their_size() {
        let thumb = decode_thumbnail(&png_bytes(40, 30), 256).expect("decode");
        assert_eq!((thumb.width, thumb.height), (40, 30));
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            decode_thumbnail(b"not an image", 256),
            Err(Error::Image(_))
        ));
    }

    #[tokio::test]
    async fn loads_local_files() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("card.png"), png_bytes(10, 10)).expect("write");

        let loader = ThumbnailLoader::new(Some(dir.path().to_path_buf())).expect("loader");
        let thumb = loader.load("card.png").await.expect("thumbnail");
        assert_eq!(thumb.width, 10);
    }

    #[tokio::test]
    async fn missing_local_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let loader = ThumbnailLoader::new(Some(dir.path().to_path_buf())).expect("loader");
        assert!(matches!(loader.load("nope.png").await, Err(Error::Io(_))));
    }
}
