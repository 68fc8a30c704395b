use anyhow::{Context, Result};
use image::GenericImageView;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

use crate::config::project_dirs;

const KNOWN_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Card thumbnail in the gallery grid.
    Preview,
    /// Full-size picture in the viewer.
    Full,
}

impl ImageSize {
    fn dir_name(self) -> &'static str {
        match self {
            ImageSize::Preview => "preview",
            ImageSize::Full => "full",
        }
    }
}

/// Downloaded images on disk, keyed by image id.
#[derive(Clone)]
pub struct ImageCache {
    pub cache_dir: PathBuf,
    agent: Agent,
}

impl ImageCache {
    pub fn new() -> Result<Self> {
        let dirs = project_dirs()?;
        Self::with_dir(dirs.cache_dir().join("images"))
    }

    pub fn with_dir(cache_dir: PathBuf) -> Result<Self> {
        for size in [ImageSize::Preview, ImageSize::Full] {
            fs::create_dir_all(cache_dir.join(size.dir_name()))
                .context("Failed to create cache directory")?;
        }
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build()
            .new_agent();
        Ok(Self { cache_dir, agent })
    }

    pub fn image_path(&self, size: ImageSize, id: u64, extension: &str) -> PathBuf {
        self.cache_dir
            .join(size.dir_name())
            .join(format!("{}.{}", id, extension))
    }

    pub fn find_existing_image(&self, size: ImageSize, id: u64) -> Option<PathBuf> {
        KNOWN_EXTENSIONS
            .iter()
            .map(|ext| self.image_path(size, id, ext))
            .find(|path| path.exists())
    }

    /// Returns the cached file for `id`, downloading it from `url` first if
    /// needed. Images larger than `max_width` x `max_height` are scaled down.
    pub fn fetch(
        &self,
        size: ImageSize,
        id: u64,
        url: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<PathBuf> {
        if let Some(path) = self.find_existing_image(size, id) {
            debug!("Cache hit for image {} ({:?})", id, size);
            return Ok(path);
        }

        debug!("Downloading image {} from {}", id, url);
        let bytes = self
            .agent
            .get(url)
            .call()
            .context("Failed to download image")?
            .body_mut()
            .read_to_vec()
            .context("Failed to read response body")?;

        self.store(size, id, url_extension(url), &bytes, max_width, max_height)
    }

    fn store(
        &self,
        size: ImageSize,
        id: u64,
        extension: &str,
        bytes: &[u8],
        max_width: u32,
        max_height: u32,
    ) -> Result<PathBuf> {
        let img = image::load_from_memory(bytes).context("Failed to load image from memory")?;
        let (width, height) = img.dimensions();
        let img = if width > max_width || height > max_height {
            // Resize to fit the bounds, maintaining aspect ratio.
            img.resize(max_width, max_height, image::imageops::FilterType::Triangle)
        } else {
            img
        };
        // The JPEG encoder has no alpha channel.
        let img = if matches!(extension, "jpg" | "jpeg") {
            image::DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };

        let format = image::ImageFormat::from_extension(extension)
            .with_context(|| format!("Unsupported image extension {}", extension))?;

        // Incomplete writes only ever exist under the `.part` name.
        let path = self.image_path(size, id, extension);
        let partial = path.with_extension(format!("{}.part", extension));
        if let Err(err) = img.save_with_format(&partial, format) {
            let _ = fs::remove_file(&partial);
            return Err(err).context("Failed to save image");
        }
        fs::rename(&partial, &path).context("Failed to move image into cache")?;
        Ok(path)
    }
}

/// File extension of the image behind `url`, defaulting to jpg.
fn url_extension(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());

    KNOWN_EXTENSIONS
        .iter()
        .find(|known| extension.as_deref() == Some(**known))
        .copied()
        .unwrap_or("jpg")
}
