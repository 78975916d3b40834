use std::path::{Component, Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Decoded `data:image/<ext>;base64,<payload>` upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Returns `Ok(None)` when the value is not a data URL at all.
    pub fn from_data_url(value: &str) -> crate::Result<Option<Self>> {
        let Some(rest) = value.strip_prefix("data:image") else {
            return Ok(None);
        };

        let Some((format, payload)) = rest.split_once(";base64,") else {
            crate::invalid!("image", "malformed image data");
        };

        let extension = format.trim_start_matches('/').to_lowercase();
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            crate::invalid!("image", "unsupported image format");
        }

        let Ok(bytes) = STANDARD.decode(payload.trim()) else {
            crate::invalid!("image", "malformed image data");
        };

        if bytes.is_empty() {
            crate::invalid!("image", "image is empty");
        }

        Ok(Some(Self { extension, bytes }))
    }
}

/// External blob storage; the core only keeps the returned URL.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, prefix: &str, image: ImageData) -> anyhow::Result<String>;

    async fn delete(&self, url: &str) -> anyhow::Result<()>;
}

/// Image value accepted for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    /// Freshly written to the blob store; release it if the record is not saved.
    Uploaded(String),
    /// The record's current image, submitted unchanged.
    Kept(String),
}

impl StoredImage {
    pub fn url(&self) -> &str {
        match self {
            Self::Uploaded(url) | Self::Kept(url) => url,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded(_))
    }
}

/// Uploads a data URL through `store`. Any other value is accepted only when
/// it equals `current`, the image the record already holds.
pub async fn resolve_image(
    store: &dyn BlobStore,
    prefix: &str,
    value: &str,
    current: Option<&str>,
) -> crate::Result<StoredImage> {
    if value.trim().is_empty() {
        crate::invalid!("image", "image required");
    }

    match ImageData::from_data_url(value)? {
        Some(image) => Ok(StoredImage::Uploaded(store.put(prefix, image).await?)),
        None if current == Some(value) => Ok(StoredImage::Kept(value.to_owned())),
        None => crate::invalid!("image", "image must be a base64 data URL"),
    }
}

/// Stores blobs under a local media root and serves them from `base_url`.
pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, prefix: &str, image: ImageData) -> anyhow::Result<String> {
        let dir = self.root.join(prefix);
        tokio::fs::create_dir_all(&dir).await?;

        let name = format!("{}.{}", ulid::Ulid::new(), image.extension);
        tokio::fs::write(dir.join(&name), &image.bytes).await?;

        tracing::debug!(prefix, name, size = image.bytes.len(), "blob stored");

        Ok(format!("{}/{prefix}/{name}", self.base_url))
    }

    async fn delete(&self, url: &str) -> anyhow::Result<()> {
        let Some(relative) = url
            .strip_prefix(&self.base_url)
            .and_then(|r| r.strip_prefix('/'))
        else {
            return Ok(());
        };

        let relative = Path::new(relative);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if !contained || relative.as_os_str().is_empty() {
            anyhow::bail!("blob path escapes media root: {url}");
        }

        let path = self.root.join(relative);
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
