//! Blob store for uploaded ad images.
//!
//! Images arrive base64-encoded in the create request, are decoded and
//! written to a directory on disk, and are served back as static files
//! under `/images`. The store returns the public URL that gets persisted
//! on the ad record.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use url::Url;
use uuid::Uuid;

use crate::error::AppError;

/// Filesystem-backed image store.
pub struct ImageStore {
    root: PathBuf,
    public_base_url: Url,
}

impl ImageStore {
    /// Build a store writing under `root` and linking under `public_base_url`.
    pub fn new(root: impl Into<PathBuf>, public_base_url: Url) -> Self {
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    /// Directory the static file service should expose as `/images`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode and store an uploaded image, returning its public URL.
    ///
    /// # Process
    ///
    /// 1. Decode the base64 body (invalid encoding → 400)
    /// 2. Write `ads/{ad_id}.jpg` under the store root
    /// 3. Build `{public_base_url}/images/ads/{ad_id}.jpg`
    ///
    /// The original bytes are trusted to be JPEG; the store does not sniff
    /// or transcode image content.
    pub async fn store_image(&self, ad_id: Uuid, image_base64: &str) -> Result<String, AppError> {
        let bytes = BASE64
            .decode(image_base64)
            .map_err(|_| AppError::InvalidRequest("image_base64 is not valid base64".to_string()))?;

        let dir = self.root.join("ads");
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{ad_id}.jpg");
        tokio::fs::write(dir.join(&filename), &bytes).await?;

        let url = self.public_base_url.join(&format!("images/ads/{filename}"))?;
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    fn store(root: &Path) -> ImageStore {
        ImageStore::new(root, Url::parse("http://localhost:3000").unwrap())
    }

    #[tokio::test]
    async fn stores_decoded_bytes_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let ad_id = Uuid::new_v4();

        let encoded = BASE64.encode(b"fake jpeg bytes");
        let url = store.store_image(ad_id, &encoded).await.unwrap();

        assert_eq!(url, format!("http://localhost:3000/images/ads/{ad_id}.jpg"));

        let written = tokio::fs::read(dir.path().join(format!("ads/{ad_id}.jpg")))
            .await
            .unwrap();
        assert_eq!(written, b"fake jpeg bytes");
    }

    #[tokio::test]
    async fn rejects_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let err = store
            .store_image(Uuid::new_v4(), "%%% not base64 %%%")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
