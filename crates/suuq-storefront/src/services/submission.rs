//! # Product Submission
//!
//! Turns the upload form into a `pending` product.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(session, draft, [img1, img2, img3])                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. session?                           ── none ──► Unauthenticated     │
//! │  2. 1..=max_images, image/*, <= 5 MiB  ── bad ───► Validation          │
//! │  3. validate_draft (name … phone)      ── bad ───► Validation          │
//! │       │                  (no network call has happened yet)            │
//! │       ▼                                                                 │
//! │  4. downscale each image (spawn_blocking, JPEG q70, <= 800 px)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. upload all concurrently ──┬── img1 ──► url1 ─┐                     │
//! │                               ├── img2 ──► url2 ─┼─► [url1,url2,url3]  │
//! │                               └── img3 ──► url3 ─┘   (selection order) │
//! │       │                  any failure ──► Upstream, no product          │
//! │       ▼                                                                 │
//! │  6. insert_product(status = pending)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Images that were uploaded before a failure stay on the image host.

use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::{debug, info};

use suuq_core::validation::{validate_draft, validate_image_count, validate_image_file};
use suuq_core::{NewProduct, Product, ProductDraft, Session};

use crate::config::UploadSettings;
use crate::error::{StorefrontError, StorefrontResult};
use crate::imaging::downscale_to_jpeg;
use crate::ports::{EncodedImage, Ports};

/// One file selected in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        ImageUpload {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Creates products from seller submissions.
pub struct SubmissionService {
    ports: Ports,
    limits: UploadSettings,
}

impl SubmissionService {
    pub fn new(ports: &Ports, limits: UploadSettings) -> Self {
        SubmissionService {
            ports: ports.clone(),
            limits,
        }
    }

    /// Validates, processes and uploads everything, then stores the product.
    pub async fn submit(
        &self,
        session: Option<&Session>,
        draft: &ProductDraft,
        images: Vec<ImageUpload>,
    ) -> StorefrontResult<Product> {
        let session = session.ok_or(StorefrontError::Unauthenticated)?;

        validate_image_count(images.len(), self.limits.max_images)?;
        for image in &images {
            validate_image_file(
                &image.file_name,
                &image.content_type,
                image.bytes.len(),
                self.limits.max_file_bytes,
            )?;
        }
        let listing = validate_draft(draft)?;

        debug!(user_id = %session.user_id, images = images.len(), "Processing submission images");
        let encoded = self.encode_all(images).await?;
        let image_urls = self.upload_all(encoded).await?;

        let product = self
            .ports
            .products
            .insert_product(NewProduct {
                name: listing.name,
                description: listing.description,
                category: listing.category,
                price_cents: listing.price.cents(),
                image_urls,
                seller_info: listing.seller_info,
                user_id: session.user_id.clone(),
                user_email: Some(session.email.clone()),
                created_at: Utc::now(),
            })
            .await?;

        info!(
            product_id = %product.id,
            user_id = %session.user_id,
            images = product.image_urls.len(),
            "Product submitted for review"
        );
        Ok(product)
    }

    /// Downscales every image off the async runtime, keeping order.
    async fn encode_all(&self, images: Vec<ImageUpload>) -> StorefrontResult<Vec<EncodedImage>> {
        let max_dimension = self.limits.max_dimension;
        let quality = self.limits.jpeg_quality;

        let tasks = images.into_iter().map(|image| async move {
            tokio::task::spawn_blocking(move || {
                downscale_to_jpeg(&image.file_name, &image.bytes, max_dimension, quality)
            })
            .await
            .map_err(|e| StorefrontError::upstream("image processing", e))?
            .map_err(StorefrontError::from)
        });

        try_join_all(tasks).await
    }

    /// Uploads concurrently; the result is in input order regardless of
    /// completion order.
    async fn upload_all(&self, images: Vec<EncodedImage>) -> StorefrontResult<Vec<String>> {
        let host = &self.ports.images;
        try_join_all(images.into_iter().map(|image| host.upload(image))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPorts;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;
    use suuq_core::{ProductStatus, SellerInfo, ValidationError};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn upload(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/png", png(64, 48))
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Laptop".into(),
            description: "Barely used".into(),
            category: "Elektaroonig".into(),
            price: "12.50".into(),
            seller_info: SellerInfo {
                name: "Ayaan".into(),
                email: "ayaan@example.com".into(),
                phone: "+252612345678".into(),
                location: "Hodan".into(),
            },
        }
    }

    fn seller() -> Session {
        Session::new("u1", "u1@example.com")
    }

    fn service(mem: &MemoryPorts) -> SubmissionService {
        SubmissionService::new(&mem.ports(), UploadSettings::default())
    }

    #[tokio::test]
    async fn test_submit_creates_pending_product() {
        let mem = MemoryPorts::new();
        let product = service(&mem)
            .submit(Some(&seller()), &draft(), vec![upload("a.png"), upload("b.png")])
            .await
            .unwrap();

        assert_eq!(product.status, ProductStatus::Pending);
        assert_eq!(product.price_cents, 1250);
        assert_eq!(product.user_id, "u1");
        assert_eq!(product.user_email.as_deref(), Some("u1@example.com"));
        assert_eq!(
            product.image_urls,
            vec!["https://img.local/a.jpg", "https://img.local/b.jpg"]
        );
        assert_eq!(product.image_url(), Some("https://img.local/a.jpg"));
        assert_eq!(mem.products.snapshot().len(), 1);

        for uploaded in mem.images.uploads() {
            assert_eq!(uploaded.content_type, "image/jpeg");
            assert_eq!(&uploaded.bytes[..2], &[0xFF, 0xD8]);
        }
    }

    #[tokio::test]
    async fn test_url_order_follows_selection_order() {
        let mem = MemoryPorts::new();
        mem.images.delays_ms(vec![60, 30, 0]);

        let product = service(&mem)
            .submit(
                Some(&seller()),
                &draft(),
                vec![upload("first.png"), upload("second.png"), upload("third.png")],
            )
            .await
            .unwrap();

        assert_eq!(
            product.image_urls,
            vec![
                "https://img.local/first.jpg",
                "https://img.local/second.jpg",
                "https://img.local/third.jpg",
            ]
        );
        // Completion order differed from selection order.
        assert_eq!(mem.images.uploads()[0].file_name, "third.jpg");
    }

    #[tokio::test]
    async fn test_upload_failure_creates_no_product() {
        let mem = MemoryPorts::new();
        mem.images.fail_on_call(Some(1));

        let err = service(&mem)
            .submit(Some(&seller()), &draft(), vec![upload("a.png"), upload("b.png")])
            .await
            .unwrap_err();

        assert!(matches!(err, StorefrontError::Upstream { .. }));
        assert!(mem.products.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_image_count_limits() {
        let mem = MemoryPorts::new();
        let svc = service(&mem);

        let err = svc.submit(Some(&seller()), &draft(), vec![]).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(ValidationError::NoImages)));

        let four = (0..4).map(|i| upload(&format!("{}.png", i))).collect();
        let err = svc.submit(Some(&seller()), &draft(), four).await.unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Validation(ValidationError::TooManyImages { max: 3 })
        ));
        assert_eq!(mem.images.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_files_fail_before_upload() {
        let mem = MemoryPorts::new();
        let svc = service(&mem);

        let pdf = ImageUpload::new("doc.pdf", "application/pdf", vec![0; 10]);
        let err = svc
            .submit(Some(&seller()), &draft(), vec![upload("a.png"), pdf])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Validation(ValidationError::NotAnImage { .. })
        ));

        let huge = ImageUpload::new("huge.png", "image/png", vec![0; 5 * 1024 * 1024 + 1]);
        let err = svc
            .submit(Some(&seller()), &draft(), vec![huge])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Validation(ValidationError::FileTooLarge { .. })
        ));

        assert_eq!(mem.images.calls(), 0);
        assert!(mem.products.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_form_errors_fail_before_upload() {
        let mem = MemoryPorts::new();
        let mut bad = draft();
        bad.seller_info.phone = "12345".into();

        let err = service(&mem)
            .submit(Some(&seller()), &bad, vec![upload("a.png")])
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(_)));
        assert_eq!(mem.images.calls(), 0);
    }

    #[tokio::test]
    async fn test_requires_session() {
        let mem = MemoryPorts::new();
        let err = service(&mem)
            .submit(None, &draft(), vec![upload("a.png")])
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_large_image_is_downscaled_before_upload() {
        let mem = MemoryPorts::new();
        service(&mem)
            .submit(
                Some(&seller()),
                &draft(),
                vec![ImageUpload::new("big.png", "image/png", png(1600, 1200))],
            )
            .await
            .unwrap();

        let uploaded = &mem.images.uploads()[0];
        let decoded = image::load_from_memory(&uploaded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 600));
    }
}
