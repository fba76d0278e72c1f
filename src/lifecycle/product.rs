use std::sync::Arc;

use uuid::Uuid;

use crate::clock::Clock;
use crate::db::ProductStore;
use crate::error::AppError;
use crate::forms::{PhotoUpload, ProductForm};
use crate::models::Product;
use crate::upload::UploadStore;

/// Result of a create or update: the persisted product plus an optional
/// user-facing warning when the photo upload was skipped.
#[derive(Debug)]
pub struct SaveOutcome {
    pub product: Product,
    pub upload_warning: Option<String>,
}

const UPLOAD_WARNING: &str =
    "The photo could not be uploaded. The product was saved without it, please try again.";

/// Create / update / archive transitions for products.
///
/// A failed photo upload never blocks the save: the product persists with
/// whatever photo value it already carried and the caller gets a warning
/// to surface.
pub struct ProductLifecycle {
    store: Arc<dyn ProductStore>,
    uploads: UploadStore,
    clock: Arc<dyn Clock>,
}

impl ProductLifecycle {
    pub fn new(store: Arc<dyn ProductStore>, uploads: UploadStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            uploads,
            clock,
        }
    }

    pub async fn create(&self, form: ProductForm) -> Result<SaveOutcome, AppError> {
        let now = self.clock.now();
        let mut product = Product {
            id: Uuid::now_v7(),
            name: form.name,
            description: form.description,
            price: form.price,
            photo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let upload_warning = match form.photo {
            Some(photo) => self.attach_photo(&mut product, &photo),
            None => None,
        };

        self.store.save(&product).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");

        Ok(SaveOutcome {
            product,
            upload_warning,
        })
    }

    pub async fn update(
        &self,
        mut product: Product,
        form: ProductForm,
    ) -> Result<SaveOutcome, AppError> {
        let current_photo = product.photo.clone();

        product.name = form.name;
        product.description = form.description;
        product.price = form.price;
        product.updated_at = self.clock.now();

        let upload_warning = match form.photo {
            Some(photo) => self.attach_photo(&mut product, &photo),
            // No replacement submitted: re-assign the stored filename so a
            // blank photo field on the form cannot clear it.
            None => {
                product.photo = current_photo;
                None
            }
        };

        self.store.save(&product).await?;
        tracing::info!(product_id = %product.id, "Product updated");

        Ok(SaveOutcome {
            product,
            upload_warning,
        })
    }

    /// Soft-delete. Repeat calls re-stamp the timestamp; the archived state
    /// itself never reverts.
    pub async fn archive(&self, mut product: Product) -> Result<Product, AppError> {
        product.deleted_at = Some(self.clock.now());
        self.store.save(&product).await?;
        tracing::info!(product_id = %product.id, "Product archived");
        Ok(product)
    }

    /// Store the photo and record its filename on success. On failure the
    /// photo field is left untouched and a warning message is returned.
    fn attach_photo(&self, product: &mut Product, photo: &PhotoUpload) -> Option<String> {
        match self
            .uploads
            .store(&photo.filename, &photo.content_type, &photo.data)
        {
            Ok(stored) => {
                product.photo = Some(stored);
                None
            }
            Err(err) => {
                tracing::warn!(
                    product_id = %product.id,
                    original = %photo.filename,
                    "Photo upload failed: {err}"
                );
                Some(UPLOAD_WARNING.to_string())
            }
        }
    }
}
