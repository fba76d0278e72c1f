use axum::extract::Multipart;
use bytes::Bytes;
use rust_decimal::Decimal;

use crate::error::AppError;
use crate::forms::ValidationErrors;

/// One file part of the product form, held in memory until the upload
/// handler moves it into storage.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Product form as submitted, before validation.
#[derive(Debug, Default)]
pub struct RawProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub photo: Option<PhotoUpload>,
}

impl RawProductForm {
    /// Walk the multipart body and collect the known fields. Unknown parts
    /// are ignored; an empty photo part counts as "no photo submitted".
    pub async fn bind(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = RawProductForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "name" => form.name = read_text(field).await?,
                "description" => form.description = read_text(field).await?,
                "price" => form.price = read_text(field).await?,
                "photo" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let content_type = field.content_type().unwrap_or("").to_string();
                    let data = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read photo field: {e}"))
                    })?;
                    if !filename.is_empty() && !data.is_empty() {
                        form.photo = Some(PhotoUpload {
                            filename,
                            content_type,
                            data,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn validate(self) -> Result<ProductForm, (Self, ValidationErrors)> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        let price = match self.price.trim().parse::<Decimal>() {
            Ok(p) if p >= Decimal::ZERO => Some(p),
            Ok(_) => {
                errors.add("price", "Price must not be negative");
                None
            }
            Err(_) => {
                errors.add("price", "Price must be a number");
                None
            }
        };

        match (errors.is_empty(), price) {
            (true, Some(price)) => Ok(ProductForm {
                name,
                description: self.description.trim().to_string(),
                price,
                photo: self.photo,
            }),
            _ => Err((self, errors)),
        }
    }
}

/// Validated product fields, ready for the lifecycle manager.
#[derive(Debug)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub photo: Option<PhotoUpload>,
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {e}")))
}
