//! # Subscription Purchase Forms
//!
//! The purchase form is multipart because it may carry a payment receipt.
//! Before it is forwarded:
//!
//! - the human-readable service name (`service` or `serviceName`) becomes the
//!   backend `type` enum value via the [`ServiceCatalog`],
//! - `price` must be numeric text and is forwarded in canonical form,
//! - client-only fields are dropped,
//! - every other field, and every file part, goes through as received
//!   (file bytes, file name and content type untouched).

use axum::body::Bytes;
use axum::extract::Multipart;
use lib_core::{AppError, Result, ServiceCatalog};
use reqwest::multipart::{Form, Part};
use shared::parse_number_text;

/// Fields only the browser form uses.
pub const CLIENT_ONLY_FIELDS: &[&str] = &["acceptTerms", "displayPrice"];

/// Fields that may carry the service name, in lookup order.
const SERVICE_FIELDS: &[&str] = &["service", "serviceName", "type"];

/// One multipart field, text or file.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            file_name: None,
            content_type: None,
            data: Bytes::copy_from_slice(value.as_bytes()),
        }
    }

    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }

    /// Value of a text field.
    pub fn text_value(&self) -> Option<&str> {
        if self.is_file() {
            return None;
        }
        std::str::from_utf8(&self.data).ok()
    }
}

/// Drain an inbound multipart body into memory.
pub async fn read_multipart(mut multipart: Multipart) -> Result<Vec<FormPart>> {
    let mut parts = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationFailed(format!("Invalid multipart body: {}", e.body_text())))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationFailed(format!("Invalid multipart field '{}': {}", name, e.body_text())))?;

        parts.push(FormPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    Ok(parts)
}

fn text_field<'a>(parts: &'a [FormPart], names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        parts
            .iter()
            .filter(|p| p.name == *name)
            .find_map(FormPart::text_value)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

/// Reshape a purchase form into the backend's field set.
pub fn reshape_subscription_form(parts: Vec<FormPart>, catalog: &ServiceCatalog) -> Result<Vec<FormPart>> {
    let service = text_field(&parts, SERVICE_FIELDS)
        .ok_or_else(|| AppError::ValidationFailed("service is required".to_string()))?;
    let subscription_type = catalog.resolve(service)?;

    let price = text_field(&parts, &["price"])
        .ok_or_else(|| AppError::ValidationFailed("price is required".to_string()))?;
    let price = parse_number_text(price)
        .map_err(|_| AppError::ValidationFailed("price must be a number".to_string()))?;
    if price < 0.0 {
        return Err(AppError::ValidationFailed("price cannot be negative".to_string()));
    }

    let mut reshaped = vec![
        FormPart::text("type", subscription_type.as_str()),
        FormPart::text("price", &price.to_string()),
    ];

    reshaped.extend(parts.into_iter().filter(|part| {
        let consumed = SERVICE_FIELDS.contains(&part.name.as_str()) || part.name == "price";
        part.is_file() || !(consumed || CLIENT_ONLY_FIELDS.contains(&part.name.as_str()))
    }));

    Ok(reshaped)
}

/// Encode parts as an outbound multipart form.
pub fn into_reqwest_form(parts: Vec<FormPart>) -> Result<Form> {
    let mut form = Form::new();

    for part in parts {
        let name = part.name.clone();
        let mut outbound = Part::bytes(part.data.to_vec());
        if let Some(file_name) = part.file_name {
            outbound = outbound.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            outbound = outbound
                .mime_str(&content_type)
                .map_err(|_| AppError::ValidationFailed(format!("Invalid content type for '{}'", name)))?;
        }
        form = form.part(name, outbound);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SubscriptionType;

    fn receipt() -> FormPart {
        FormPart {
            name: "paymentProof".to_string(),
            file_name: Some("receipt.png".to_string()),
            content_type: Some("image/png".to_string()),
            data: Bytes::from_static(&[0x89, b'P', b'N', b'G', 0x00, 0xff]),
        }
    }

    #[test]
    fn test_service_name_mapped_and_client_fields_stripped() {
        let catalog = ServiceCatalog::standard().unwrap();
        let parts = vec![
            FormPart::text("service", "Copy Trading"),
            FormPart::text("price", " 49.90 "),
            FormPart::text("acceptTerms", "true"),
            FormPart::text("paymentMethod", "bank_transfer"),
            receipt(),
        ];

        let reshaped = reshape_subscription_form(parts, &catalog).unwrap();

        assert_eq!(
            reshaped,
            vec![
                FormPart::text("type", SubscriptionType::CopyTrading.as_str()),
                FormPart::text("price", "49.9"),
                FormPart::text("paymentMethod", "bank_transfer"),
                receipt(),
            ]
        );
    }

    #[test]
    fn test_missing_service_rejected() {
        let catalog = ServiceCatalog::standard().unwrap();
        let err = reshape_subscription_form(vec![FormPart::text("price", "10")], &catalog).unwrap_err();

        assert!(matches!(err, AppError::ValidationFailed(ref m) if m == "service is required"));
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let catalog = ServiceCatalog::standard().unwrap();
        let parts = vec![FormPart::text("service", "IVREX Pro"), FormPart::text("price", "free")];

        let err = reshape_subscription_form(parts, &catalog).unwrap_err();

        assert!(matches!(err, AppError::ValidationFailed(ref m) if m == "price must be a number"));
    }

    #[test]
    fn test_file_named_like_client_field_survives() {
        let catalog = ServiceCatalog::standard().unwrap();
        let mut odd = receipt();
        odd.name = "displayPrice".to_string();
        let parts = vec![FormPart::text("serviceName", "Shares Challenge"), FormPart::text("price", "0"), odd.clone()];

        let reshaped = reshape_subscription_form(parts, &catalog).unwrap();

        assert_eq!(reshaped[0], FormPart::text("type", "shares_challenge"));
        assert_eq!(reshaped.last(), Some(&odd));
    }
}
