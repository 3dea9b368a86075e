use serde::{Deserialize, Serialize};

pub mod claims;
pub mod validation;

// =========================================================
// Constants
// =========================================================

/// LocalStorage key holding the raw login token.
pub const STORAGE_TOKEN_KEY: &str = "token";

/// Host serving uploaded image assets.
pub const ASSETS_BASE_URL: &str = "http://localhost:8081";

/// File-name prefix of the server-generated 150px thumbnails.
pub const PRODUCT_THUMB_PREFIX: &str = "150_";

/// MIME types a form accepts as an image attachment.
pub const ACCEPTED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 4000;

// =========================================================
// Domain Models
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Path fragment under the asset host.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImageItem {
    pub id: i32,
    /// Bare file name; rendered through [`product_thumb_url`].
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Foreign key into the category collection.
    pub category_id: i32,
    #[serde(default)]
    pub images: Vec<ProductImageItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

// =========================================================
// Asset URL helpers
// =========================================================

/// Full URL of an asset path served by the image host.
pub fn asset_url(path: &str) -> String {
    format!("{}/{}", ASSETS_BASE_URL, path.trim_start_matches('/'))
}

/// Thumbnail URL for a stored product image file name.
pub fn product_thumb_url(file: &str) -> String {
    asset_url(&format!("images/{}{}", PRODUCT_THUMB_PREFIX, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_joins_without_double_slash() {
        assert_eq!(
            asset_url("/images/abc.jpg"),
            "http://localhost:8081/images/abc.jpg"
        );
        assert_eq!(
            asset_url("images/abc.jpg"),
            "http://localhost:8081/images/abc.jpg"
        );
    }

    #[test]
    fn product_thumb_url_applies_prefix() {
        assert_eq!(
            product_thumb_url("abc.jpg"),
            "http://localhost:8081/images/150_abc.jpg"
        );
    }

    #[test]
    fn product_item_uses_camel_case_wire_names() {
        let json = r#"{
            "id": 3,
            "name": "Apple",
            "description": "Fresh",
            "price": 12.5,
            "categoryId": 1,
            "images": [{ "id": 7, "image": "a.jpg" }]
        }"#;
        let item: ProductItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category_id, 1);
        assert_eq!(item.images.len(), 1);
        assert_eq!(item.images[0].image, "a.jpg");

        let back = serde_json::to_value(&item).unwrap();
        assert!(back.get("categoryId").is_some());
        assert!(back.get("category_id").is_none());
    }

    #[test]
    fn product_images_default_to_empty() {
        let json = r#"{
            "id": 3,
            "name": "Apple",
            "description": "Fresh",
            "price": 12.5,
            "categoryId": 1
        }"#;
        let item: ProductItem = serde_json::from_str(json).unwrap();
        assert!(item.images.is_empty());
    }
}
