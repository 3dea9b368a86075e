//! HTTP client for the catalog REST backend.
//!
//! One pre-configured client is provided via Context at the app root; every
//! page goes through it. A bearer token from LocalStorage is attached
//! whenever one is present. Mount-time GETs take an optional abort signal so
//! an unmounted page can cancel its in-flight request.

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::expect_context;
use web_sys::{AbortSignal, File, FormData};

use catalog_shared::{CategoryItem, LoginRequest, LoginResult, ProductItem, STORAGE_TOKEN_KEY};

/// Backend base URL; the image host is the same origin in this deployment.
pub const API_BASE_URL: &str = "http://localhost:8081";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not be constructed (bad body, FormData failure).
    RequestBuild(String),
    /// Transport-level failure, including aborted requests.
    Network(String),
    /// Server answered with a non-2xx status.
    Status(u16),
    /// Response body did not decode into the expected shape.
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::RequestBuild(msg) => write!(f, "failed to build request: {}", msg),
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status(code) => write!(f, "server responded with status {}", code),
            ApiError::Decode(msg) => write!(f, "failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Draft of a category create/update submit. The backend takes multipart
/// with a single `image` file part.
#[derive(Clone)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub image: Option<File>,
}

/// Draft of a product create/update submit. Canonical wire shape: multipart
/// with `categoryId` and one or more repeated `images` file parts.
#[derive(Clone)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i32,
    pub images: Vec<File>,
}

fn js_err(prefix: &str, value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::RequestBuild(format!("{}: {:?}", prefix, value))
}

impl CategoryPayload {
    fn to_form_data(&self) -> Result<FormData, ApiError> {
        let form = FormData::new().map_err(|e| js_err("FormData", e))?;
        form.append_with_str("name", &self.name)
            .map_err(|e| js_err("name", e))?;
        form.append_with_str("description", &self.description)
            .map_err(|e| js_err("description", e))?;
        if let Some(file) = &self.image {
            form.append_with_blob_and_filename("image", file, &file.name())
                .map_err(|e| js_err("image", e))?;
        }
        Ok(form)
    }
}

impl ProductPayload {
    fn to_form_data(&self) -> Result<FormData, ApiError> {
        let form = FormData::new().map_err(|e| js_err("FormData", e))?;
        form.append_with_str("name", &self.name)
            .map_err(|e| js_err("name", e))?;
        form.append_with_str("description", &self.description)
            .map_err(|e| js_err("description", e))?;
        form.append_with_str("price", &self.price.to_string())
            .map_err(|e| js_err("price", e))?;
        form.append_with_str("categoryId", &self.category_id.to_string())
            .map_err(|e| js_err("categoryId", e))?;
        for file in &self.images {
            form.append_with_blob_and_filename("images", file, &file.name())
                .map_err(|e| js_err("images", e))?;
        }
        Ok(form)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogApi {
    base_url: String,
}

impl CatalogApi {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Attach the bearer header when a token is persisted.
    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match LocalStorage::get::<String>(STORAGE_TOKEN_KEY) {
            Ok(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            Err(_) => builder,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        url: &str,
        abort: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        let res = Self::authorize(Request::get(url))
            .abort_signal(abort)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_multipart(
        builder: RequestBuilder,
        form: FormData,
    ) -> Result<Response, ApiError> {
        // The browser sets the multipart boundary header itself.
        let res = Self::authorize(builder)
            .body(form)
            .map_err(|e| ApiError::RequestBuild(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(res)
    }

    // --- Categories -----------------------------------------------------

    pub async fn get_categories(
        &self,
        abort: Option<&AbortSignal>,
    ) -> Result<Vec<CategoryItem>, ApiError> {
        Self::fetch_json(&self.url("/api/category"), abort).await
    }

    pub async fn get_category(
        &self,
        id: i32,
        abort: Option<&AbortSignal>,
    ) -> Result<CategoryItem, ApiError> {
        Self::fetch_json(&self.url(&format!("/api/category/{}", id)), abort).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        let form = payload.to_form_data()?;
        Self::send_multipart(Request::post(&self.url("/api/category")), form).await?;
        Ok(())
    }

    pub async fn update_category(
        &self,
        id: i32,
        payload: &CategoryPayload,
    ) -> Result<(), ApiError> {
        let form = payload.to_form_data()?;
        Self::send_multipart(Request::put(&self.url(&format!("/api/category/{}", id))), form)
            .await?;
        Ok(())
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), ApiError> {
        let res = Self::authorize(Request::delete(&self.url(&format!("/api/category/{}", id))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(())
    }

    // --- Products -------------------------------------------------------

    pub async fn get_products(
        &self,
        abort: Option<&AbortSignal>,
    ) -> Result<Vec<ProductItem>, ApiError> {
        Self::fetch_json(&self.url("/api/products"), abort).await
    }

    pub async fn get_product(
        &self,
        id: i32,
        abort: Option<&AbortSignal>,
    ) -> Result<ProductItem, ApiError> {
        Self::fetch_json(&self.url(&format!("/api/products/{}", id)), abort).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), ApiError> {
        let form = payload.to_form_data()?;
        Self::send_multipart(Request::post(&self.url("/api/products")), form).await?;
        Ok(())
    }

    pub async fn update_product(&self, id: i32, payload: &ProductPayload) -> Result<(), ApiError> {
        let form = payload.to_form_data()?;
        Self::send_multipart(Request::put(&self.url(&format!("/api/products/{}", id))), form)
            .await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), ApiError> {
        let res = Self::authorize(Request::delete(&self.url(&format!("/api/products/{}", id))))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }
        Ok(())
    }

    // --- Auth -----------------------------------------------------------

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResult, ApiError> {
        let res = Request::post(&self.url("/api/account/login"))
            .json(credentials)
            .map_err(|e| ApiError::RequestBuild(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }
}

impl Default for CatalogApi {
    fn default() -> Self {
        Self::new()
    }
}

/// The app-wide client provided at the root.
pub fn use_api() -> CatalogApi {
    expect_context::<CatalogApi>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = CatalogApi::with_base_url("http://localhost:8081/");
        assert_eq!(api.url("/api/category"), "http://localhost:8081/api/category");
        assert_eq!(api.url("api/category"), "http://localhost:8081/api/category");
    }

    #[test]
    fn entity_urls_embed_the_id() {
        let api = CatalogApi::with_base_url("http://localhost:8081");
        assert_eq!(
            api.url(&format!("/api/products/{}", 42)),
            "http://localhost:8081/api/products/42"
        );
    }

    #[test]
    fn errors_display_their_cause() {
        assert_eq!(
            ApiError::Status(404).to_string(),
            "server responded with status 404"
        );
        assert_eq!(
            ApiError::Network("timed out".to_string()).to_string(),
            "network error: timed out"
        );
    }
}
