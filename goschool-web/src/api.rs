use async_trait::async_trait;
use log::{debug, error};
use once_cell::unsync::OnceCell;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::api::{ApiError, ApiResult, AuthApi, ProductApi, SchoolApi};
use shared::models::{
    ErrorResponse, LoginRequest, LoginResponse, MethodOverride, MutationResponse, Paginator,
    PhotoResponse, Product, ProductsResponse, ProfileResponse, RegisterRequest, RegisterResponse,
    School, SchoolsResponse, SearchRequest,
};

use crate::config::FrontendConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<GoSchoolClient> = const { OnceCell::new() };
}

/// HTTP client for the goSchool directory API.
#[derive(Clone, Debug)]
pub struct GoSchoolClient {
    base_url: String,
    client: Client,
}

impl GoSchoolClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// The client every component shares, pointed at the configured API.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_url()))
                .clone()
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.api_url(path)).bearer_auth(token)
    }

    fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.post(self.api_url(path)).bearer_auth(token)
    }

    async fn mutate(&self, request: RequestBuilder) -> ApiResult<Option<String>> {
        let response: MutationResponse = send(request).await?;
        response
            .into_result()
            .map_err(|message| ApiError::Rejected { message })
    }
}

/// Sends a request and decodes a successful JSON body.
pub(crate) async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = request.send().await.map_err(|err| {
        error!("request failed: {err}");
        ApiError::Network(err.to_string())
    })?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let url = response.url().to_string();
    if status.is_success() {
        debug!("{status} {url}");
        return response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = failure_message(&body, status.canonical_reason().unwrap_or("request failed"));
    error!("{status} {url}: {message}");
    Err(ApiError::from_status(status.as_u16(), &message))
}

/// The most specific message in a failed response body.
pub(crate) fn failure_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => response
            .first_error()
            .map(str::to_string)
            .or_else(|| Some(response.message).filter(|message| !message.trim().is_empty()))
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

#[async_trait(?Send)]
impl AuthApi for GoSchoolClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        send(self.client.post(self.api_url("login")).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        send(self.client.post(self.api_url("register")).json(request)).await
    }

    async fn profile(&self, token: &str) -> ApiResult<ProfileResponse> {
        send(self.get("profile", token)).await
    }
}

#[async_trait(?Send)]
impl ProductApi for GoSchoolClient {
    async fn list_products(&self, token: &str, page: u64) -> ApiResult<Paginator<Product>> {
        let response: ProductsResponse =
            send(self.get("products", token).query(&[("page", page)])).await?;
        Ok(response.products)
    }

    async fn create_product(&self, token: &str, product: &Product) -> ApiResult<Option<String>> {
        self.mutate(self.post("products", token).json(product)).await
    }

    async fn update_product(
        &self,
        token: &str,
        id: u64,
        product: &Product,
    ) -> ApiResult<Option<String>> {
        self.mutate(
            self.post(&format!("products/{id}"), token)
                .json(&MethodOverride::put(product)),
        )
        .await
    }

    async fn delete_product(&self, token: &str, id: u64) -> ApiResult<Option<String>> {
        self.mutate(
            self.client
                .delete(self.api_url(&format!("products/{id}")))
                .bearer_auth(token),
        )
        .await
    }
}

#[async_trait(?Send)]
impl SchoolApi for GoSchoolClient {
    async fn list_schools(&self, token: &str, page: u64) -> ApiResult<Paginator<School>> {
        let response: SchoolsResponse =
            send(self.get("schools", token).query(&[("page", page)])).await?;
        Ok(response.schools)
    }

    async fn search_schools(
        &self,
        token: &str,
        request: &SearchRequest,
    ) -> ApiResult<Paginator<School>> {
        let response: SchoolsResponse = send(self.post("schools/search", token).json(request)).await?;
        Ok(response.schools)
    }

    async fn school_photo(&self, token: &str, id: &str) -> ApiResult<Option<String>> {
        let response: PhotoResponse =
            send(self.get("school/photo", token).query(&[("id", id)])).await?;
        Ok(response.photo_url.filter(|url| !url.trim().is_empty()))
    }

    async fn create_school(&self, token: &str, school: &School) -> ApiResult<Option<String>> {
        self.mutate(self.post("schools", token).json(school)).await
    }

    async fn update_school(
        &self,
        token: &str,
        id: &str,
        school: &School,
    ) -> ApiResult<Option<String>> {
        self.mutate(
            self.client
                .put(self.api_url(&format!("schools/{id}")))
                .bearer_auth(token)
                .json(school),
        )
        .await
    }

    async fn delete_school(&self, token: &str, id: &str) -> ApiResult<Option<String>> {
        self.mutate(
            self.client
                .delete(self.api_url(&format!("schools/{id}")))
                .bearer_auth(token),
        )
        .await
    }
}
