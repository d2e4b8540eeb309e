use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub id: i64,
    pub name: Option<String>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub color3: Option<String>,
    pub color4: Option<String>,
    pub color5: Option<String>,
    pub project_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Status and decoded JSON body of one API call.
///
/// Bodies that are not JSON (the greeting) are kept as a JSON string.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    /// The `error` message of a failed call.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Decode the body, or the member `key` of it when given.
    pub fn decode<T: DeserializeOwned>(&self, key: Option<&str>) -> Result<T, serde_json::Error> {
        let value = match key {
            Some(key) => self.body.get(key).cloned().unwrap_or(Value::Null),
            None => self.body.clone(),
        };
        serde_json::from_value(value)
    }
}

/// Client for the Palette Picker API.
///
/// Payloads are plain JSON so callers can send incomplete bodies on purpose.
pub struct PaletteClient {
    client: Client,
    base_url: String,
}

impl PaletteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/api/v1{}", self.base_url, path))
    }

    async fn send(request: RequestBuilder) -> Result<ApiReply, reqwest::Error> {
        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiReply { status, body })
    }

    pub async fn greeting(&self) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.client.get(format!("{}/", self.base_url))).await
    }

    pub async fn projects(&self) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::GET, "/projects")).await
    }

    pub async fn project(&self, id: &str) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::GET, &format!("/projects/{id}"))).await
    }

    pub async fn create_project(&self, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::POST, "/projects").json(body)).await
    }

    pub async fn update_project(&self, id: &str, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::PUT, &format!("/projects/{id}")).json(body)).await
    }

    pub async fn delete_project(&self, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::DELETE, "/projects").json(body)).await
    }

    pub async fn palettes(&self) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::GET, "/palettes")).await
    }

    pub async fn palette(&self, id: &str) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::GET, &format!("/palettes/{id}"))).await
    }

    pub async fn palettes_with_color(&self, color: &str) -> Result<ApiReply, reqwest::Error> {
        Self::send(
            self.api(Method::GET, "/palettes/chooseColors")
                .query(&[("chosenColor", color)]),
        )
        .await
    }

    pub async fn create_palette(&self, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::POST, "/palettes").json(body)).await
    }

    pub async fn recolor_palette(&self, id: &str, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::PATCH, &format!("/palettes/{id}")).json(body)).await
    }

    pub async fn delete_palette(&self, body: &Value) -> Result<ApiReply, reqwest::Error> {
        Self::send(self.api(Method::DELETE, "/palettes").json(body)).await
    }
}
