use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::FoodApi;
use crate::app::{FoodboardError, Result};
use crate::domain::{Food, NewFood};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFoodApi {
    client: Client,
    base: Url,
}

impl HttpFoodApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("foodboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn collection_url(&self) -> Result<Url> {
        Ok(self.base.join("foods")?)
    }

    pub fn food_url(&self, id: i64) -> Result<Url> {
        Ok(self.base.join(&format!("foods/{}", id))?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FoodboardError::Status {
                status,
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FoodApi for HttpFoodApi {
    async fn list_foods(&self) -> Result<Vec<Food>> {
        let url = self.collection_url()?;
        tracing::debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn create_food(&self, food: &NewFood) -> Result<Food> {
        let url = self.collection_url()?;
        tracing::debug!("POST {}", url);
        self.send_json(self.client.post(url).json(food)).await
    }

    async fn update_food(&self, id: i64, food: &Food) -> Result<Food> {
        let url = self.food_url(id)?;
        tracing::debug!("PUT {}", url);
        self.send_json(self.client.put(url).json(food)).await
    }

    async fn delete_food(&self, id: i64) -> Result<()> {
        let url = self.food_url(id)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with `status` and `body`, and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn api(base: &str) -> HttpFoodApi {
        HttpFoodApi::new(base, DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_urls_without_trailing_slash() {
        let api = api("http://localhost:3333/api");
        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "http://localhost:3333/api/foods"
        );
        assert_eq!(
            api.food_url(7).unwrap().as_str(),
            "http://localhost:3333/api/foods/7"
        );
    }

    #[test]
    fn test_urls_at_root() {
        let api = api("http://localhost:3333");
        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "http://localhost:3333/foods"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFoodApi::new("not a url", DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(FoodboardError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_list_foods() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"Pizza","description":"","price":20,"available":true,"image":""}]"#,
        )
        .await;

        let foods = api(&base).list_foods().await.unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Pizza");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /foods HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_create_food_posts_json() {
        let (base, server) = serve_once(
            "201 Created",
            r#"{"id":9,"name":"Pizza","description":"","price":20,"available":true,"image":""}"#,
        )
        .await;

        let candidate = NewFood {
            name: "Pizza".into(),
            price: 20.0,
            available: true,
            ..Default::default()
        };
        let created = api(&base).create_food(&candidate).await.unwrap();
        assert_eq!(created.id, 9);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /foods HTTP/1.1"));
        assert!(request.contains(r#""available":true"#));
    }

    #[tokio::test]
    async fn test_update_food_targets_id() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"id":4,"name":"Soup","description":"","price":8,"available":true,"image":""}"#,
        )
        .await;

        let food = Food {
            id: 4,
            name: "Soup".into(),
            description: String::new(),
            price: 8.0,
            available: true,
            image: String::new(),
        };
        let updated = api(&base).update_food(4, &food).await.unwrap();
        assert_eq!(updated, food);

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /foods/4 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let (base, server) = serve_once("200 OK", "").await;

        api(&base).delete_food(2).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /foods/2 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}").await;

        let err = api(&base).list_foods().await.unwrap_err();
        match err {
            FoodboardError::Status { status, url } => {
                assert_eq!(status.as_u16(), 500);
                assert!(url.ends_with("/foods"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (base, _server) = serve_once("200 OK", r#"{"not":"a list"}"#).await;

        let err = api(&base).list_foods().await.unwrap_err();
        assert!(matches!(err, FoodboardError::Decode(_)));
    }
}
