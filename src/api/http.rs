use super::MovieApi;
use crate::config::ClientConfig;
use crate::core::{ClientError, MovieDraft, Record, RecordId, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// [`MovieApi`] over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpMovieApi {
    client: Client,
    base: Url,
}

impl HttpMovieApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = config.parsed_base_url()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn record_url(&self, id: &RecordId) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status {
                status,
                url: response.url().to_string(),
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = Self::check(response)?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn list(&self) -> Result<Vec<Record>> {
        debug!(url = %self.base, "GET collection");
        let response = self.client.get(self.base.clone()).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Record> {
        debug!(url = %self.base, title = %draft.title, "POST record");
        let response = self
            .client
            .post(self.base.clone())
            .json(draft)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &RecordId, draft: &MovieDraft) -> Result<Record> {
        let url = self.record_url(id);
        debug!(url = %url, "PUT record");
        let response = self.client.put(url).json(draft).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        let url = self.record_url(id);
        debug!(url = %url, "DELETE record");
        let response = self.client.delete(url).send().await?;
        Self::check(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_url_appends_escaped_id() {
        let api = HttpMovieApi::new(&ClientConfig::new("http://localhost:3000/movies/")).unwrap();
        assert_eq!(
            api.record_url(&RecordId::from(4)).as_str(),
            "http://localhost:3000/movies/4"
        );
        assert_eq!(
            api.record_url(&RecordId::from("007")).as_str(),
            "http://localhost:3000/movies/007"
        );
        assert_eq!(
            api.record_url(&RecordId::Text("a b/c".to_string())).as_str(),
            "http://localhost:3000/movies/a%20b%2Fc"
        );
    }

    #[test]
    fn record_url_on_root_base() {
        let api = HttpMovieApi::new(&ClientConfig::new("http://localhost:3000")).unwrap();
        assert_eq!(
            api.record_url(&RecordId::from(1)).as_str(),
            "http://localhost:3000/1"
        );
    }
}
