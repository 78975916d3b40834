pub const TINYURL_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

/// Public page of a recipe.
pub fn recipe_link(base_url: &str, id: &str) -> String {
    format!("{}/recipes/{id}/", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> anyhow::Result<String>;
}

pub struct TinyUrl {
    client: reqwest::Client,
    endpoint: String,
}

impl TinyUrl {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for TinyUrl {
    fn default() -> Self {
        Self::new(TINYURL_ENDPOINT)
    }
}

#[async_trait::async_trait]
impl LinkShortener for TinyUrl {
    async fn shorten(&self, url: &str) -> anyhow::Result<String> {
        let endpoint = url::Url::parse_with_params(&self.endpoint, &[("url", url)])?;
        let body = self
            .client
            .get(endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let short = url::Url::parse(body.trim())?;

        Ok(short.to_string())
    }
}

impl crate::Query {
    /// Short link to the recipe page; the full link is returned when the
    /// shortener is unavailable.
    pub async fn short_link(
        &self,
        shortener: &dyn LinkShortener,
        base_url: &str,
        id: &str,
    ) -> foodgram_shared::Result<String> {
        if self.short(id).await?.is_none() {
            foodgram_shared::not_found!("recipe");
        }

        let link = recipe_link(base_url, id);

        match shortener.shorten(&link).await {
            Ok(short) => Ok(short),
            Err(e) => {
                tracing::warn!(recipe_id = id, error = %e, "link shortener unavailable");
                Ok(link)
            }
        }
    }
}
