//! PostgREST profile store
//!
//! Reads and upserts rows of the hosted `users` table through the REST
//! interface of a Supabase-style database. Requests carry the project API
//! key both as `apikey` and as a bearer token.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use iu_core::ports::ProfileStorePort;
use iu_core::{UserId, UserProfile};
use reqwest::{RequestBuilder, Response, Url};
use tracing::{debug, info};

pub struct PostgrestProfileStore {
    http: reqwest::Client,
    table_url: Url,
    api_key: String,
}

impl PostgrestProfileStore {
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("invalid profile store url {base_url:?}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let table_url = base
            .join(&format!("rest/v1/{table}"))
            .with_context(|| format!("invalid profile table name {table:?}"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build profile store client")?;
        Ok(Self {
            http,
            table_url,
            api_key: api_key.into(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn ensure_success(response: Response, what: &str) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{what} failed with HTTP {status}: {body}")
}

#[async_trait]
impl ProfileStorePort for PostgrestProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> anyhow::Result<Option<UserProfile>> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{user_id}"))
            .append_pair("select", "*");

        let response = self
            .authorize(self.http.get(url))
            .header("Accept", "application/json")
            .send()
            .await
            .context("profile lookup request failed")?;
        let rows: Vec<UserProfile> = ensure_success(response, "profile lookup")
            .await?
            .json()
            .await
            .context("profile lookup returned an unexpected body")?;

        debug!(%user_id, found = !rows.is_empty(), "profile lookup");
        Ok(rows.into_iter().next())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("on_conflict", "id");

        let response = self
            .authorize(self.http.post(url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(profile)
            .send()
            .await
            .context("profile upsert request failed")?;
        ensure_success(response, "profile upsert").await?;

        info!(user_id = %profile.id, role = %profile.role, "profile saved");
        Ok(())
    }
}
