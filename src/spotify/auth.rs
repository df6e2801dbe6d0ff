use chrono::Utc;
use reqwest::Client;

use crate::{
    error::OrganizeError,
    types::{ClientCredentialsResponse, Token},
};

/// Seconds before the real expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the app-level access token of the client-credentials flow and
/// requests a new one when it is missing or about to expire.
#[derive(Debug)]
pub struct TokenManager {
    client_id: String,
    client_secret: String,
    token_url: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(client_id: &str, client_secret: &str, token_url: &str) -> Self {
        TokenManager {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url: token_url.to_string(),
            token: None,
        }
    }

    pub async fn get_valid_token(&mut self, http: &Client) -> Result<String, OrganizeError> {
        let token = match self.token.take() {
            Some(token) if !is_expired(&token, Utc::now().timestamp() as u64) => token,
            _ => self.request_token(http).await?,
        };

        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    /// Drops the cached token so the next call requests a fresh one.
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    async fn request_token(&self, http: &Client) -> Result<Token, OrganizeError> {
        let res = http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?;

        let json: ClientCredentialsResponse = res.json().await?;

        Ok(Token {
            access_token: json.access_token,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
}
