use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::Mutex;

use crate::{
    Res,
    config::Config,
    info,
    management::TokenManager,
    server, success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Returns a usable access token, authorizing the user when needed.
///
/// A cached token is reused if it was granted the configured scope; an
/// expired one is refreshed first. When there is no usable cached token the
/// full authorization flow runs and its result is cached for later runs.
pub async fn access_token(config: &Config) -> Res<String> {
    if let Ok(mut token_mgr) = TokenManager::load().await {
        if token_mgr.has_scope(&config.scope) {
            match token_mgr.get_valid_token(config).await {
                Ok(token) => return Ok(token),
                Err(e) => warning!("Cached token could not be refreshed: {}", e),
            }
        } else {
            info!("Cached token lacks scope {}, authorizing again", config.scope);
        }
    }

    let token = authorize(config).await?;
    let token_mgr = TokenManager::new(token.clone());
    if let Err(e) = token_mgr.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    Ok(token.access_token)
}

/// Runs the OAuth 2.0 authorization-code flow with PKCE.
///
/// 1. Generates the code verifier and its SHA-256 challenge
/// 2. Starts the local callback server on `config.server_addr`
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits up to 60 seconds for the callback to deliver a token
///
/// The callback server is shut down before returning.
///
/// # Errors
///
/// Fails if the callback server cannot bind, if the authorization URL is
/// malformed, or if no token arrives in time.
pub async fn authorize(config: &Config) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let listener = server::bind(&config.server_addr).await?;
    let server = tokio::spawn(server::serve(
        listener,
        Arc::clone(&shared_state),
        Arc::new(config.clone()),
    ));

    let auth_url = authorize_url(config, &code_challenge)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    match token {
        Some(t) => {
            success!("Authentication successful!");
            Ok(t)
        }
        None => Err("Authentication failed or timed out.".into()),
    }
}

/// Builds the Spotify authorization URL for a PKCE challenge.
pub fn authorize_url(config: &Config, code_challenge: &str) -> Res<Url> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config.scope.as_str()),
        ],
    )?;
    Ok(url)
}

/// Polls the shared state once per second for up to 60 seconds until the
/// callback handler has stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code plus PKCE verifier for a token.
pub async fn exchange_code_pkce(
    config: &Config,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let response = token_request(config)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, None))
}

/// Trades the refresh token of `previous` for a fresh access token.
///
/// Spotify may omit the refresh token and scope in the answer, in which
/// case the ones of `previous` are carried over.
pub async fn refresh_token(config: &Config, previous: &Token) -> Result<Token, reqwest::Error> {
    let response = token_request(config)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", previous.refresh_token.as_str()),
            ("client_id", config.client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, Some(previous)))
}

fn token_request(config: &Config) -> RequestBuilder {
    let request = Client::new().post(&config.token_url);
    match &config.client_secret {
        Some(secret) => request.basic_auth(&config.client_id, Some(secret)),
        None => request,
    }
}

fn into_token(json: TokenResponse, previous: Option<&Token>) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token: json
            .refresh_token
            .or_else(|| previous.map(|p| p.refresh_token.clone()))
            .unwrap_or_default(),
        scope: json
            .scope
            .or_else(|| previous.map(|p| p.scope.clone()))
            .unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
