use crate::{config::Config, error, management::TokenManager, spotify, success};

pub async fn auth() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let token = match spotify::auth::authorize(&config).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let token_mgr = TokenManager::new(token);
    if let Err(e) = token_mgr.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!(
        "Token cached with scope \"{}\", ready to create playlists",
        token_mgr.current_token().scope
    );
}
