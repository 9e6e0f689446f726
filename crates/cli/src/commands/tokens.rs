use anyhow::Result;
use habitlog_core::ConfigError;
use habitlog_service::AuthService;

/// Mint a token pair from `JWT_SECRET` alone, for scripting against the API.
pub(crate) fn run(json: bool) -> Result<()> {
    let secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
    let pair = AuthService::new(&secret)?.issue()?;

    if json {
        let body = serde_json::json!({
            "session": pair.session_id,
            "accessToken": pair.access_token,
            "refreshToken": pair.refresh_token,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("ACCESS_TOKEN={}", pair.access_token);
        println!("REFRESH_TOKEN={}", pair.refresh_token);
    }
    Ok(())
}
