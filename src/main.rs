//! Conference Central command-line client.
//!
//! Signs in with the configured access token (if any) and lists the
//! conferences visible to the current user.

use std::sync::Arc;

use conference_central::adapters::{
    DirectSignInPrompt, HttpRpcClient, HttpRpcConfig, OAuth2Config, OAuth2IdentityProvider,
};
use conference_central::application::AppContext;
use conference_central::config::AppConfig;
use conference_central::domain::conference::ConferenceQuery;
use conference_central::domain::remote_call::RemoteCallResult;
use conference_central::ports::IdentityProvider;
use conference_central::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.client)?;

    tracing::info!(
        environment = ?config.client.environment,
        api = %config.api.root_url,
        "Starting Conference Central client"
    );

    let oauth = OAuth2Config::from_auth_config(&config.auth);
    let signs_in = oauth.has_access_token();
    let identity: Arc<dyn IdentityProvider> = Arc::new(OAuth2IdentityProvider::new(oauth)?);
    let transport = Arc::new(HttpRpcClient::new(
        HttpRpcConfig::from_api_config(&config.api),
        Arc::clone(&identity),
    )?);

    let context = AppContext::new(
        &config,
        transport,
        identity,
        Arc::new(DirectSignInPrompt::new()),
    );

    if signs_in {
        let identity = context.session().sign_in().await?;
        tracing::info!(email = %identity.email, "Signed in");
    }

    match context
        .conferences()
        .query_conferences(&ConferenceQuery::default())
        .await
    {
        RemoteCallResult::Success { data, message } => {
            tracing::info!(count = data.len(), "{}", message);
            for conference in data {
                println!(
                    "{}\t{}\t{}",
                    conference.name,
                    conference.city.as_deref().unwrap_or("-"),
                    conference.start_date.as_deref().unwrap_or("-"),
                );
            }
        }
        RemoteCallResult::Failure { kind, message, .. } => {
            tracing::error!(%kind, "{}", message);
            eprintln!("{}", message);
        }
    }

    Ok(())
}
