//! apex binary: reads configuration once, then serves the site.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use apex::{App, Mode, Server, SiteConfig, pages};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apex", version, about = "Canonicalizing landing-site server")]
struct Cli {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:3000", env = "APEX_BIND")]
    bind: SocketAddr,

    /// Production apex domain; `www.` and plain-http requests are redirected to it
    #[arg(long, default_value = apex::config::DEFAULT_CANONICAL_HOST, env = "APEX_CANONICAL_HOST")]
    canonical_host: String,

    /// Deployment environment: `development` or `production`
    #[arg(long = "env", default_value = "production", env = "APEX_ENV")]
    mode: Mode,

    /// Take the request scheme from the edge proxy's `x-forwarded-proto`
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, env = "APEX_TRUST_FORWARDED_PROTO")]
    trust_forwarded_proto: bool,

    /// Source URL of the embedded game iframe
    #[arg(long, env = "APEX_GAME_URL")]
    game_url: Option<String>,

    /// Google tag id (e.g. G-XXXXXXX)
    #[arg(long, env = "APEX_ANALYTICS_ID")]
    analytics_id: Option<String>,

    /// Microsoft Clarity project id
    #[arg(long, env = "APEX_CLARITY_ID")]
    clarity_id: Option<String>,

    /// Ahrefs web analytics site key
    #[arg(long, env = "APEX_AHREFS_KEY")]
    ahrefs_key: Option<String>,

    /// Address shown on the contact page
    #[arg(long, env = "APEX_CONTACT_EMAIL")]
    contact_email: Option<String>,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "APEX_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = SiteConfig::new(&cli.canonical_host)
        .context("invalid --canonical-host")?
        .mode(cli.mode)
        .trust_forwarded_proto(cli.trust_forwarded_proto)
        .game_url(cli.game_url)
        .analytics_id(cli.analytics_id)
        .clarity_id(cli.clarity_id)
        .ahrefs_key(cli.ahrefs_key)
        .contact_email(cli.contact_email);
    let config = Arc::new(config);

    let app = App::new(Arc::clone(&config), pages::router(config));
    Server::bind(cli.bind).serve(app).await?;
    Ok(())
}
