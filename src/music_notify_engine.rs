use anyhow::Error;
use tracing_subscriber::fmt::format::FmtSpan;
use world_music_notifier::{
    countries::{load_countries, COUNTRIES_DATASET},
    notify_engine::{
        output_channel::GithubOutputChannel, template_engine::TeraTemplateEngine, NotifyDate,
        NotifyEngine,
    },
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
    // Naive check on env:GITHUB_ACTIONS to have value to see if this is running inside a workflow
    let is_actions_env = std::env::var("GITHUB_ACTIONS").is_ok();

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    if is_actions_env {
        tracing_builder.json().init();
    } else {
        tracing_builder.init();
    }

    let output_channel = GithubOutputChannel::from_env()?;
    let tera = TeraTemplateEngine::try_init()?;
    let get_countries = || async { load_countries(COUNTRIES_DATASET).await };
    let mut notify_engine = NotifyEngine::new(get_countries, output_channel, tera);
    notify_engine.run(&NotifyDate::today()).await?;

    Ok(())
}
