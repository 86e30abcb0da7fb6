use anyhow::Context;
use readinglist_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load readinglist settings")?;

    readinglist_app::run(settings).await
}
