use anyhow::Error;
use std::process::exit;

use farmhand::application::Application;
use farmhand::config::Settings;
use farmhand::database::{new_pool, run_migrations};
use farmhand::middleware::telemetry;
use farmhand::repository;

/// Start the application after loading settings, telemetry, and the database.
#[actix_web::main]
async fn main() -> Result<(), Error> {
    init_exit_handler()?;

    let settings = Settings::new()?;
    telemetry::init_tracer(&settings)?;

    let db_pool = new_pool(&settings.database_url)?;
    run_migrations(&db_pool)?;
    let repo = repository::implementation(db_pool);

    let application = Application::build(settings, repo)?;
    tracing::info!(
        target = module_path!(),
        port = application.port(),
        "Server listening"
    );

    application.run_until_stopped().await?;

    Ok(())
}

// actix-web will handle signals to exit, but doesn't offer a hook to customize it.
fn init_exit_handler() -> Result<(), Error> {
    ctrlc::set_handler(move || {
        // Ensure all spans have been reported.
        opentelemetry::global::shutdown_tracer_provider();

        exit(0);
    })?;

    Ok(())
}
