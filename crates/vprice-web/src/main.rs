use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands::*};
use dotenv::dotenv;
use log::{info, trace, LevelFilter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;
use vprice::Dataset;

mod api;
mod cli;
mod site;

fn preprocess(level: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn load(path: &Path) -> Result<Dataset> {
    Dataset::load(path).with_context(|| format!("failed to load price data from {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    preprocess(cli.trace.into());
    trace!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> vprice-web <COMMAND>"
    match cli.command {
        // "> vprice-web serve"
        Serve {
            data,
            host,
            port,
            static_dir,
        } => {
            let dataset = load(&data.data)?;
            serve(dataset, &host, port, static_dir).await?;
        }

        // "> vprice-web vegetables"
        Vegetables { data } => {
            let dataset = load(&data.data)?;
            print_json(dataset.commodities())?;
        }

        // "> vprice-web predict <VEGETABLE>"
        Predict { vegetable, data } => {
            let dataset = load(&data.data)?;
            let predicted_price = vprice::predict_next_day(&dataset, &vegetable)?;
            print_json(&api::vegetable::Prediction { predicted_price })?;
        }

        // "> vprice-web history <VEGETABLE>"
        History { vegetable, data } => {
            let dataset = load(&data.data)?;
            let history: Vec<api::vegetable::HistoricalPrice> =
                vprice::monthly_history(&dataset, &vegetable)
                    .into_iter()
                    .map(Into::into)
                    .collect();
            print_json(&history)?;
        }
    }

    Ok(())
}

async fn serve(dataset: Dataset, host: &str, port: u16, static_dir: PathBuf) -> Result<()> {
    let dataset = web::Data::new(dataset);
    let openapi = api::ApiDoc::openapi();

    info!("Serving on http://{host}:{port}");
    HttpServer::new(move || {
        App::new()
            .wrap(api::cors())
            .wrap(Logger::default())
            .app_data(dataset.clone())
            // api endpoints
            .configure(api::configure)
            // api documentation
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", openapi.clone()))
            .service(Redoc::with_url("/redoc", openapi.clone()))
            // landing page
            .configure(site::configure(static_dir.clone()))
    })
    .bind((host, port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    Ok(())
}
