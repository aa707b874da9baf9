use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use nutrilens::config::Config;
use nutrilens::inference::model::TorchClassifier;
use nutrilens::inference::Classifier;
use nutrilens::nutrition::NutritionTable;
use nutrilens::routes::configure_routes;
use nutrilens::storage::upload_store::UploadStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let classifier = match TorchClassifier::load(&config.model_path, &config.labels_path) {
        Ok(classifier) => classifier,
        Err(e) => {
            log::error!("Failed to load classifier at startup: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Classifier loading failed: {}", e),
            ));
        }
    };
    let classifier: web::Data<dyn Classifier> =
        web::Data::from(Arc::new(classifier) as Arc<dyn Classifier>);

    // A broken table degrades lookups to misses; the service still starts.
    let table = match NutritionTable::load_csv(&config.nutrition_table_path) {
        Ok(table) => {
            log::info!(
                "Loaded {} nutrition records from {}",
                table.len(),
                config.nutrition_table_path.display()
            );
            table
        }
        Err(e) => {
            log::error!(
                "Failed to load nutrition table from {}: {}",
                config.nutrition_table_path.display(),
                e
            );
            NutritionTable::empty()
        }
    };
    if table.is_empty() {
        log::warn!("Nutrition table is empty; every lookup will miss");
    }
    let table = web::Data::new(table);

    let store = web::Data::new(UploadStore::new(&config.upload_dir)?);

    let bind_address = format!("0.0.0.0:{}", config.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(classifier.clone())
            .app_data(table.clone())
            .app_data(store.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
