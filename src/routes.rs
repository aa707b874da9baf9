use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::info;
use serde_json::json;
use std::io::Write;

use crate::error::AppError;
use crate::inference::{predict, Classifier};
use crate::nutrition::NutritionTable;
use crate::storage::upload_store::UploadStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handle_predict)));
}

/// `POST /predict`: save the uploaded photo, classify it, join the predicted
/// label against the nutrition table, and respond. The upload guard deletes
/// the saved file on every exit path, including errors.
async fn handle_predict(
    classifier: web::Data<dyn Classifier>,
    table: web::Data<NutritionTable>,
    store: web::Data<UploadStore>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image_data: Vec<u8> = Vec::new();
    let mut filename: Option<String> = None;
    let mut found = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        if field.name() != Some("image") {
            continue;
        }
        found = true;
        filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(AppError::Multipart)?;
            image_data.write_all(&data).map_err(AppError::Upload)?;
        }
        // First `image` field wins; later duplicates are ignored.
        break;
    }

    if !found {
        return Err(AppError::NoImage.into());
    }

    let upload = store
        .save(filename.as_deref(), &image_data)
        .map_err(AppError::Upload)?;

    let image = image::open(upload.path()).map_err(|e| AppError::Inference(e.into()))?;
    let prediction = predict(classifier.get_ref(), &image).map_err(AppError::Inference)?;

    let nutrients = match table.lookup(&prediction.label) {
        Some(record) => json!(record),
        // Not found at all: explicit nulls, distinct from stored "N/A" cells.
        None => json!({
            "food_name": prediction.label,
            "energy_kcal": null,
            "protein_g": null,
            "fat_g": null,
            "carb_g": null,
        }),
    };

    info!(
        "Predicted '{}' (confidence {})",
        prediction.label, prediction.confidence
    );

    Ok(HttpResponse::Ok().json(json!({
        "label": prediction.label,
        "confidence": prediction.confidence,
        "nutrients": nutrients,
    })))
}
