use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::dto::common::Response;
use crate::domain::dto::tags::{CreateNecheRequest, NecheResponse};
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::services::tags::NecheService;

#[get("/neches")]
pub async fn list_neches(neches: web::Data<NecheService>) -> Result<HttpResponse, AppError> {
    let data: Vec<NecheResponse> = neches
        .find_all()
        .await?
        .into_iter()
        .map(NecheResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(Response::ok(data, "Neches Fetched Successfully.")))
}

/// 존재하지 않는 `tagId`이면 404
#[post("/neches")]
pub async fn create_neche(
    neches: web::Data<NecheService>,
    payload: web::Json<CreateNecheRequest>,
) -> Result<HttpResponse, AppError> {
    let neche = neches.create(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Response::ok(
        NecheResponse::from(neche),
        "Neche Created Successfully",
    )))
}

#[get("/neches/{necheId}")]
pub async fn get_neche(
    neches: web::Data<NecheService>,
    neche_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let neche = neches.find_by_id(parse_id(&neche_id, "neche")?).await?;

    Ok(HttpResponse::Ok().json(Response::ok(NecheResponse::from(neche), "")))
}

#[delete("/neches/{necheId}")]
pub async fn delete_neche(
    neches: web::Data<NecheService>,
    neche_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&neche_id, "neche")?;
    neches.delete(id).await?;

    Ok(HttpResponse::Ok().json(Response::ok(
        format!("Deleted neche with id {}", id),
        "Neche Deleted Successfully",
    )))
}
