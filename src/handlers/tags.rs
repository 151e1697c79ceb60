use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::dto::common::{PageQuery, PaginatedResponse, Pagination, Response};
use crate::domain::dto::tags::{CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::services::tags::TagService;

/// `GET /user/tags?page=&pageSize=`
#[get("/tags")]
pub async fn list_tags(
    tags: web::Data<TagService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = Pagination::from(&*query);
    let data = tags.find_all(page).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::ok(
        data,
        page.limit,
        page.offset,
        "Fetched tags successfully.",
    )))
}

#[post("/tags")]
pub async fn create_tag(
    tags: web::Data<TagService>,
    payload: web::Json<CreateTagRequest>,
) -> Result<HttpResponse, AppError> {
    let tag = tags.create(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Response::ok(
        TagResponse::new(tag, Vec::new()),
        "Tag added successfully.",
    )))
}

#[get("/tags/{tagId}")]
pub async fn get_tag(
    tags: web::Data<TagService>,
    tag_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tag = tags.find_by_id(parse_id(&tag_id, "tag")?).await?;

    Ok(HttpResponse::Ok().json(Response::ok(tag, "")))
}

#[patch("/tags/{tagId}")]
pub async fn update_tag(
    tags: web::Data<TagService>,
    tag_id: web::Path<String>,
    payload: web::Json<UpdateTagRequest>,
) -> Result<HttpResponse, AppError> {
    let tag = tags
        .update(parse_id(&tag_id, "tag")?, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(Response::ok(tag, "Tag updated successfully.")))
}

/// 관리자 전용. 소속 neche도 함께 삭제됩니다.
#[delete("/tags/{tagId}")]
pub async fn delete_tag(
    tags: web::Data<TagService>,
    tag_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&tag_id, "tag")?;
    tags.delete(id).await?;

    Ok(HttpResponse::Ok().json(Response::ok(format!("Deleted tag with id {}", id), "")))
}
