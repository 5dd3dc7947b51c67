use utoipa::OpenApi;

pub const VEGETABLE_TAG: &str = "Vegetables";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HDataSet API",
        description = "CRUD API for the Vegetable data set",
    ),
    components(schemas(crate::api::dto::ErrorResponse)),
    tags(
        (name = VEGETABLE_TAG, description = "Vegetable CRUD endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
