//! OpenAPI document for the HTTP surface.

use crate::error::ErrorBody;
use crate::models::{
    ContactDraft, ContactMessage, Experience, ExperienceDraft, Profile, ProfileDraft, Project, ProjectDraft,
    Skill, SkillCategory, SkillDraft,
};
use crate::response::Ack;
use crate::view::PortfolioView;
use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "folio",
        description = "Portfolio resources and the public aggregate view"
    ),
    paths(
        crate::handlers::resource::list,
        crate::handlers::resource::create,
        crate::handlers::resource::update,
        crate::handlers::resource::delete,
        crate::handlers::portfolio::portfolio,
    ),
    components(
        schemas(
            ErrorBody,
            Ack,
            PortfolioView,
            Profile,
            ProfileDraft,
            Skill,
            SkillDraft,
            SkillCategory,
            Project,
            ProjectDraft,
            Experience,
            ExperienceDraft,
            ContactMessage,
            ContactDraft
        )
    ),
    modifiers(&AdminAuth),
    tags(
        (name = "resources", description = "List, create, update and delete per resource"),
        (name = "portfolio", description = "Public aggregate view"),
    )
)]
pub struct ApiDoc;

struct AdminAuth;

impl utoipa::Modify for AdminAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "AdminToken",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("ADMIN_TOKEN, required for non-public operations"))
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
