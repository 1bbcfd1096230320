use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use meridian_core::crm::{
    Contact, ContactCategory, ContactDetail, ContactFilters, ContactInteraction, ContactRole,
    CrmDashboard, NewContact, NewContactCategory, NewContactInteraction, NewOrganization,
    NewOrganizationType, Organization, OrganizationDetail, OrganizationFilters,
    OrganizationListItem, OrganizationStatus, OrganizationType,
};
use meridian_core::paging::Page;
use meridian_core::plan::Priority;
use serde::Deserialize;

async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<CrmDashboard>> {
    Ok(Json(state.crm_service.dashboard()?))
}

async fn list_organization_types(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<OrganizationType>>> {
    Ok(Json(state.crm_service.list_organization_types()?))
}

async fn create_organization_type(
    State(state): State<Arc<AppState>>,
    Json(organization_type): Json<NewOrganizationType>,
) -> ApiResult<Json<OrganizationType>> {
    Ok(Json(
        state
            .crm_service
            .create_organization_type(organization_type)
            .await?,
    ))
}

async fn list_contact_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContactCategory>>> {
    Ok(Json(state.crm_service.list_contact_categories()?))
}

async fn create_contact_category(
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewContactCategory>,
) -> ApiResult<Json<ContactCategory>> {
    Ok(Json(
        state.crm_service.create_contact_category(category).await?,
    ))
}

#[derive(Deserialize)]
struct OrganizationListParams {
    type_id: Option<String>,
    category_id: Option<String>,
    priority: Option<Priority>,
    status: Option<OrganizationStatus>,
    assignee: Option<String>,
    search: Option<String>,
    page: Option<i64>,
}

async fn list_organizations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OrganizationListParams>,
) -> ApiResult<Json<Page<OrganizationListItem>>> {
    let filters = OrganizationFilters {
        type_id: params.type_id,
        category_id: params.category_id,
        priority: params.priority,
        status: params.status,
        assignee: params.assignee,
        search: params.search,
    };
    Ok(Json(
        state
            .crm_service
            .list_organizations(filters, params.page.unwrap_or(1))?,
    ))
}

async fn get_organization(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<OrganizationDetail>> {
    Ok(Json(state.crm_service.get_organization(&id)?))
}

async fn create_organization(
    State(state): State<Arc<AppState>>,
    Json(organization): Json<NewOrganization>,
) -> ApiResult<Json<Organization>> {
    Ok(Json(
        state.crm_service.create_organization(organization).await?,
    ))
}

async fn update_organization(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(organization): Json<NewOrganization>,
) -> ApiResult<Json<Organization>> {
    Ok(Json(
        state
            .crm_service
            .update_organization(&id, organization)
            .await?,
    ))
}

async fn delete_organization(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.crm_service.delete_organization(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct ContactListParams {
    organization_id: Option<String>,
    role: Option<ContactRole>,
    is_primary: Option<bool>,
    is_active: Option<bool>,
    search: Option<String>,
    page: Option<i64>,
}

async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContactListParams>,
) -> ApiResult<Json<Page<Contact>>> {
    let filters = ContactFilters {
        organization_id: params.organization_id,
        role: params.role,
        is_primary: params.is_primary,
        is_active: params.is_active,
        search: params.search,
    };
    Ok(Json(
        state
            .crm_service
            .list_contacts(filters, params.page.unwrap_or(1))?,
    ))
}

async fn get_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactDetail>> {
    Ok(Json(state.crm_service.get_contact(&id)?))
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(contact): Json<NewContact>,
) -> ApiResult<Json<Contact>> {
    Ok(Json(state.crm_service.create_contact(contact).await?))
}

async fn update_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(contact): Json<NewContact>,
) -> ApiResult<Json<Contact>> {
    Ok(Json(state.crm_service.update_contact(&id, contact).await?))
}

async fn delete_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.crm_service.delete_contact(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_interaction(
    State(state): State<Arc<AppState>>,
    Json(interaction): Json<NewContactInteraction>,
) -> ApiResult<Json<ContactInteraction>> {
    Ok(Json(
        state.crm_service.create_interaction(interaction).await?,
    ))
}

async fn delete_interaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.crm_service.delete_interaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route(
            "/organization-types",
            get(list_organization_types).post(create_organization_type),
        )
        .route(
            "/contact-categories",
            get(list_contact_categories).post(create_contact_category),
        )
        .route(
            "/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/organizations/{id}",
            get(get_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/interactions", post(create_interaction))
        .route("/interactions/{id}", delete(delete_interaction))
}
