use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ROOT: &str = "disk:/";
pub const TOTAL_SPACE: u64 = 10 * 1024 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskInfo {
    pub total_space: u64,
    pub used_space: u64,
    pub trash_size: u64,
    pub is_paid: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub resource_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub method: String,
    pub templated: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub description: String,
    pub error: String,
}

#[derive(Deserialize)]
pub struct PathQuery {
    pub path: String,
}

pub type Disk = Arc<RwLock<HashMap<String, Resource>>>;

#[derive(Clone)]
pub struct AppState {
    authorization: Arc<str>,
    disk: Disk,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, error: &str, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
            description: message.to_string(),
            error: error.to_string(),
        }),
    )
}

/// `/a`, `a` and `disk:/a` all name the same resource; trailing slashes are
/// dropped except on the root.
pub fn canonical_path(path: &str) -> String {
    let rest = path.strip_prefix("disk:").unwrap_or(path);
    let rest = rest.trim_matches('/');
    format!("{ROOT}{rest}")
}

fn parent_of(path: &str) -> Option<String> {
    let rest = path.strip_prefix(ROOT)?;
    if rest.is_empty() {
        return None;
    }
    match rest.rsplit_once('/') {
        Some((parent, _)) => Some(format!("{ROOT}{parent}")),
        None => Some(ROOT.to_string()),
    }
}

fn directory(path: &str) -> Resource {
    let name = if path == ROOT {
        "disk".to_string()
    } else {
        path.rsplit('/').next().unwrap_or_default().to_string()
    };
    Resource {
        path: path.to_string(),
        name,
        resource_type: "dir".to_string(),
        resource_id: Uuid::new_v4().to_string(),
    }
}

pub fn app(token: &str) -> Router {
    let mut tree = HashMap::new();
    tree.insert(ROOT.to_string(), directory(ROOT));
    let state = AppState {
        authorization: Arc::from(format!("OAuth {token}")),
        disk: Arc::new(RwLock::new(tree)),
    };
    Router::new()
        .route("/v1/disk", get(disk_info))
        .route("/v1/disk/resources", get(get_resource).put(create_directory))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: String) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Failure> {
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented == Some(&*state.authorization) {
        return Ok(());
    }
    tracing::debug!("rejecting request with missing or wrong credential");
    Err(failure(StatusCode::UNAUTHORIZED, "UnauthorizedError", "Unauthorized"))
}

async fn disk_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DiskInfo>, Failure> {
    authorize(&state, &headers)?;
    Ok(Json(DiskInfo {
        total_space: TOTAL_SPACE,
        used_space: 0,
        trash_size: 0,
        is_paid: false,
    }))
}

async fn get_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> Result<Json<Resource>, Failure> {
    authorize(&state, &headers)?;
    let path = canonical_path(&query.path);
    let disk = state.disk.read().await;
    disk.get(&path).cloned().map(Json).ok_or_else(|| {
        failure(
            StatusCode::NOT_FOUND,
            "DiskNotFoundError",
            "Resource not found.",
        )
    })
}

async fn create_directory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PathQuery>,
) -> Result<(StatusCode, Json<Link>), Failure> {
    authorize(&state, &headers)?;
    let path = canonical_path(&query.path);
    let mut disk = state.disk.write().await;

    if disk.contains_key(&path) {
        return Err(failure(
            StatusCode::CONFLICT,
            "DiskPathPointsToExistentDirectoryError",
            &format!("Specified path \"{path}\" points to existent directory."),
        ));
    }
    let parent_exists = parent_of(&path).is_some_and(|parent| disk.contains_key(&parent));
    if !parent_exists {
        return Err(failure(
            StatusCode::CONFLICT,
            "DiskPathDoesntExistsError",
            &format!("Specified path \"{path}\" doesn't exists."),
        ));
    }

    disk.insert(path.clone(), directory(&path));
    tracing::info!(%path, "created directory");
    Ok((
        StatusCode::CREATED,
        Json(Link {
            href: format!("/v1/disk/resources?path={path}"),
            method: "GET".to_string(),
            templated: false,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_path_accepts_both_forms() {
        assert_eq!(canonical_path("/obsidian"), "disk:/obsidian");
        assert_eq!(canonical_path("disk:/obsidian"), "disk:/obsidian");
        assert_eq!(canonical_path("obsidian/"), "disk:/obsidian");
        assert_eq!(canonical_path("/"), ROOT);
        assert_eq!(canonical_path("disk:/"), ROOT);
    }

    #[test]
    fn parent_of_walks_up_one_level() {
        assert_eq!(parent_of("disk:/a/b").as_deref(), Some("disk:/a"));
        assert_eq!(parent_of("disk:/a").as_deref(), Some(ROOT));
        assert_eq!(parent_of(ROOT), None);
    }

    #[test]
    fn directory_uses_last_segment_as_name() {
        let dir = directory("disk:/notes/daily");
        assert_eq!(dir.name, "daily");
        assert_eq!(dir.resource_type, "dir");
        assert!(!dir.resource_id.is_empty());
    }

    #[test]
    fn root_is_named_disk() {
        let root = directory(ROOT);
        assert_eq!(root.name, "disk");
        assert_eq!(root.path, ROOT);
    }

    #[test]
    fn error_body_serializes_remote_shape() {
        let (status, Json(body)) = failure(StatusCode::NOT_FOUND, "DiskNotFoundError", "gone");
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "DiskNotFoundError");
        assert_eq!(json["message"], "gone");
    }
}
