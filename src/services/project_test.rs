#[cfg(feature = "live-db-tests")]
use super::*;
#[cfg(feature = "live-db-tests")]
use crate::services::estimate::{EstimateRequest, MaterialGrade};

#[cfg(feature = "live-db-tests")]
fn request(name: &str) -> EstimateRequest {
    EstimateRequest {
        project_name: name.into(),
        location: "Pune".into(),
        floor_area_sq_m: 120,
        floors: 2,
        material: MaterialGrade::Standard,
    }
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn save_and_read_back() {
    let state = crate::state::test_helpers::live_app_state().await;

    let saved = save_project(&state.pool, &request("Round Trip"), 4_800_000)
        .await
        .unwrap();
    assert_eq!(saved.project_name, "Round Trip");
    assert_eq!(saved.floor_area_sq_m, 120);
    assert_eq!(saved.estimated_cost, 4_800_000);
    assert!(saved.created_at.ends_with('Z'));

    let fetched = get_project(&state.pool, saved.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, saved.id);
    assert_eq!(fetched.material, MaterialGrade::Standard);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn missing_project_is_none() {
    let state = crate::state::test_helpers::live_app_state().await;
    let found = get_project(&state.pool, uuid::Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn list_is_newest_first() {
    let state = crate::state::test_helpers::live_app_state().await;

    let first = save_project(&state.pool, &request("Older"), 1_000_000).await.unwrap();
    let second = save_project(&state.pool, &request("Newer"), 2_000_000).await.unwrap();

    let all = list_projects(&state.pool).await.unwrap();
    let pos_first = all.iter().position(|p| p.id == first.id).unwrap();
    let pos_second = all.iter().position(|p| p.id == second.id).unwrap();
    assert!(pos_second < pos_first);
}
