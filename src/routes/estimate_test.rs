use super::*;
use crate::routes::auth::AuthUser;
use crate::services::estimate::MaterialGrade;
use crate::state::test_helpers;

fn auth() -> AuthUser {
    AuthUser { username: "demo".into(), token: "test-token".into() }
}

fn fields() -> DraftFields {
    DraftFields {
        project_name: Some("Lakeview Residency".into()),
        location: Some("Pune".into()),
        floor_area_sq_m: Some(120),
        floors: None,
        material: Some(MaterialGrade::Luxury),
    }
}

#[tokio::test(start_paused = true)]
async fn put_then_get_round_trip() {
    let state = test_helpers::test_app_state();

    let Json(after) = put_draft(State(state.clone()), auth(), Json(fields())).await;
    assert_eq!(after.fields, fields());

    let Json(now) = get_draft(State(state), auth()).await;
    assert_eq!(now.fields, fields());
}

#[tokio::test]
async fn get_spawns_an_empty_draft() {
    let state = test_helpers::test_app_state();

    let Json(snapshot) = get_draft(State(state), auth()).await;
    assert_eq!(snapshot.fields, DraftFields::default());
    assert_eq!(snapshot.generation, 0);
}

#[test]
fn draft_state_wire_shape() {
    let state = crate::services::draft::DraftState {
        fields: fields(),
        phase: crate::services::draft::EstimatePhase::Ready { estimated_cost: 4_800_000 },
        generation: 3,
    };

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["phase"], "ready");
    assert_eq!(value["estimated_cost"], 4_800_000);
    assert_eq!(value["generation"], 3);
    assert_eq!(value["fields"]["floor_area_sq_m"], 120);
    assert_eq!(value["fields"]["material"], "Luxury");
}
