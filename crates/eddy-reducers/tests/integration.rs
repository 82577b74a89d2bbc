//! Integration tests exercising `eddy-actions` and `eddy-reducers`
//! together: mint creators from a factory, assemble a reducer over them,
//! and fold constructed actions into state the way an external dispatcher
//! would.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::items_after_statements,
    clippy::missing_panics_doc
)]

use eddy_actions::{
    Action, ActionCreatorFactory, ActionType, AsyncActionCreators, DonePayload, FailedPayload,
    Meta,
};
use eddy_reducers::{reducer_with_initial_state, Reducer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Counter scenario
// =============================================================================

#[test]
fn counter_reducer_end_to_end() {
    let factory = ActionCreatorFactory::with_prefix("app");
    let increment = factory.create::<u32>("INC").expect("fresh discriminant");

    let counter = reducer_with_initial_state(0_u32)
        .case(&increment, |state, _by| state.saturating_add(1))
        .build();

    // Dispatching without a state seeds the fold from the initial state.
    assert_eq!(counter.reduce(None, &increment.empty()), Some(1));

    // A discriminant no case was registered for is a no-op.
    let other = Action::bare(ActionType::new("other"));
    assert_eq!(counter.reduce(Some(5), &other), Some(5));
}

#[test]
fn payload_carries_the_increment_amount() {
    let factory = ActionCreatorFactory::with_prefix("app");
    let increment = factory.create::<u32>("INC").expect("fresh discriminant");

    let counter = reducer_with_initial_state(0_u32)
        .case(&increment, |state, by| {
            state.saturating_add(by.unwrap_or(1))
        })
        .build();

    let by_ten = increment.action(10).expect("u32 serializes");
    assert_eq!(counter.reduce(None, &by_ten), Some(10));
    assert_eq!(counter.reduce(Some(2), &increment.empty()), Some(3));
}

// =============================================================================
// Asynchronous operation lifecycle
// =============================================================================

/// Parameters of the load operation used below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LoadParams {
    resource: String,
}

/// The state a dispatcher would hold for the load operation.
#[derive(Debug, Clone, PartialEq, Default)]
enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Value),
    Failed(String),
}

fn load_reducer(
    group: &AsyncActionCreators<LoadParams, Value, String>,
) -> Reducer<LoadState, LoadState> {
    reducer_with_initial_state(LoadState::default())
        .case(&group.started, |_state, _params| LoadState::Loading)
        .case(&group.done, |_state, payload| {
            payload
                .and_then(|done: DonePayload<LoadParams, Value>| done.result)
                .map_or(LoadState::Idle, LoadState::Loaded)
        })
        .case(&group.failed, |_state, payload| {
            payload.map_or(LoadState::Idle, |failed: FailedPayload<LoadParams, String>| {
                LoadState::Failed(failed.error)
            })
        })
        .build()
}

#[test]
fn lifecycle_actions_walk_the_state_machine() {
    let factory = ActionCreatorFactory::with_prefix("app");
    let group = factory
        .async_creators::<LoadParams, Value, String>("LOAD", None)
        .expect("fresh family");
    let reducer = load_reducer(&group);

    let params = LoadParams {
        resource: "profile".to_owned(),
    };

    let started = group.started.action(params.clone()).expect("serializes");
    assert_eq!(started.action_type.as_str(), "app/LOAD_STARTED");
    assert!(!started.error);

    let state = reducer.reduce(None, &started);
    assert_eq!(state, Some(LoadState::Loading));

    let done = group
        .done
        .action(DonePayload {
            params: Some(params.clone()),
            result: Some(json!({"name": "Alpha"})),
        })
        .expect("serializes");
    assert!(!done.error);

    let state = reducer.reduce(state, &done);
    assert_eq!(state, Some(LoadState::Loaded(json!({"name": "Alpha"}))));

    let failed = group
        .failed
        .action(FailedPayload {
            params: Some(params),
            error: "e".to_owned(),
        })
        .expect("serializes");
    assert!(failed.error);

    let state = reducer.reduce(state, &failed);
    assert_eq!(state, Some(LoadState::Failed("e".to_owned())));
}

// =============================================================================
// Wire shape
// =============================================================================

#[test]
fn constructed_actions_follow_the_standard_wire_shape() {
    let factory = ActionCreatorFactory::with_prefix("app");
    let tagged = factory
        .creator::<u32>("TAGGED")
        .common_meta(Meta::from([("a".to_owned(), json!(1))]))
        .never_error()
        .register()
        .expect("fresh discriminant");

    let action = tagged
        .action_with_meta(7, Meta::from([("b".to_owned(), json!(2))]))
        .expect("u32 serializes");

    let wire = serde_json::to_value(&action).expect("action serializes");
    assert_eq!(
        wire,
        json!({
            "type": "app/TAGGED",
            "payload": 7,
            "meta": {"a": 1, "b": 2},
        }),
    );

    let restored: Action = serde_json::from_value(wire).expect("action deserializes");
    assert_eq!(restored, action);
}

// =============================================================================
// Thread-safety of the produced values
// =============================================================================

#[test]
fn creators_and_reducers_cross_thread_boundaries() {
    fn assert_send_sync<T: Send + Sync>(_value: &T) {}

    let factory = ActionCreatorFactory::new();
    let increment = factory.create::<u32>("INC").expect("fresh discriminant");
    let reducer = reducer_with_initial_state(0_u32)
        .case(&increment, |state, _by| state.saturating_add(1))
        .build();

    assert_send_sync(&factory);
    assert_send_sync(&increment);
    assert_send_sync(&reducer);

    let action = increment.empty();
    let handle = std::thread::spawn(move || reducer.reduce(None, &action));
    assert_eq!(handle.join().ok(), Some(Some(1)));
}
