//! Tests for the in-memory persistence adapter.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{NewExercise, NewUser, NewWorkout};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn draft_user(username: &str) -> User {
    User::new(
        NewUser {
            username: username.to_owned(),
            email: format!("{username}@example.com"),
        },
        now(),
    )
}

fn draft_workout(owner: UserId, name: &str) -> Workout {
    Workout::new(
        owner,
        NewWorkout {
            user_id: owner.get(),
            name: name.to_owned(),
            ..NewWorkout::default()
        },
        now(),
    )
}

fn draft_exercise(workout: WorkoutId, name: &str, order_index: Option<i32>) -> Exercise {
    Exercise::new(
        workout,
        NewExercise {
            name: name.to_owned(),
            order_index,
            ..NewExercise::default()
        },
        now(),
    )
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

async fn seeded(store: &InMemoryStore) -> (UserId, WorkoutId) {
    let user = UserPort::save(store, draft_user("alice"))
        .await
        .expect("user saves");
    let owner = user.id.expect("saved user has id");
    let workout = WorkoutPort::save(store, draft_workout(owner, "Leg Day"))
        .await
        .expect("workout saves");
    (owner, workout.id.expect("saved workout has id"))
}

#[rstest]
#[tokio::test]
async fn save_assigns_sequential_ids(store: InMemoryStore) {
    let first = UserPort::save(&store, draft_user("alice"))
        .await
        .expect("first save");
    let second = UserPort::save(&store, draft_user("bob"))
        .await
        .expect("second save");

    assert_eq!(first.id.map(UserId::get), Some(1));
    assert_eq!(second.id.map(UserId::get), Some(2));
}

#[rstest]
#[tokio::test]
async fn each_table_has_its_own_sequence(store: InMemoryStore) {
    let (owner, workout_id) = seeded(&store).await;
    let exercise = ExercisePort::save(&store, draft_exercise(workout_id, "Squat", None))
        .await
        .expect("exercise saves");

    assert_eq!(owner.get(), 1);
    assert_eq!(workout_id.get(), 1);
    assert_eq!(exercise.id.map(ExerciseId::get), Some(1));
}

#[rstest]
#[tokio::test]
async fn deleted_ids_are_not_reused(store: InMemoryStore) {
    let first = UserPort::save(&store, draft_user("alice"))
        .await
        .expect("save");
    UserPort::delete_by_id(&store, first.id.expect("id"))
        .await
        .expect("delete");

    let next = UserPort::save(&store, draft_user("bob"))
        .await
        .expect("save");

    assert_eq!(next.id.map(UserId::get), Some(2));
}

#[rstest]
#[tokio::test]
async fn saved_user_round_trips(store: InMemoryStore) {
    let saved = UserPort::save(&store, draft_user("alice"))
        .await
        .expect("save");
    let id = saved.id.expect("id assigned");

    let found = UserPort::find_by_id(&store, id).await.expect("lookup");
    let by_name = store.find_by_username("alice").await.expect("lookup");

    assert_eq!(found, Some(saved.clone()));
    assert_eq!(by_name, Some(saved));
}

#[rstest]
#[case("alice", "other@example.com", "username already exists")]
#[case("other", "alice@example.com", "email already exists")]
#[tokio::test]
async fn duplicate_user_fields_conflict(
    store: InMemoryStore,
    #[case] username: &str,
    #[case] email: &str,
    #[case] expected: &str,
) {
    UserPort::save(&store, draft_user("alice"))
        .await
        .expect("first save");
    let mut duplicate = draft_user(username);
    duplicate.email = email.to_owned();

    let err = UserPort::save(&store, duplicate)
        .await
        .expect_err("duplicate rejected");

    assert!(matches!(
        err,
        UserPersistenceError::Conflict { ref message } if message == expected
    ));
}

#[rstest]
#[tokio::test]
async fn updating_a_user_keeps_its_own_username(store: InMemoryStore) {
    let mut saved = UserPort::save(&store, draft_user("alice"))
        .await
        .expect("save");
    saved.email = "alice@new.example.com".to_owned();

    let updated = UserPort::save(&store, saved.clone())
        .await
        .expect("update succeeds");

    assert_eq!(updated.email, "alice@new.example.com");
    assert_eq!(UserPort::find_all(&store).await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn updating_a_vanished_user_is_a_query_error(store: InMemoryStore) {
    let mut ghost = draft_user("ghost");
    ghost.id = Some(UserId::new(42).expect("positive"));

    let err = UserPort::save(&store, ghost)
        .await
        .expect_err("missing row rejected");

    assert!(matches!(err, UserPersistenceError::Query { .. }));
}

#[rstest]
#[tokio::test]
async fn workout_requires_existing_owner(store: InMemoryStore) {
    let owner = UserId::new(7).expect("positive");

    let err = WorkoutPort::save(&store, draft_workout(owner, "Leg Day"))
        .await
        .expect_err("orphan rejected");

    assert!(matches!(err, WorkoutPersistenceError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn exercise_requires_existing_workout(store: InMemoryStore) {
    let workout = WorkoutId::new(9).expect("positive");

    let err = ExercisePort::save(&store, draft_exercise(workout, "Squat", None))
        .await
        .expect_err("orphan rejected");

    assert!(matches!(err, ExercisePersistenceError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn workout_reads_attach_ordered_exercises(store: InMemoryStore) {
    let (owner, workout_id) = seeded(&store).await;
    for (name, order) in [("Lunge", None), ("Deadlift", Some(2)), ("Squat", Some(1))] {
        ExercisePort::save(&store, draft_exercise(workout_id, name, order))
            .await
            .expect("exercise saves");
    }

    let workout = WorkoutPort::find_by_id(&store, workout_id)
        .await
        .expect("lookup")
        .expect("workout exists");
    let names: Vec<&str> = workout
        .exercises
        .iter()
        .map(|exercise| exercise.name.as_str())
        .collect();
    let listed = store.find_by_user_id(owner).await.expect("list");

    assert_eq!(names, ["Squat", "Deadlift", "Lunge"]);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exercises.len(), 3);
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades(store: InMemoryStore) {
    let (owner, workout_id) = seeded(&store).await;
    let exercise = ExercisePort::save(&store, draft_exercise(workout_id, "Squat", None))
        .await
        .expect("exercise saves");

    UserPort::delete_by_id(&store, owner).await.expect("delete");

    assert_eq!(
        WorkoutPort::find_by_id(&store, workout_id)
            .await
            .expect("lookup"),
        None
    );
    assert_eq!(
        ExercisePort::find_by_id(&store, exercise.id.expect("id"))
            .await
            .expect("lookup"),
        None
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_workout_removes_its_exercises(store: InMemoryStore) {
    let (_, workout_id) = seeded(&store).await;
    ExercisePort::save(&store, draft_exercise(workout_id, "Squat", None))
        .await
        .expect("exercise saves");

    WorkoutPort::delete_by_id(&store, workout_id)
        .await
        .expect("delete");

    let remaining = store.find_by_workout_id(workout_id).await.expect("lookup");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_missing_rows_is_a_no_op(store: InMemoryStore) {
    let id = UserId::new(3).expect("positive");

    UserPort::delete_by_id(&store, id)
        .await
        .expect("no-op delete");
    ExercisePort::delete_by_id(&store, ExerciseId::new(3).expect("positive"))
        .await
        .expect("no-op delete");
}

#[rstest]
#[tokio::test]
async fn attaching_refreshes_the_stored_count(store: InMemoryStore) {
    let (_, workout_id) = seeded(&store).await;
    let later = now() + chrono::Duration::minutes(5);

    let saved = store
        .attach_to_workout(draft_exercise(workout_id, "Squat", Some(1)), later)
        .await
        .expect("attach succeeds");

    let workout = WorkoutPort::find_by_id(&store, workout_id)
        .await
        .expect("lookup")
        .expect("workout exists");
    assert_eq!(saved.id.map(ExerciseId::get), Some(1));
    assert_eq!(workout.exercise_count, 1);
    assert_eq!(workout.updated_at, later);
    assert_eq!(workout.created_at, now());
}

#[rstest]
#[tokio::test]
async fn attaching_to_a_missing_workout_stores_nothing(store: InMemoryStore) {
    let workout = WorkoutId::new(9).expect("positive");

    let err = store
        .attach_to_workout(draft_exercise(workout, "Squat", None), now())
        .await
        .expect_err("orphan rejected");

    assert!(matches!(err, ExercisePersistenceError::Conflict { .. }));
    let (_, workout_id) = seeded(&store).await;
    let first = store
        .attach_to_workout(draft_exercise(workout_id, "Lunge", None), now())
        .await
        .expect("attach succeeds");
    assert_eq!(first.id.map(ExerciseId::get), Some(1));
}

#[rstest]
#[tokio::test]
async fn detaching_lowers_the_stored_count(store: InMemoryStore) {
    let (_, workout_id) = seeded(&store).await;
    let squat = store
        .attach_to_workout(draft_exercise(workout_id, "Squat", None), now())
        .await
        .expect("attach");
    store
        .attach_to_workout(draft_exercise(workout_id, "Lunge", None), now())
        .await
        .expect("attach");
    let later = now() + chrono::Duration::minutes(10);

    store
        .detach_from_workout(squat.id.expect("id"), later)
        .await
        .expect("detach succeeds");

    let workout = WorkoutPort::find_by_id(&store, workout_id)
        .await
        .expect("lookup")
        .expect("workout exists");
    assert_eq!(workout.exercise_count, 1);
    assert_eq!(workout.updated_at, later);
    assert_eq!(workout.exercises[0].name, "Lunge");
}

#[rstest]
#[tokio::test]
async fn detaching_a_missing_exercise_leaves_workouts_alone(store: InMemoryStore) {
    let (_, workout_id) = seeded(&store).await;

    let missing = ExerciseId::new(5).expect("positive");

    store
        .detach_from_workout(missing, now() + chrono::Duration::hours(1))
        .await
        .expect("no-op detach");

    let workout = WorkoutPort::find_by_id(&store, workout_id)
        .await
        .expect("lookup")
        .expect("workout exists");
    assert_eq!(workout.updated_at, now());
}
