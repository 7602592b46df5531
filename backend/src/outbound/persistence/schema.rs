//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `username` and `email` carry unique constraints.
    users (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Unique login handle.
        username -> Varchar,
        /// Unique contact email.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Workouts, deleted with their owning user.
    workouts (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Owning user (`ON DELETE CASCADE`).
        user_id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Planned duration.
        duration_minutes -> Nullable<Int4>,
        /// Number of exercises, maintained by the domain.
        exercise_count -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Exercises, deleted with their owning workout.
    exercises (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Owning workout (`ON DELETE CASCADE`).
        workout_id -> Int8,
        /// Movement name.
        name -> Varchar,
        /// Planned sets.
        sets -> Nullable<Int4>,
        /// Repetitions per set.
        reps -> Nullable<Int4>,
        /// Working weight in kilograms.
        weight_kg -> Nullable<Float8>,
        /// Free-form notes.
        notes -> Nullable<Text>,
        /// Position within the workout.
        order_index -> Nullable<Int4>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(workouts -> users (user_id));
diesel::joinable!(exercises -> workouts (workout_id));

diesel::allow_tables_to_appear_in_same_query!(users, workouts, exercises);
