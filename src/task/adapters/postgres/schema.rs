//! Diesel schema for board task persistence.
//!
//! The `id` column is expected to carry a `gen_random_uuid()` default so the
//! store, not the client, assigns identifiers.

diesel::table! {
    /// Board task rows, one per task, scoped by owner.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Uuid,
        /// Opaque caller identity owning the row.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Assignee name; empty means "not delegated".
        #[max_length = 255]
        delegated_to -> Varchar,
        /// Board status.
        #[max_length = 50]
        status -> Varchar,
        /// Restore snapshot, present only while status is `completed`.
        #[max_length = 50]
        last_active_status -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
