//! Diesel schema for board persistence.

diesel::table! {
    /// Board records owning an ordered list membership sequence.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Display name.
        #[max_length = 512]
        name -> Varchar,
        /// Ordered list membership sequence (JSON array of list UUIDs).
        list_order -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// List records with sibling sort keys and task membership.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// Parent board identifier.
        board_id -> Uuid,
        /// Display title.
        #[max_length = 512]
        title -> Varchar,
        /// Sibling sort key within the board.
        position -> Int8,
        /// Ordered task membership sequence (JSON array of task UUIDs).
        task_order -> Jsonb,
        /// Archive flag; archived lists are excluded from board retrieval.
        archived -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records with denormalized board references.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent list identifier.
        list_id -> Uuid,
        /// Parent board identifier, denormalized for authorization checks.
        board_id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Display title.
        #[max_length = 512]
        title -> Varchar,
        /// Sibling sort key within the list.
        position -> Int8,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(boards, lists, tasks);
