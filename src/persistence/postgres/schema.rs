//! Diesel schema for the project tracking tables.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 50]
        username -> Varchar,
        /// Unique email address.
        #[max_length = 255]
        email -> Varchar,
        /// Encoded salted password digest.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued bearer tokens, keyed by their SHA-256 digest.
    access_tokens (token_digest) {
        /// Hex-encoded digest of the secret token.
        #[max_length = 64]
        token_digest -> Varchar,
        /// Account the token authenticates.
        user_id -> Uuid,
        /// Issue timestamp.
        issued_at -> Timestamptz,
        /// Expiry timestamp.
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects and their owners.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name, unique per owner.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Owning account.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project membership, owner included.
    project_members (project_id, user_id) {
        /// Project identifier.
        project_id -> Uuid,
        /// Member account.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Time-boxed sprints.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Sprint name, unique per project.
        #[max_length = 255]
        name -> Varchar,
        /// First day of the sprint.
        start_date -> Date,
        /// Last day of the sprint.
        end_date -> Date,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project releases.
    versions (id) {
        /// Version identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Release title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional release notes.
        description -> Nullable<Text>,
        /// Version number such as `1.2.0`.
        #[max_length = 64]
        version_number -> Varchar,
        /// Date the version was released.
        release_date -> Nullable<Date>,
        /// Release status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Kanban board columns.
    kanban_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Normalised status key, unique per project.
        #[max_length = 64]
        status -> Varchar,
        /// Position on the board.
        column_order -> Int4,
        /// Whether the column was created with the project.
        is_default -> Bool,
    }
}

diesel::table! {
    /// User stories.
    user_stories (id) {
        /// Story identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Sprint the story is planned in, `NULL` for the backlog.
        sprint_id -> Nullable<Uuid>,
        /// Version the story ships in.
        version_id -> Nullable<Uuid>,
        /// Kanban column matching the story status.
        kanban_column_id -> Nullable<Uuid>,
        /// Story title, unique per project.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        #[max_length = 2000]
        description -> Nullable<Varchar>,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Kanban status key.
        #[max_length = 64]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Story assignees.
    user_story_assignees (user_story_id, user_id) {
        /// Story identifier.
        user_story_id -> Uuid,
        /// Assigned account.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Technical tasks within user stories.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent story.
        user_story_id -> Uuid,
        /// Task title, unique per story.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        #[max_length = 2000]
        description -> Nullable<Varchar>,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Assigned account, if any.
        assignee_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(access_tokens -> users (user_id));
diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(project_members -> users (user_id));
diesel::joinable!(sprints -> projects (project_id));
diesel::joinable!(versions -> projects (project_id));
diesel::joinable!(kanban_columns -> projects (project_id));
diesel::joinable!(user_stories -> projects (project_id));
diesel::joinable!(user_stories -> sprints (sprint_id));
diesel::joinable!(user_stories -> versions (version_id));
diesel::joinable!(user_stories -> kanban_columns (kanban_column_id));
diesel::joinable!(user_story_assignees -> user_stories (user_story_id));
diesel::joinable!(user_story_assignees -> users (user_id));
diesel::joinable!(tasks -> user_stories (user_story_id));
diesel::joinable!(tasks -> users (assignee_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    access_tokens,
    projects,
    project_members,
    sprints,
    versions,
    kanban_columns,
    user_stories,
    user_story_assignees,
    tasks
);
