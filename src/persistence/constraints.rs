//! Names of the unique constraints declared by the schema migrations.
//!
//! The in-memory store reports violations with the same names so services can
//! translate them into typed errors independently of the backing store.

/// One username per account.
pub const USERS_USERNAME: &str = "users_username_key";
/// One email address per account.
pub const USERS_EMAIL: &str = "users_email_key";
/// Project names are unique per owner.
pub const PROJECTS_OWNER_NAME: &str = "idx_projects_owner_name";
/// Sprint names are unique per project.
pub const SPRINTS_PROJECT_NAME: &str = "idx_sprints_project_name";
/// At most one active sprint per project.
pub const SPRINTS_SINGLE_ACTIVE: &str = "idx_sprints_single_active";
/// User story titles are unique per project.
pub const STORIES_PROJECT_TITLE: &str = "idx_user_stories_project_title";
/// Task titles are unique per user story.
pub const TASKS_STORY_TITLE: &str = "idx_tasks_story_title";
/// Kanban status keys are unique per project.
pub const COLUMNS_PROJECT_STATUS: &str = "idx_kanban_columns_project_status";
/// Version numbers are unique per project.
pub const VERSIONS_PROJECT_NUMBER: &str = "idx_versions_project_number";
/// Version titles are unique per project.
pub const VERSIONS_PROJECT_TITLE: &str = "idx_versions_project_title";
