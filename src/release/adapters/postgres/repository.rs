//! `PostgreSQL` version repository.

use super::models::{VersionChangeset, VersionRow};
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{user_stories, versions};
use crate::persistence::{RepositoryError, RepositoryResult};
use crate::project::domain::ProjectId;
use crate::release::domain::{
    PersistedVersionData, Version, VersionId, VersionNumber, VersionStatus, VersionTitle,
};
use crate::release::ports::VersionRepository;
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl VersionRepository for PostgresStore {
    async fn store_version(&self, version: &Version) -> RepositoryResult<()> {
        let row = to_row(version);
        self.run_blocking(move |connection| {
            diesel::insert_into(versions::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update_version(&self, version: &Version) -> RepositoryResult<()> {
        let id = version.id();
        let changes = VersionChangeset {
            title: version.title().as_str().to_owned(),
            description: version.description().map(str::to_owned),
            version_number: version.number().as_str().to_owned(),
            release_date: version.release_date(),
            status: version.status().as_str().to_owned(),
            updated_at: version.updated_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(versions::table.find(id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("version", id));
            }
            Ok(())
        })
        .await
    }

    async fn find_version(&self, id: VersionId) -> RepositoryResult<Option<Version>> {
        self.run_blocking(move |connection| {
            let row = versions::table
                .find(id.into_inner())
                .select(VersionRow::as_select())
                .first::<VersionRow>(connection)
                .optional()?;
            row.map(row_to_version).transpose()
        })
        .await
    }

    async fn find_version_by_number(
        &self,
        project_id: ProjectId,
        number: &VersionNumber,
    ) -> RepositoryResult<Option<Version>> {
        let lookup = number.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = versions::table
                .filter(versions::project_id.eq(project_id.into_inner()))
                .filter(versions::version_number.eq(lookup))
                .select(VersionRow::as_select())
                .first::<VersionRow>(connection)
                .optional()?;
            row.map(row_to_version).transpose()
        })
        .await
    }

    async fn find_version_by_title(
        &self,
        project_id: ProjectId,
        title: &VersionTitle,
    ) -> RepositoryResult<Option<Version>> {
        let lookup = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = versions::table
                .filter(versions::project_id.eq(project_id.into_inner()))
                .filter(versions::title.eq(lookup))
                .select(VersionRow::as_select())
                .first::<VersionRow>(connection)
                .optional()?;
            row.map(row_to_version).transpose()
        })
        .await
    }

    async fn list_versions_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<Version>> {
        self.run_blocking(move |connection| {
            versions::table
                .filter(versions::project_id.eq(project_id.into_inner()))
                .order((versions::created_at.desc(), versions::id.desc()))
                .select(VersionRow::as_select())
                .load::<VersionRow>(connection)?
                .into_iter()
                .map(row_to_version)
                .collect()
        })
        .await
    }

    async fn delete_version_detaching_stories(&self, id: VersionId) -> RepositoryResult<()> {
        self.run_transaction(move |connection| {
            diesel::update(user_stories::table.filter(user_stories::version_id.eq(id.into_inner())))
                .set(user_stories::version_id.eq(None::<uuid::Uuid>))
                .execute(connection)?;
            let removed =
                diesel::delete(versions::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("version", id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(version: &Version) -> VersionRow {
    VersionRow {
        id: version.id().into_inner(),
        project_id: version.project_id().into_inner(),
        title: version.title().as_str().to_owned(),
        description: version.description().map(str::to_owned),
        version_number: version.number().as_str().to_owned(),
        release_date: version.release_date(),
        status: version.status().as_str().to_owned(),
        created_at: version.created_at(),
        updated_at: version.updated_at(),
    }
}

fn row_to_version(row: VersionRow) -> RepositoryResult<Version> {
    let data = PersistedVersionData {
        id: VersionId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: VersionTitle::new(row.title).map_err(RepositoryError::database)?,
        description: row.description,
        number: VersionNumber::new(row.version_number).map_err(RepositoryError::database)?,
        release_date: row.release_date,
        status: VersionStatus::try_from(row.status.as_str()).map_err(RepositoryError::database)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Version::from_persisted(data))
}
