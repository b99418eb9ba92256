//! Location listing and table administration

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use kernel::context::CurrentUser;
use kernel::id::{LocationId, TableId};
use kernel::validation::Validator;

use crate::application::check_present;
use crate::domain::repository::VenueRepository;
use crate::domain::venue::{Location, Table, TablePatch};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
pub struct CreateTableInput {
    pub location_id: Option<LocationId>,
    pub code: String,
    pub label: String,
}

pub struct ManageTablesUseCase<R, A>
where
    R: VenueRepository,
    A: AuditLog,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> ManageTablesUseCase<R, A>
where
    R: VenueRepository,
    A: AuditLog,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn locations(&self) -> CatalogResult<Vec<Location>> {
        self.repo.list_locations().await
    }

    pub async fn tables(&self) -> CatalogResult<Vec<Table>> {
        self.repo.list_tables().await
    }

    pub async fn create(&self, actor: &CurrentUser, input: CreateTableInput) -> CatalogResult<TableId> {
        let mut v = Validator::new();
        v.check("location_id", input.location_id.is_some(), "Required")
            .min_chars("code", &input.code, 1)
            .min_chars("label", &input.label, 1);
        v.finish("Invalid table")?;
        let Some(location_id) = input.location_id else {
            return Err(kernel::AppError::bad_request("Invalid table").into());
        };

        if !self.repo.location_exists(&location_id).await? {
            return Err(CatalogError::UnknownLocation);
        }

        let table = Table::new(location_id, input.code.trim().to_string(), input.label);
        self.repo.insert_table(&table).await?;

        let entry = AuditEntry::new(actor.id, AuditAction::Create, "table", table.id).with_payload(&table);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, table_id = %table.id, code = %table.code, "Table created");
        Ok(table.id)
    }

    /// Deactivation is `is_active = false`; tables are never deleted.
    pub async fn update(&self, actor: &CurrentUser, id: &TableId, patch: TablePatch) -> CatalogResult<()> {
        let mut v = Validator::new();
        check_present(&mut v, "code", patch.code.as_deref());
        check_present(&mut v, "label", patch.label.as_deref());
        v.finish("Invalid table update")?;

        if !self.repo.update_table(id, &patch).await? {
            return Err(CatalogError::TableNotFound);
        }

        let entry = AuditEntry::new(actor.id, AuditAction::Update, "table", id).with_payload(&patch);
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, table_id = %id, "Table updated");
        Ok(())
    }
}
