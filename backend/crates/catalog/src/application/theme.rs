//! Theme setting

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, AuditLog};
use kernel::context::CurrentUser;
use kernel::validation::Validator;

use crate::domain::repository::SettingsRepository;
use crate::domain::theme::{THEME_SETTING_KEY, Theme};
use crate::error::CatalogResult;

pub struct ThemeSettingsUseCase<R, A>
where
    R: SettingsRepository,
    A: AuditLog,
{
    repo: Arc<R>,
    audit: Arc<A>,
}

impl<R, A> ThemeSettingsUseCase<R, A>
where
    R: SettingsRepository,
    A: AuditLog,
{
    pub fn new(repo: Arc<R>, audit: Arc<A>) -> Self {
        Self { repo, audit }
    }

    pub async fn get(&self) -> CatalogResult<Theme> {
        self.repo.theme().await
    }

    pub async fn set(&self, actor: &CurrentUser, code: &str) -> CatalogResult<Theme> {
        let theme = Theme::from_code(code);

        let mut v = Validator::new();
        v.check("theme", theme.is_some(), "Must be one of cyberpunk, windows11, apple");
        v.finish("Invalid theme")?;
        let theme = theme.unwrap_or_default();

        self.repo.set_theme(theme).await?;

        let entry = AuditEntry::new(actor.id, AuditAction::Update, "settings", THEME_SETTING_KEY)
            .with_payload(&theme.to_setting());
        self.audit.append(&entry).await?;

        tracing::info!(actor = %actor.id, theme = %theme, "Theme changed");
        Ok(theme)
    }
}
