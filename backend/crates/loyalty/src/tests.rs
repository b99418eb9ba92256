//! Use-case tests against an in-memory loyalty store

#[cfg(test)]
mod support {
    use kernel::context::CurrentUser;
    use kernel::id::UserId;
    use kernel::role::UserRole;

    pub use crate::memory::InMemoryLoyalty;

    pub fn user(id: UserId, role: UserRole) -> CurrentUser {
        CurrentUser {
            id,
            role,
            name: "Rahim".to_string(),
            email: None,
            phone: "01711111111".to_string(),
            username: None,
            must_change_password: false,
        }
    }
}

#[cfg(test)]
mod standing_tests {
    use std::sync::Arc;

    use kernel::id::UserId;
    use kernel::role::UserRole;

    use super::support::{InMemoryLoyalty, user};
    use crate::application::{BuildProfileUseCase, ResolveBadgeUseCase};

    #[tokio::test]
    async fn test_unknown_user_is_newbie_with_zero_points() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let standing = ResolveBadgeUseCase::new(repo).execute(&UserId::new()).await.unwrap();
        assert_eq!(standing.points, 0);
        assert_eq!(standing.badge.key, "NEWBIE");
        assert_eq!(standing.badge.discount_percent, 0);
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let id = repo.add_customer("Karim", 500);
        let standing = ResolveBadgeUseCase::new(repo).execute(&id).await.unwrap();
        assert_eq!(standing.badge.key, "REGULAR");
    }

    #[tokio::test]
    async fn test_profile_carries_badge_discount() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let id = repo.add_customer("Karim", 2500);
        let profile = BuildProfileUseCase::new(repo)
            .execute(&user(id, UserRole::Customer))
            .await
            .unwrap();

        assert_eq!(profile.points, 2500);
        assert_eq!(profile.badge.key, "LOYAL");
        assert_eq!(profile.discount_percent, 5);
        assert_eq!(profile.username, "01711111111");
    }
}

#[cfg(test)]
mod leaderboard_tests {
    use std::sync::Arc;

    use super::support::InMemoryLoyalty;
    use crate::application::{BadgeReportUseCase, LeaderboardUseCase};

    #[tokio::test]
    async fn test_leaderboard_ranks_by_points() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        repo.add_customer("Asha", 40);
        repo.add_customer("Babu", 900);
        repo.add_customer("Chandra", 300);

        let board = LeaderboardUseCase::new(repo).execute().await.unwrap();
        let names: Vec<_> = board.iter().map(|e| (e.rank, e.name.as_str())).collect();
        assert_eq!(names, vec![(1, "Babu"), (2, "Chandra"), (3, "Asha")]);
    }

    #[tokio::test]
    async fn test_leaderboard_is_capped() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        for i in 0..120 {
            repo.add_customer(&format!("c{i:03}"), i);
        }
        let board = LeaderboardUseCase::new(repo).execute().await.unwrap();
        assert_eq!(board.len(), 100);
        assert_eq!(board[0].points, 119);
    }

    #[tokio::test]
    async fn test_badge_report_counts_bands() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        for points in [0, 499, 500, 1499, 1500, 9000] {
            repo.add_customer("x", points);
        }

        let bands = BadgeReportUseCase::new(repo).execute().await.unwrap();
        let counts: Vec<_> = bands.iter().map(|b| (b.key.as_str(), b.count)).collect();
        assert_eq!(
            counts,
            vec![("NEWBIE", 2), ("REGULAR", 2), ("LOYAL", 2), ("VIP", 1)]
        );
    }
}

#[cfg(test)]
mod discount_tests {
    use std::sync::Arc;

    use audit::AuditAction;
    use audit::memory::InMemoryAuditLog;
    use kernel::id::UserId;
    use kernel::role::UserRole;

    use super::support::{InMemoryLoyalty, user};
    use crate::application::DiscountSettingsUseCase;
    use crate::domain::repository::DiscountUpdate;
    use crate::error::LoyaltyError;

    fn update(key: &str, discount_percent: i32) -> DiscountUpdate {
        DiscountUpdate {
            key: key.to_string(),
            discount_percent,
        }
    }

    #[tokio::test]
    async fn test_update_applies_and_audits() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = DiscountSettingsUseCase::new(repo.clone(), audit.clone());
        let admin = user(UserId::new(), UserRole::Admin);

        use_case
            .update(&admin, vec![update("REGULAR", 4), update("VIP", 15)])
            .await
            .unwrap();

        assert_eq!(repo.discount_of("REGULAR"), Some(4));
        assert_eq!(repo.discount_of("VIP"), Some(15));

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Update);
        assert_eq!(entries[0].entity_type, "badge_levels");
        assert_eq!(entries[0].entity_id, "discounts");
        assert_eq!(entries[0].actor_user_id, admin.id);
    }

    #[tokio::test]
    async fn test_out_of_range_percent_is_rejected_before_writing() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = DiscountSettingsUseCase::new(repo.clone(), audit.clone());

        let err = use_case
            .update(&user(UserId::new(), UserRole::Manager), vec![update("VIP", 101)])
            .await
            .unwrap_err();

        match err {
            LoyaltyError::App(e) => {
                assert_eq!(e.status_code(), 400);
                assert_eq!(e.message(), "Invalid discounts");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.discount_of("VIP"), Some(10));
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_key_fails_whole_batch() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let audit = Arc::new(InMemoryAuditLog::default());
        let use_case = DiscountSettingsUseCase::new(repo.clone(), audit.clone());

        let err = use_case
            .update(
                &user(UserId::new(), UserRole::Admin),
                vec![update("LOYAL", 8), update("PLATINUM", 20)],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LoyaltyError::UnknownBadge(ref k) if k == "PLATINUM"));
        assert_eq!(repo.discount_of("LOYAL"), Some(5));
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_sort_order() {
        let repo = Arc::new(InMemoryLoyalty::seeded());
        let use_case = DiscountSettingsUseCase::new(repo, Arc::new(InMemoryAuditLog::default()));
        let keys: Vec<_> = use_case.list().await.unwrap().into_iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["NEWBIE", "REGULAR", "LOYAL", "VIP"]);
    }
}
