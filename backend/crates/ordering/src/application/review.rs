//! Submit Review Use Case

use std::sync::Arc;

use kernel::context::CurrentUser;
use kernel::id::OrderId;
use kernel::role::UserRole;
use kernel::validation::Validator;

use crate::domain::repository::OrderRepository;
use crate::domain::review::{MAX_RATING, MIN_RATING, Review};
use crate::domain::status::OrderStatus;
use crate::error::{OrderError, OrderResult};

pub struct SubmitReviewUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitReviewUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        customer: &CurrentUser,
        order_id: &OrderId,
        rating: i32,
        comment: Option<String>,
    ) -> OrderResult<()> {
        let mut v = Validator::new();
        v.range("rating", rating.into(), MIN_RATING.into(), MAX_RATING.into());
        v.finish("Invalid review")?;

        let order = self
            .repo
            .find(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound)?;
        if customer.role != UserRole::Customer || order.customer_id != customer.id {
            return Err(kernel::AppError::forbidden("Forbidden").into());
        }
        if order.status != OrderStatus::Served {
            return Err(OrderError::NotServed);
        }
        if self.repo.review_exists(order_id).await? {
            return Err(OrderError::AlreadyReviewed);
        }

        let review = Review::new(order.id, customer.id, rating, comment.filter(|c| !c.trim().is_empty()));
        self.repo.insert_review(&review).await?;

        tracing::info!(order_id = %order.id, customer_id = %customer.id, rating, "Order reviewed");
        Ok(())
    }
}
