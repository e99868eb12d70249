use reqwest::Method;
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::reviews},
    error::{Error, Result},
    models::NewReview,
};

pub fn validate_review(review: &NewReview) -> Result<()> {
    if !(1..=5).contains(&review.rating) {
        return Err(Error::Validation("Rating must be between 1 and 5".to_string()));
    }

    let length = review.comment.trim().chars().count();
    if length < 2 {
        return Err(Error::Validation("Comment is too short".to_string()));
    }
    if length > 500 {
        return Err(Error::Validation("Comment cannot exceed 500 characters".to_string()));
    }

    Ok(())
}

#[derive(Clone)]
pub struct ReviewService {
    api: ApiClient,
}

impl ReviewService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn post(&self, review: &NewReview) -> Result<Reply<Value>> {
        validate_review(review)?;

        self.api.send_json(Method::POST, reviews::POST, review).await
    }
}
