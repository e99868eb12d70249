use reqwest::Method;

use crate::{
    api::{ApiClient, Reply, endpoints::category},
    error::{Error, Result},
    models::{Category, Medicine, NewCategory, PageQuery},
};

#[derive(Clone)]
pub struct CategoryService {
    api: ApiClient,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: PageQuery) -> Result<Vec<Category>> {
        self.api
            .get_with_query::<Vec<Category>, _>(category::ALL, &page)
            .await?
            .into_data()
    }

    pub async fn medicines(&self, category_id: &str) -> Result<Vec<Medicine>> {
        self.api
            .get::<Vec<Medicine>>(&category::medicines(category_id))
            .await?
            .into_data()
    }

    pub async fn create(&self, new_category: &NewCategory) -> Result<Reply<Category>> {
        if new_category.name.trim().is_empty() {
            return Err(Error::Validation("Category name is required".to_string()));
        }

        self.api
            .send_json(Method::POST, category::CREATE, new_category)
            .await
    }
}
