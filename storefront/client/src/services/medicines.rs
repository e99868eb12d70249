use reqwest::Method;

use crate::{
    api::{ApiClient, Reply, endpoints::medicines},
    error::{Error, Result},
    models::{Medicine, MedicinePage, MedicineQuery, NewMedicine},
};

pub fn validate_new_medicine(medicine: &NewMedicine) -> Result<()> {
    super::seller::validate_listing(
        &medicine.name,
        &medicine.description,
        medicine.price,
        &medicine.manufacturer,
    )?;

    if medicine.category_id.trim().is_empty() {
        return Err(Error::Validation("Category is required".to_string()));
    }

    Ok(())
}

#[derive(Clone)]
pub struct MedicineService {
    api: ApiClient,
}

impl MedicineService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &MedicineQuery) -> Result<MedicinePage> {
        self.api
            .get_with_query::<MedicinePage, _>(medicines::ALL, query)
            .await?
            .into_data()
    }

    pub async fn featured(&self) -> Result<Vec<Medicine>> {
        self.api
            .get::<Vec<Medicine>>(medicines::FEATURED)
            .await?
            .into_data()
    }

    pub async fn popular(&self) -> Result<Vec<Medicine>> {
        self.api
            .get::<Vec<Medicine>>(medicines::POPULAR)
            .await?
            .into_data()
    }

    pub async fn by_id(&self, id: &str) -> Result<Medicine> {
        self.api
            .get::<Medicine>(&medicines::by_id(id))
            .await?
            .into_data()
    }

    pub async fn create(&self, medicine: &NewMedicine) -> Result<Reply<Medicine>> {
        validate_new_medicine(medicine)?;

        self.api
            .send_json(Method::POST, medicines::CREATE, medicine)
            .await
    }
}
