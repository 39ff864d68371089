use std::sync::Arc;

use tracing::{info, instrument};

use models::company::{self, CompanyChanges, NewCompany};

use crate::company::domain::{CreateCompanyInput, UpdateCompanyInput};
use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

/// Application service for companies: validation first, then one repository call.
#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<company::Summary>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, code: &str) -> Result<company::Detail, ServiceError> {
        self.repo
            .get(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Can't find company with code of {code}")))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateCompanyInput) -> Result<company::Model, ServiceError> {
        let new = NewCompany::validate(
            input.code.as_deref(),
            input.name.as_deref(),
            input.description.as_deref(),
        )?;
        let created = self.repo.create(new).await?;
        info!(code = %created.code, "created company");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, code: &str, input: UpdateCompanyInput) -> Result<company::Model, ServiceError> {
        let changes = CompanyChanges::validate(input.name.as_deref(), input.description.as_deref())?;
        let updated = self
            .repo
            .update(code, changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cannot find a company with a code of {code}")))?;
        info!(code = %updated.code, "updated company");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<(), ServiceError> {
        if !self.repo.delete(code).await? {
            return Err(ServiceError::NotFound(format!("Cannot find a company with a code of {code}")));
        }
        info!(code, "deleted company");
        Ok(())
    }
}
