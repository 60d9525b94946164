//! Course catalog reads, material gating and the admin material upload.

use std::sync::Arc;

use masterbis_domain::{
    can_access, CatalogStore, Course, Material, MaterialType, NewMaterial, StoreError, User,
};
use serde::Deserialize;

use crate::auth::AuthError;
use crate::errors::{AppError, AppResult};

/// Unvalidated admin input for a new material.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMaterial {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub duration: Option<String>,
}

impl AddMaterial {
    /// Title and type are required. The url may be empty, and a blank
    /// duration counts as absent.
    pub fn validate(self) -> AppResult<NewMaterial> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("material title is required"));
        }
        let kind = self
            .kind
            .parse::<MaterialType>()
            .map_err(AppError::Validation)?;
        let duration = self
            .duration
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewMaterial {
            title: title.to_string(),
            kind,
            url: self.url.trim().to_string(),
            duration,
        })
    }
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    pub async fn courses(&self) -> AppResult<Vec<Course>> {
        Ok(self.catalog.list_courses().await?)
    }

    pub async fn course(&self, course_id: &str) -> AppResult<Course> {
        Ok(self.catalog.get_course(course_id).await?)
    }

    /// Returns the material if `viewer` may open it.
    pub async fn open_material(
        &self,
        course_id: &str,
        material_id: &str,
        viewer: Option<&User>,
    ) -> AppResult<Material> {
        let course = self.catalog.get_course(course_id).await?;
        let material = course
            .material(material_id)
            .cloned()
            .ok_or_else(|| StoreError::MaterialNotFound {
                course_id: course_id.to_string(),
                material_id: material_id.to_string(),
            })?;

        if can_access(viewer, &material) {
            return Ok(material);
        }
        Err(match viewer {
            None => AuthError::MissingToken,
            Some(_) => AuthError::Forbidden("an active subscription is required for this material".into()),
        }
        .into())
    }

    pub async fn add_material(&self, course_id: &str, input: AddMaterial) -> AppResult<Material> {
        let material = input.validate()?;
        let material = self.catalog.append_material(course_id, material).await?;
        tracing::info!(
            course_id,
            material_id = %material.id,
            kind = %material.kind,
            "material added"
        );
        Ok(material)
    }
}
