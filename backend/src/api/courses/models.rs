//! Response shapes for the catalog API.

use masterbis_domain::{can_access, Course, Material, MaterialType, User};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub is_free: bool,
    pub locked: bool,
    /// `None` while locked.
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl MaterialView {
    pub fn for_viewer(material: Material, viewer: Option<&User>) -> Self {
        let locked = !can_access(viewer, &material);
        Self {
            id: material.id,
            title: material.title,
            kind: material.kind,
            is_free: material.is_free,
            locked,
            url: (!locked).then_some(material.url),
            duration: material.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub thumbnail: String,
    pub video_count: usize,
    pub pdf_count: usize,
    pub quiz_count: usize,
    pub material_count: usize,
    pub materials: Vec<MaterialView>,
}

impl CourseView {
    pub fn for_viewer(course: Course, viewer: Option<&User>) -> Self {
        let video_count = course.count_of(MaterialType::Video);
        let pdf_count = course.count_of(MaterialType::Pdf);
        let quiz_count = course.count_of(MaterialType::Quiz);
        let material_count = course.materials.len();
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            instructor: course.instructor,
            thumbnail: course.thumbnail,
            video_count,
            pdf_count,
            quiz_count,
            material_count,
            materials: course
                .materials
                .into_iter()
                .map(|m| MaterialView::for_viewer(m, viewer))
                .collect(),
        }
    }
}
