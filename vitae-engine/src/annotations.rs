//! Annotation lifecycle through the engine. Every change is persisted;
//! nothing is ever deleted.

use tracing::info;
use vitae_core::annotation::{Annotation, AnnotationEdit};
use vitae_core::errors::{VitaeError, VitaeResult};
use vitae_core::traits::IAnnotationStorage;

use crate::RelevanceEngine;

impl RelevanceEngine {
    pub fn create_annotation(&self, annotation: &Annotation) -> VitaeResult<()> {
        self.storage.create_annotation(annotation)?;
        info!(id = %annotation.id, source = ?annotation.source, "annotation created");
        Ok(())
    }

    pub fn get_annotation(&self, id: &str) -> VitaeResult<Option<Annotation>> {
        self.storage.get_annotation(id)
    }

    pub fn list_active_annotations(&self) -> VitaeResult<Vec<Annotation>> {
        self.storage.list_active_annotations()
    }

    pub fn list_all_annotations(&self) -> VitaeResult<Vec<Annotation>> {
        self.storage.list_all_annotations()
    }

    pub fn approve_annotation(&self, id: &str) -> VitaeResult<Annotation> {
        self.mutate_annotation(id, Annotation::approve)
    }

    /// Reject and deactivate.
    pub fn reject_annotation(&self, id: &str) -> VitaeResult<Annotation> {
        self.mutate_annotation(id, Annotation::reject)
    }

    pub fn edit_annotation(&self, id: &str, edit: AnnotationEdit) -> VitaeResult<Annotation> {
        self.mutate_annotation(id, |a| a.edit(edit))
    }

    pub fn deactivate_annotation(&self, id: &str) -> VitaeResult<Annotation> {
        self.mutate_annotation(id, |a| {
            a.deactivate();
            Ok(())
        })
    }

    fn mutate_annotation(
        &self,
        id: &str,
        change: impl FnOnce(&mut Annotation) -> VitaeResult<()>,
    ) -> VitaeResult<Annotation> {
        let mut annotation = self
            .storage
            .get_annotation(id)?
            .ok_or_else(|| VitaeError::AnnotationNotFound { id: id.to_string() })?;
        change(&mut annotation)?;
        self.storage.update_annotation(&annotation)?;
        Ok(annotation)
    }
}
