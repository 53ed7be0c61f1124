use crate::domain::{
    common::RawRecord,
    entities::Entity,
    error::DomainError,
    value_objects::EntityId,
};

/// Centralized write-boundary validation.
///
/// Entities own their invariants (`Entity::validate`); this type decides
/// what shape a draft or a patch is checked in before it reaches the remote.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate a record about to be created and return its canonical preview.
    pub fn validate_draft<T: Entity>(draft: &RawRecord) -> Result<T, DomainError> {
        let entity = T::normalize_draft(draft);
        entity.validate()?;
        Ok(entity)
    }

    /// Validate a partial update as merged over the currently cached entity.
    ///
    /// Without a cached entity only the patch itself is checked.
    pub fn validate_patch<T: Entity>(
        id: &EntityId,
        current: Option<&T>,
        patch: &RawRecord,
    ) -> Result<T, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidField {
                field: "patch".into(),
                reason: "no fields to update".into(),
            });
        }
        if let Some(patched_id) = patch.get("id") {
            let same = match patched_id {
                serde_json::Value::String(s) => s == id.as_str(),
                serde_json::Value::Number(n) => n.to_string() == id.as_str(),
                _ => false,
            };
            if !same {
                return Err(DomainError::InvalidField {
                    field: "id".into(),
                    reason: "identity cannot be changed by an update".into(),
                });
            }
        }

        let mut merged = current.map(Entity::to_record).unwrap_or_default();
        merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.insert("id".into(), serde_json::Value::String(id.to_string()));

        let entity = T::normalize_draft(&merged);
        entity.validate()?;
        Ok(entity)
    }
}
