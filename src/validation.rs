use crate::error::AppError;
use crate::models::{ClassInstance, YogaClass};

pub fn validate_record_id(kind: &str, id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        Err(AppError::Validation(format!("{kind} id must not be empty")))
    } else {
        Ok(())
    }
}

pub fn validate_yoga_classes(classes: &[YogaClass]) -> Result<(), AppError> {
    for (index, class) in classes.iter().enumerate() {
        validate_record_id(&format!("yogaClasses[{index}]"), &class.id)?;
    }
    Ok(())
}

pub fn validate_class_instances(instances: &[ClassInstance]) -> Result<(), AppError> {
    for (index, instance) in instances.iter().enumerate() {
        validate_record_id(&format!("classInstances[{index}]"), &instance.id)?;
    }
    Ok(())
}

pub fn require_class_ids(class_ids: Option<Vec<String>>) -> Result<Vec<String>, AppError> {
    class_ids.ok_or_else(|| AppError::Validation("classIds must be an array".into()))
}
