mod trait_display;
mod trait_error;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub error: String,
}

impl ValidationError {
    pub(in crate::config) fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}
