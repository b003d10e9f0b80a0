use super::ValidationError;

impl std::error::Error for ValidationError {}
