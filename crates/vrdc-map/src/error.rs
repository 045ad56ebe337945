#![deny(unsafe_code)]

use vrdc_catalog::CatalogError;
use vrdc_model::{BenefitSetting, IdentifierLevel, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("setting '{setting}' has no {level} field for the non-nullable {column} column")]
    MissingRequiredLevel {
        setting: BenefitSetting,
        level: IdentifierLevel,
        column: &'static str,
    },
}

impl From<ModelError> for MapError {
    fn from(error: ModelError) -> Self {
        MapError::Catalog(CatalogError::Model(error))
    }
}

impl MapError {
    pub fn is_unknown_setting(&self) -> bool {
        matches!(self, MapError::Catalog(error) if error.is_unknown_setting())
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
