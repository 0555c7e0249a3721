// [libs/core/model/src/errors.rs]
use thiserror::Error;

/// Errores de validación del modelo de datos compartido (`Value`, claves).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// La clave excede el límite de 512 bytes fijado por el protocolo.
    #[error("key too long: {0} bytes (max 512)")]
    KeyTooLong(usize),

    /// La clave está vacía; el protocolo exige claves no vacías.
    #[error("key must not be empty")]
    EmptyKey,
}
