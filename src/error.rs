// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Argumentos fuera de rango o mal formados (conteos negativos, fechas ilegibles...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// YAML de configuración o de registro que no se pudo parsear
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl CoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("rejected input: {msg}");
        CoreError::InvalidInput(msg)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Falla si `value` es negativo. `what` nombra el campo en el mensaje.
pub(crate) fn ensure_non_negative(what: &str, value: i64) -> CoreResult<i64> {
    if value < 0 {
        return Err(CoreError::invalid(format!("{what} must be >= 0, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_rejects_negatives() {
        assert_eq!(ensure_non_negative("xp", 0).unwrap(), 0);
        let err = ensure_non_negative("xp", -3).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.to_string().contains("xp must be >= 0"));
    }
}
