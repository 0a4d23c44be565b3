//! Ошибки конфигурации агентов
//!
//! Runtime ошибок у симуляции нет: отсутствующие опциональные зависимости
//! (animator, hitbox, visual root) просто пропускают эффект. Проверяется только
//! статический конфиг, который хост передаёт до активации агента.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Параметр обязан быть >= 0
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Нижняя граница больше верхней
    #[error("{field}: min ({min}) is greater than max ({max})")]
    InvertedBounds {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// Агент без здоровья сразу бы уничтожился
    #[error("starting health must be positive")]
    ZeroHealth,
}

/// Helper: проверить что значение не отрицательное (и не NaN)
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Helper: проверить порядок границ
pub(crate) fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedBounds { field, min, max })
    }
}
