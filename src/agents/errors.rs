//! Error classification and user-facing translation for agent failures.

use std::fmt;

/// Message fragments that mark a failure as non-transient
const FATAL_PATTERNS: [&str; 4] = [
    "unauthorized",
    "forbidden",
    "invalid api key",
    "quota exceeded",
];

/// Message fragments that mark a failure as explicitly transient
const TRANSIENT_PATTERNS: [&str; 5] = [
    "timeout",
    "rate limit",
    "connection",
    "network",
    "empty response",
];

const MSG_BUSY: &str =
    "El servicio está temporalmente ocupado. Por favor, intenta de nuevo en unos minutos.";
const MSG_CONFIGURATION: &str =
    "Hay un problema de configuración del servicio. Por favor, contacta al administrador.";
const MSG_SLOW_CONNECTION: &str =
    "La conexión está lenta en este momento. Por favor, intenta de nuevo.";
const MSG_REPHRASE: &str =
    "No pude procesar completamente tu solicitud. ¿Podrías reformularla?";
const MSG_GENERIC: &str =
    "Ocurrió un error inesperado. Por favor, intenta de nuevo o contacta a soporte.";

/// Retry class of an error, decided from its message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Credentials or quota; retrying cannot fix it
    Fatal,
    /// Network blips, timeouts, rate limits, empty responses
    Transient,
    /// Nothing recognizable; treated as retryable
    Unknown,
}

impl ErrorClass {
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Fatal)
    }
}

/// Classifies an error message. Fatal patterns win over transient ones.
pub fn classify_error(message: &str) -> ErrorClass {
    let message = message.to_lowercase();

    if FATAL_PATTERNS.iter().any(|p| message.contains(p)) {
        ErrorClass::Fatal
    } else if TRANSIENT_PATTERNS.iter().any(|p| message.contains(p)) {
        ErrorClass::Transient
    } else {
        ErrorClass::Unknown
    }
}

/// Maps a low-level error to a Spanish message safe to show end users.
///
/// `_context` is accepted for symmetry with the retry API and is not part of
/// the message.
pub fn generate_user_friendly_error(
    error: &(impl fmt::Display + ?Sized),
    _context: &str,
) -> String {
    let message = error.to_string().to_lowercase();

    let friendly = if message.contains("quota exceeded") || message.contains("rate limit") {
        MSG_BUSY
    } else if message.contains("unauthorized") || message.contains("invalid api key") {
        MSG_CONFIGURATION
    } else if message.contains("timeout") || message.contains("connection") {
        MSG_SLOW_CONNECTION
    } else if message.contains("empty response") {
        MSG_REPHRASE
    } else {
        MSG_GENERIC
    };

    friendly.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_classify_error() {
        assert_eq!(classify_error("401 Unauthorized"), ErrorClass::Fatal);
        assert_eq!(classify_error("Invalid API key provided"), ErrorClass::Fatal);
        assert_eq!(classify_error("Request timeout"), ErrorClass::Transient);
        assert_eq!(classify_error("NETWORK unreachable"), ErrorClass::Transient);
        assert_eq!(classify_error("something odd"), ErrorClass::Unknown);
        // fatal wins when both appear
        assert_eq!(classify_error("quota exceeded after timeout"), ErrorClass::Fatal);
    }

    #[test]
    fn test_friendly_error_priority() {
        let cases = [
            ("Rate limit reached", MSG_BUSY),
            ("Quota exceeded for model", MSG_BUSY),
            ("Unauthorized", MSG_CONFIGURATION),
            ("Invalid API key", MSG_CONFIGURATION),
            ("Connection reset by peer", MSG_SLOW_CONNECTION),
            ("upstream timeout", MSG_SLOW_CONNECTION),
            ("Empty response from chat after 3 attempts", MSG_REPHRASE),
            ("boom", MSG_GENERIC),
            // rate limit outranks timeout
            ("rate limit timeout", MSG_BUSY),
        ];

        for (raw, expected) in cases {
            assert_eq!(generate_user_friendly_error(raw, "chat"), expected, "input: {raw}");
        }
    }

    #[test]
    fn test_friendly_error_ignores_context() {
        let err = Error::Provider("boom".to_string());
        let message = generate_user_friendly_error(&err, "whatsapp-webhook");
        assert_eq!(message, MSG_GENERIC);
        assert!(!message.contains("whatsapp-webhook"));
    }

    #[test]
    fn test_friendly_error_for_empty_response_variant() {
        let err = Error::EmptyResponse {
            context: "chat".to_string(),
            attempts: 2,
        };
        assert_eq!(generate_user_friendly_error(&err, "chat"), MSG_REPHRASE);
    }
}
