//! # Resolution Errors
//!
//! None of these are retryable: the caller has to change its input.

use thiserror::Error;

/// Result type for resolution
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Result type for isolation checks
pub type IsolationResult<T> = Result<T, IsolationError>;

/// Invalid resolution input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Context carries no partner id
    #[error("Partner ID required")]
    PartnerIdRequired,
}

impl ResolutionError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ResolutionError::PartnerIdRequired => "DASH_VALIDATION_PARTNER_REQUIRED",
        }
    }

    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Two contexts crossed a security boundary.
///
/// Always a caller-side bug. The ids are kept for diagnostics but are not
/// part of the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolationError {
    /// Contexts belong to different partners
    #[error("Cross-partner context access is not allowed")]
    CrossPartner { left: String, right: String },

    /// Contexts belong to different tenants of the same partner
    #[error("Cross-tenant context access is not allowed")]
    CrossTenant { left: String, right: String },
}

impl IsolationError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IsolationError::CrossPartner { .. } => "DASH_ISOLATION_CROSS_PARTNER",
            IsolationError::CrossTenant { .. } => "DASH_ISOLATION_CROSS_TENANT",
        }
    }

    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_leak_ids() {
        let err = IsolationError::CrossTenant {
            left: "tenant-a".to_string(),
            right: "tenant-b".to_string(),
        };
        assert_eq!(err.to_string(), "Cross-tenant context access is not allowed");
        assert!(!err.to_string().contains("tenant-a"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(ResolutionError::PartnerIdRequired.code(), "DASH_VALIDATION_PARTNER_REQUIRED");
        assert_eq!(ResolutionError::PartnerIdRequired.to_string(), "Partner ID required");
        assert!(!ResolutionError::PartnerIdRequired.is_retryable());
    }
}
