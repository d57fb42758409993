//! Unified error codes for the checkout core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order / cart errors
//! - 5xxx: Payment errors
//! - 6xxx: Delivery errors
//! - 7xxx: Settings errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order group not found
    OrderGroupNotFound = 4002,
    /// Cart (or one merchant cart) has no items
    CartEmpty = 4003,
    /// Line item quantity is invalid
    InvalidQuantity = 4004,
    /// Monetary amount is invalid (negative / non-finite)
    InvalidAmount = 4005,
    /// Same restaurant appears in more than one merchant cart
    DuplicateMerchant = 4006,
    /// More merchants than `max_merchants_per_order`
    TooManyMerchants = 4007,
    /// Order status transition not allowed
    InvalidStatusTransition = 4008,

    // ==================== 5xxx: Payment ====================
    /// Payment method is unknown
    PaymentInvalidMethod = 5001,
    /// Payment method is disabled by settings
    PaymentMethodDisabled = 5002,

    // ==================== 6xxx: Delivery ====================
    /// Delivery address is required
    DeliveryAddressRequired = 6001,
    /// Contact name / phone is required
    ContactRequired = 6002,
    /// Coordinates out of range
    InvalidCoordinates = 6003,
    /// Delivery coordinates required by policy
    DeliveryCoordinatesRequired = 6004,

    // ==================== 7xxx: Settings ====================
    /// Rate settings are invalid
    SettingsInvalid = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderGroupNotFound => "Order group not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::InvalidQuantity => "Invalid item quantity",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::DuplicateMerchant => "Restaurant appears in more than one cart",
            ErrorCode::TooManyMerchants => "Too many restaurants in one checkout",
            ErrorCode::InvalidStatusTransition => "Order status transition not allowed",

            // Payment
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentMethodDisabled => "Payment method is disabled",

            // Delivery
            ErrorCode::DeliveryAddressRequired => "Delivery address is required",
            ErrorCode::ContactRequired => "Contact name and phone are required",
            ErrorCode::InvalidCoordinates => "Coordinates are out of range",
            ErrorCode::DeliveryCoordinatesRequired => "Delivery coordinates are required",

            // Settings
            ErrorCode::SettingsInvalid => "Rate settings are invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderGroupNotFound),
            4003 => Ok(ErrorCode::CartEmpty),
            4004 => Ok(ErrorCode::InvalidQuantity),
            4005 => Ok(ErrorCode::InvalidAmount),
            4006 => Ok(ErrorCode::DuplicateMerchant),
            4007 => Ok(ErrorCode::TooManyMerchants),
            4008 => Ok(ErrorCode::InvalidStatusTransition),

            // Payment
            5001 => Ok(ErrorCode::PaymentInvalidMethod),
            5002 => Ok(ErrorCode::PaymentMethodDisabled),

            // Delivery
            6001 => Ok(ErrorCode::DeliveryAddressRequired),
            6002 => Ok(ErrorCode::ContactRequired),
            6003 => Ok(ErrorCode::InvalidCoordinates),
            6004 => Ok(ErrorCode::DeliveryCoordinatesRequired),

            // Settings
            7001 => Ok(ErrorCode::SettingsInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
