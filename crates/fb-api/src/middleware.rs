//! Standard middleware for the flatboard server.

use actix_web::middleware::Logger;

/// Request logging in the common format:
/// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}
