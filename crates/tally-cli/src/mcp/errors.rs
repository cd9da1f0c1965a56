//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use tally_core::TallyError;

/// Converts a tracker error into an MCP error, keeping the distinction
/// between missing records, bad input and internal failures.
pub fn to_mcp_error(message: &str, error: &TallyError) -> ErrorData {
    let message = format!("{message}: {error}");
    if error.is_not_found() {
        ErrorData::resource_not_found(message, None)
    } else if error.is_user_error() {
        ErrorData::invalid_params(message, None)
    } else {
        ErrorData::internal_error(message, None)
    }
}
