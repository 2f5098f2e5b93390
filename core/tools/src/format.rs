//! Renders a [`ToolResult`] into the string the model actually sees.

use relay_protocol::ToolResult;

/// Successes render `content`, or a human-readable summary of `data` if
/// `content` is absent; errors render `"<error_type>: <message>"`.
pub fn format_tool_result(result: &ToolResult) -> String {
    if result.success {
        if let Some(content) = &result.content {
            return content.clone();
        }
        if let Some(data) = &result.data {
            return summarize_data(data);
        }
        return String::new();
    }

    let error_type = result
        .error_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "execution_error".to_string());
    let message = result.error.clone().unwrap_or_else(|| "tool call failed".to_string());
    format!("{error_type}: {message}")
}

fn summarize_data(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => format!("{} result(s)", items.len()),
        serde_json::Value::Object(map) => format!("{} field(s)", map.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "format.test.rs"]
mod tests;
