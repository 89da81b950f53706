use reqwest::Client;
use serde_json::Value;

/// Parse `--args` into an argument object.
pub fn parse_arguments(raw: Option<&str>) -> anyhow::Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Object(serde_json::Map::new()));
    };
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        anyhow::bail!("--args must be a JSON object, got: {raw}");
    }
    Ok(value)
}

/// Pretty-print the `result` content of a successful call response.
pub fn render_result(body: &Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&body["result"])?)
}

/// Call a tool and print the result.
pub async fn run(hermes_url: &str, name: &str, arguments: Value) -> anyhow::Result<()> {
    let client = Client::new();

    tracing::debug!("Calling tool '{name}'");
    let resp = client
        .post(format!("{hermes_url}/mcp/tools/call"))
        .json(&serde_json::json!({
            "name": name,
            "arguments": arguments,
        }))
        .send()
        .await?;

    let status = resp.status();
    let body: Value = resp.json().await?;

    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("unknown error");
        anyhow::bail!("Tool call failed ({status}): {message}");
    }

    println!("{}", render_result(&body)?);
    Ok(())
}
