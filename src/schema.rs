use rmcp::model::JsonObject;
use rmcp::schemars::{JsonSchema, generate::SchemaSettings, transform::AddNullable};
use std::sync::Arc;

/// Input schema for a tool's parameter struct.
///
/// Draft-07 with subschemas inlined rather than referenced through `$defs`, and
/// `Option` fields marked nullable. Some MCP clients render neither `$ref` nor
/// `anyOf` well.
pub fn tool_input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;
    settings.transforms = vec![Box::new(AddNullable::default())];

    let schema = settings.into_generator().into_root_schema_for::<T>();
    match schema.to_value() {
        serde_json::Value::Object(object) => Arc::new(object),
        other => unreachable!("root schema is always an object, got {}", other),
    }
}
