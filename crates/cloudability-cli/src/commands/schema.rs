use clap::ValueEnum;
use cloudability_provider::{account, linked_account};

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemaKind {
    Resource,
    DataSource,
}

pub fn handle(kind: Option<SchemaKind>) -> anyhow::Result<()> {
    let output = match kind {
        Some(SchemaKind::Resource) => serde_json::json!({ "resources": [linked_account::schema()] }),
        Some(SchemaKind::DataSource) => serde_json::json!({ "data_sources": [account::schema()] }),
        None => serde_json::json!({
            "resources": [linked_account::schema()],
            "data_sources": [account::schema()],
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
