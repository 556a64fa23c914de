pub mod account;
pub mod linked_account;
pub mod schema;

use cloudability_provider::ResourceData;

/// Attributes go to stdout as JSON; everything else is written to stderr
pub(crate) fn print_data(data: &ResourceData) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
