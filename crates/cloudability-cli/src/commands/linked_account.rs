use cloudability_config::Config;
use cloudability_provider::{Provider, Resource, ResourceData};
use colored::Colorize;

fn input(vendor_key: &str, vendor_account_id: &str) -> ResourceData {
    ResourceData::new()
        .with_attribute("vendor_key", vendor_key)
        .with_attribute("vendor_account_id", vendor_account_id)
}

pub async fn create(
    config: &Config,
    vendor_key: &str,
    vendor_account_id: &str,
    kind: &str,
) -> anyhow::Result<()> {
    let resource = Provider::from_config(config)?.linked_account();

    eprintln!(
        "{} {} ({}, {})",
        "Linking account".blue(),
        vendor_account_id.cyan(),
        vendor_key,
        kind
    );

    let mut data = input(vendor_key, vendor_account_id).with_attribute("type", kind);
    resource.create(&mut data).await?;

    eprintln!("{} {}", "✓".green(), "Account linked".green());
    super::print_data(&data)
}

pub async fn read(config: &Config, vendor_key: &str, vendor_account_id: &str) -> anyhow::Result<()> {
    let resource = Provider::from_config(config)?.linked_account();

    let mut data = input(vendor_key, vendor_account_id);
    resource.read(&mut data).await?;

    if !data.exists() {
        anyhow::bail!(
            "Linked account '{}/{}' not found",
            vendor_key,
            vendor_account_id
        );
    }
    super::print_data(&data)
}

pub async fn delete(
    config: &Config,
    vendor_key: &str,
    vendor_account_id: &str,
) -> anyhow::Result<()> {
    let resource = Provider::from_config(config)?.linked_account();

    let mut data = input(vendor_key, vendor_account_id);
    resource.delete(&mut data).await?;

    eprintln!(
        "{} {} {}",
        "✓".green(),
        "Account unlinked:".green(),
        vendor_account_id.cyan()
    );
    Ok(())
}

pub async fn import(config: &Config, import_id: &str) -> anyhow::Result<()> {
    let resource = Provider::from_config(config)?.linked_account();

    let data = resource.import(import_id).await?;

    eprintln!("{} {} {}", "✓".green(), "Imported".green(), import_id.cyan());
    super::print_data(&data)
}
