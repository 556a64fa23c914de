use cloudability_config::Config;
use cloudability_provider::{DataSource, Provider, ResourceData};
use colored::Colorize;

pub struct VerifyOptions {
    pub vendor_account_id: String,
    pub vendor_key: String,
    pub retry_count: u32,
    pub retry_wait: u64,
}

pub async fn verify(config: &Config, options: VerifyOptions) -> anyhow::Result<()> {
    let provider = Provider::from_config(config)?;
    let source = provider.account();

    eprintln!(
        "{} {} ({})",
        "Verifying account".blue(),
        options.vendor_account_id.cyan(),
        options.vendor_key
    );

    let mut data = ResourceData::new()
        .with_attribute("vendor_account_id", options.vendor_account_id.as_str())
        .with_attribute("vendor_key", options.vendor_key.as_str())
        .with_attribute("retry_count", options.retry_count)
        .with_attribute("retry_wait", options.retry_wait);

    source.read(&mut data).await?;

    eprintln!("{} {}", "✓".green(), "Account verified".green());
    super::print_data(&data)
}
