use async_trait::async_trait;
use serde::Serialize;

use super::CommandHandler;
use crate::cli::app::{CatalogQuery, OutputFormat};
use crate::config::ProviderConfig;
use crate::providers::{CatalogProvider, MockProvider};
use crate::wizard::{Country, Plan};
use crate::Result;

/// Handler for the `catalog` command
pub struct CatalogCommand {
    pub providers: ProviderConfig,
    pub query: CatalogQuery,
    pub format: OutputFormat,
}

/// Whatever the query returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogListing {
    Countries(Vec<Country>),
    Plans(Vec<Plan>),
    Numbers(Vec<String>),
}

impl CatalogCommand {
    pub fn new(providers: ProviderConfig, query: CatalogQuery, format: OutputFormat) -> Self {
        Self {
            providers,
            query,
            format,
        }
    }

    pub async fn fetch(&self, provider: &dyn CatalogProvider) -> Result<CatalogListing> {
        let listing = match &self.query {
            CatalogQuery::Countries => CatalogListing::Countries(provider.fetch_countries().await?),
            CatalogQuery::Plans => CatalogListing::Plans(provider.fetch_plans().await?),
            CatalogQuery::Numbers { country } => CatalogListing::Numbers(
                provider
                    .fetch_numbers_by_country(&country.to_uppercase())
                    .await?,
            ),
        };
        Ok(listing)
    }
}

#[async_trait]
impl CommandHandler for CatalogCommand {
    async fn execute(&self) -> Result<()> {
        let provider = MockProvider::new(self.providers.clone());
        let listing = self.fetch(&provider).await?;
        match self.format {
            OutputFormat::Text => print!("{}", render_text(&listing)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}

pub fn render_text(listing: &CatalogListing) -> String {
    let lines: Vec<String> = match listing {
        CatalogListing::Countries(countries) => countries
            .iter()
            .map(|c| format!("{:<4}{}", c.code, c.name))
            .collect(),
        CatalogListing::Plans(plans) => plans
            .iter()
            .map(|p| {
                format!(
                    "{:<9}{:<9}{:>6}/mo  {}",
                    p.id,
                    p.name,
                    p.price.to_string(),
                    p.features.join(", ")
                )
            })
            .collect(),
        CatalogListing::Numbers(numbers) => numbers.clone(),
    };
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn numbers_query_uppercases_the_code() {
        let command = CatalogCommand::new(
            ProviderConfig::instant(),
            CatalogQuery::Numbers {
                country: "nl".into(),
            },
            OutputFormat::Text,
        );
        let provider = MockProvider::new(ProviderConfig::instant());
        let CatalogListing::Numbers(numbers) = command.fetch(&provider).await.unwrap() else {
            panic!("expected numbers");
        };
        assert_eq!(numbers.len(), 8);
        assert!(numbers.iter().all(|n| n.starts_with("+31 ")));
    }

    #[test]
    fn plans_render_one_per_line() {
        let text = render_text(&CatalogListing::Plans(crate::providers::catalog::plans()));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Pro"));
        assert!(text.contains("$12/mo"));
    }
}
