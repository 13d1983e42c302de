use clap::Args;

use crate::core::catalog::CatalogClient;
use crate::error::Result;
use crate::services::SimpleServices;
use crate::ui::Output;

#[derive(Args)]
pub struct AboutArgs {
    /// UUID of the extension
    #[arg(value_name = "UUID")]
    uuid: String,
}

pub async fn describe(catalog: &CatalogClient, uuid: &str, extensions_home: &str, output: Output) -> Result<String> {
    let extension = catalog.lookup(uuid).await?;
    Ok(output.about(&extension, extensions_home))
}

pub async fn execute(args: AboutArgs, services: &SimpleServices) -> Result<()> {
    let catalog = services.create_catalog_client().await?;
    let config = services.config();

    let text = describe(&catalog, &args.uuid, &config.extensions_home, Output::detect()).await?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::ShellVersion;
    use crate::core::test_support::{extension, page, MockCatalog};
    use crate::error::{CatalogError, GnomexError};

    fn catalog(mock: MockCatalog) -> CatalogClient {
        CatalogClient::new(Box::new(mock), ShellVersion::parse("3.36").unwrap())
    }

    #[tokio::test]
    async fn test_describe_includes_link_and_description() {
        let mock = MockCatalog::new(vec![page(1, vec![extension("a@x", "Alpha")])]);

        let text = describe(&catalog(mock), "a@x", "https://extensions.gnome.org", Output::plain())
            .await
            .unwrap();

        assert!(text.starts_with("Alpha (a@x) by tester"));
        assert!(text.contains("https://extensions.gnome.org/extension/1/alpha/"));
        assert!(text.ends_with("Alpha description"));
    }

    #[tokio::test]
    async fn test_describe_unknown_uuid() {
        let mock = MockCatalog::new(vec![page(1, vec![extension("a@x", "Alpha")])]);

        let err = describe(&catalog(mock), "b@x", "https://extensions.gnome.org", Output::plain())
            .await
            .unwrap_err();

        assert!(matches!(err, GnomexError::Catalog(CatalogError::NotFound { .. })));
    }
}
