use crate::core::category::CategoryResolver;
use crate::domain::model::{CatalogRow, CategoryMapping, DomainRecord};

/// Builds the categorized catalog, sorted by `(category, domain, service_name)`.
pub fn build_catalog(sites: &[DomainRecord], mapping: &CategoryMapping) -> Vec<CatalogRow> {
    let resolver = CategoryResolver::new(mapping);

    let mut rows: Vec<CatalogRow> = sites
        .iter()
        .map(|site| {
            let resolution = resolver.resolve(
                &site.domain,
                &site.sample_subject,
                Some(site.sample_list_id.as_str()),
            );
            CatalogRow {
                domain: site.domain.clone(),
                count: site.count,
                sample_from: site.sample_from.clone(),
                sample_subject: site.sample_subject.clone(),
                service_name: guess_service_name(&site.domain),
                category: resolution.category,
                source: resolution.source,
                notes: String::new(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.domain.cmp(&b.domain))
            .then_with(|| a.service_name.cmp(&b.service_name))
    });
    rows
}

/// Display name guess from the leftmost domain label.
///
/// `my-cool_app.io` becomes `My Cool App`.
pub fn guess_service_name(domain: &str) -> String {
    if domain.is_empty() {
        return String::new();
    }

    let host = domain.split('.').next().unwrap_or_default();
    let host = host.replace(['_', '-'], " ");
    let parts: Vec<String> = host.split_whitespace().map(capitalize).collect();
    if parts.is_empty() {
        return capitalize(domain);
    }
    parts.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CategorySource;

    fn site(domain: &str, count: u64, subject: &str, list_id: &str) -> DomainRecord {
        DomainRecord {
            domain: domain.to_string(),
            count,
            sample_from: format!("noreply@{}", domain),
            sample_subject: subject.to_string(),
            sample_list_id: list_id.to_string(),
        }
    }

    #[test]
    fn test_guess_service_name() {
        assert_eq!(guess_service_name("github.com"), "Github");
        assert_eq!(guess_service_name("my-cool_app.io"), "My Cool App");
        assert_eq!(guess_service_name("AMAZON.co.jp"), "Amazon");
        assert_eq!(guess_service_name(""), "");
        assert_eq!(guess_service_name("-_.com"), "-_.com");
    }

    #[test]
    fn test_github_without_mapping_is_unknown() {
        let sites = vec![site("github.com", 3, "Please verify your email", "")];
        let catalog = build_catalog(&sites, &CategoryMapping::default());

        assert_eq!(catalog.len(), 1);
        let row = &catalog[0];
        assert_eq!(row.service_name, "Github");
        assert_eq!(row.category, "unknown");
        assert_eq!(row.source, CategorySource::Unknown);
        assert_eq!(row.count, 3);
        assert_eq!(row.notes, "");
    }

    #[test]
    fn test_list_id_marks_newsletter() {
        let sites = vec![site("example.com", 1, "Your invoice", "<list.example.com>")];
        let catalog = build_catalog(&sites, &CategoryMapping::default());
        assert_eq!(catalog[0].category, "newsletter");
        assert_eq!(catalog[0].source, CategorySource::Rule);
    }

    #[test]
    fn test_sorted_by_category_then_domain() {
        let mapping = CategoryMapping::from_entries(vec![("zeta.com", "developer")]);
        let sites = vec![
            site("shop.jp", 5, "ご注文の確認", ""),
            site("news.io", 2, "Monthly newsletter", ""),
            site("zeta.com", 1, "Welcome", ""),
            site("alpha.com", 9, "Welcome", ""),
            site("beta.com", 4, "Receipt", ""),
        ];

        let catalog = build_catalog(&sites, &mapping);
        let order: Vec<(&str, &str)> = catalog
            .iter()
            .map(|r| (r.category.as_str(), r.domain.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("developer", "zeta.com"),
                ("newsletter", "news.io"),
                ("transaction", "beta.com"),
                ("transaction", "shop.jp"),
                ("unknown", "alpha.com"),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_catalog() {
        assert!(build_catalog(&[], &CategoryMapping::default()).is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let sites = vec![
            site("b.com", 1, "Welcome", ""),
            site("a.com", 1, "Welcome", ""),
        ];
        let mapping = CategoryMapping::default();
        assert_eq!(build_catalog(&sites, &mapping), build_catalog(&sites, &mapping));
    }
}
