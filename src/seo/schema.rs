//! JSON-LD structured data.
//!
//! Schemas are built as `serde_json::Value` trees and serialized, never
//! string-templated, so escaping in titles and descriptions is handled by
//! the serializer. Three schemas:
//!
//! - **Organization** — every page.
//! - **LocalBusiness** — only the pages listed in `seo.local_business_pages`
//!   (typically home and contact), with the configured offer catalog.
//! - **BreadcrumbList** — every page except the home page (Home → page).

use crate::config::{PageMeta, SeoConfig, SiteInfo};
use maud::{PreEscaped, html};
use serde_json::{Value, json};

/// Render the `<script type="application/ld+json">` blocks for one page.
///
/// Returns an empty string when the site identity is too bare to describe
/// (no name and no domain).
pub fn structured_data_scripts(
    filename: &str,
    page: &PageMeta,
    site: &SiteInfo,
    seo: &SeoConfig,
) -> String {
    if site.name.is_empty() && site.domain.is_empty() {
        return String::new();
    }

    let mut schemas = vec![organization(site, seo)];
    if seo.local_business_pages.iter().any(|p| p == filename) {
        schemas.push(local_business(site, seo));
    }
    if filename != seo.home_page {
        schemas.push(breadcrumbs(page, site));
    }

    let scripts: Vec<String> = schemas
        .iter()
        .map(|schema| {
            let body = serde_json::to_string_pretty(schema).expect("schema serialization");
            html! {
                script type="application/ld+json" { (PreEscaped(body)) }
            }
            .into_string()
        })
        .collect();
    scripts.join("\n  ")
}

/// Organization schema, present on every page.
pub fn organization(site: &SiteInfo, seo: &SeoConfig) -> Value {
    let mut org = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.name,
        "url": site.domain,
        "description": site.description,
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "url": site.absolute_url(&seo.contact_page),
        },
    });
    if !site.logo.is_empty() {
        org["logo"] = json!(site.absolute_url(&site.logo));
    }
    if !site.social.is_empty() {
        org["sameAs"] = json!(site.social);
    }
    org
}

/// LocalBusiness schema with the configured offer catalog.
pub fn local_business(site: &SiteInfo, seo: &SeoConfig) -> Value {
    let mut business = json!({
        "@context": "https://schema.org",
        "@type": "LocalBusiness",
        "name": site.name,
        "url": site.domain,
        "description": site.description,
        "priceRange": seo.price_range,
    });
    if !site.logo.is_empty() {
        business["image"] = json!(site.absolute_url(&site.logo));
    }
    if !seo.services.is_empty() {
        let offers: Vec<Value> = seo
            .services
            .iter()
            .map(|service| {
                json!({
                    "@type": "Offer",
                    "itemOffered": {
                        "@type": "Service",
                        "name": service.name,
                        "description": service.description,
                    },
                })
            })
            .collect();
        business["hasOfferCatalog"] = json!({
            "@type": "OfferCatalog",
            "name": "Services",
            "itemListElement": offers,
        });
    }
    business
}

/// Two-level breadcrumb trail: Home → this page.
pub fn breadcrumbs(page: &PageMeta, site: &SiteInfo) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": "Home",
                "item": format!("{}/", site.domain),
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": page.short_title(),
                "item": page.canonical(site),
            },
        ],
    })
}
