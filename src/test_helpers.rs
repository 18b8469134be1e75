//! Shared test utilities.
//!
//! Synthetic image writers for backend/optimizer tests, plus a populated
//! config and sample page for the HTML passes — every table the SEO pass
//! reads comes from here, so tests exercise the transforms with data that
//! never ships in the binary.

use crate::config::{LinkRewrite, PageMeta, PathAlt, Service, SiteConfig};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::BufWriter;
use std::path::Path;

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, 64, (y % 256) as u8])
    });
    img.save(path).unwrap();
}

/// A fully-populated config for the HTML passes.
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();

    config.site.domain = "https://example.com".to_string();
    config.site.name = "Example Studio".to_string();
    config.site.description = "Photography and print services.".to_string();
    config.site.logo = "images/logo.png".to_string();
    config.site.favicon = "images/favicon.ico".to_string();
    config.site.social = vec![
        "https://www.instagram.com/studio/".to_string(),
        "https://www.instagram.com/studio-prints/".to_string(),
    ];

    config.head.stylesheets = vec!["css/style.css".to_string()];

    config.seo.pages.insert(
        "index.html".to_string(),
        PageMeta {
            title: "Example Studio | Photography & Print".to_string(),
            description: "Professional photography and print services.".to_string(),
            path: "/".to_string(),
            ..PageMeta::default()
        },
    );
    config.seo.pages.insert(
        "about.html".to_string(),
        PageMeta {
            title: "About | Example Studio".to_string(),
            description: "About the studio.".to_string(),
            path: "/about.html".to_string(),
            ..PageMeta::default()
        },
    );
    config.seo.pages.insert(
        "contact.html".to_string(),
        PageMeta {
            title: "Contact | Example Studio".to_string(),
            description: "Get in touch.".to_string(),
            path: "/contact.html".to_string(),
            ..PageMeta::default()
        },
    );

    config.seo.services = vec![
        Service {
            name: "Photography".to_string(),
            description: "Portrait and event photography.".to_string(),
        },
        Service {
            name: "Printing".to_string(),
            description: "Custom apparel printing.".to_string(),
        },
    ];
    config.seo.link_rewrites = vec![LinkRewrite {
        from: "https://www.facebook.com/template-account/".to_string(),
        to: "https://www.instagram.com/studio/".to_string(),
        label: "Instagram".to_string(),
    }];
    config.seo.remove_scripts = vec!["maps.googleapis.com".to_string()];

    config.alt_text.files.insert(
        "logo.png".to_string(),
        "Studio logo".to_string(),
    );
    config.alt_text.paths = vec![PathAlt {
        contains: "gallery/".to_string(),
        alt: "Example Studio gallery".to_string(),
    }];
    config.alt_text.fallback = "Example Studio image".to_string();

    config
}

/// A page the way the site template left it: stale head, missing alt text,
/// viewport-unit dimensions, template footer links, unused widget script.
pub fn sample_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Stale title</title>
  <meta name="description" content="stale description">
  <meta name="generator" content="SomeBuilder 3.1">
  <link rel="stylesheet" href="css/old.css">
</head>
<body>
  <section class="single-page-header">
    <div class="container"><h2>About Us</h2></div>
  </section>
  <img src="images/logo.png" alt="" width = "250vw" height = "75vh">
  <img src="images/gallery/one.jpg">
  <footer>
    <a href="https://www.facebook.com/template-account/">Facebook</a>
  </footer>
  <script src="https://maps.googleapis.com/maps/api/js?key=abc"></script>
</body>
</html>
"#
    .to_string()
}
