use std::path::Path;

fn static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Values of every `name="..."` attribute in `html`.
fn attribute_values<'a>(html: &'a str, name: &str) -> Vec<&'a str> {
    let needle = format!(" {name}=\"");
    html.match_indices(&needle)
        .filter_map(|(at, _)| {
            let rest = &html[at + needle.len()..];
            rest.find('"').map(|end| &rest[..end])
        })
        .collect()
}

#[test]
fn page_images_ship_with_the_site() {
    let html = std::fs::read_to_string(static_dir().join("index.html")).unwrap();
    let mut urls = attribute_values(&html, "src");
    urls.extend(attribute_values(&html, "data-src2"));
    assert!(urls.len() >= 2, "{urls:?}");
    for url in urls {
        assert!(static_dir().join(url).is_file(), "missing {url}");
    }
}

#[test]
fn page_has_the_elements_the_app_looks_up() {
    let html = std::fs::read_to_string(static_dir().join("index.html")).unwrap();
    assert!(html.contains("<canvas class=\"gl\">"));
    assert!(html.contains("<figure>"));
    assert!(html.contains("data-demo-index="));
    assert!(html.contains("./pkg/hover_fx.js"));
}
