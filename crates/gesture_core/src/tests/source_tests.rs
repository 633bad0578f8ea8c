use super::*;

fn vault() -> VaultIndex {
    VaultIndex::new("app://vault/").with_files([
        "banner.png",
        "images/beach.jpg",
        "travel/beach.jpg",
        "travel/trip.md",
        "photos/lake.jpg",
    ])
}

#[test]
fn embed_link_resolves_by_exact_path() {
    assert_eq!(
        vault().resolve("![[images/beach.jpg]]", "notes/a.md"),
        "app://vault/images/beach.jpg"
    );
}

#[test]
fn embed_link_resolves_by_file_name() {
    assert_eq!(
        vault().resolve("![[lake.jpg]]", "notes/a.md"),
        "app://vault/photos/lake.jpg"
    );
}

#[test]
fn embed_link_prefers_context_folder() {
    assert_eq!(
        vault().resolve("![[beach.jpg]]", "travel/trip.md"),
        "app://vault/travel/beach.jpg"
    );
    assert_eq!(
        vault().resolve("![[beach.jpg]]", "notes/a.md"),
        "app://vault/images/beach.jpg"
    );
}

#[test]
fn embed_link_drops_alias() {
    assert_eq!(
        vault().resolve("![[banner.png|cover]]", "notes/a.md"),
        "app://vault/banner.png"
    );
}

#[test]
fn vault_paths_resolve_relative_or_absolute() {
    assert_eq!(
        vault().resolve("photos/lake.jpg", "notes/a.md"),
        "app://vault/photos/lake.jpg"
    );
    assert_eq!(
        vault().resolve("/photos/lake.jpg", "notes/a.md"),
        "app://vault/photos/lake.jpg"
    );
}

#[test]
fn unknown_sources_pass_through() {
    let url = "https://example.com/header.png";
    assert_eq!(vault().resolve(url, "notes/a.md"), url);
    assert_eq!(
        vault().resolve("![[missing.png]]", "notes/a.md"),
        "![[missing.png]]"
    );
    assert_eq!(vault().resolve("![[]]", "notes/a.md"), "![[]]");
}

#[test]
fn link_text_is_between_delimiters() {
    assert_eq!(embed_link_text("![[a/b.png]]"), Some("a/b.png"));
    assert_eq!(embed_link_text("[[a.png]]"), None);
    assert_eq!(embed_link_text("![[a.png]"), None);
}
