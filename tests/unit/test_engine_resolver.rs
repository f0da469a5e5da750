use chirpy::core::engines::{register_builtins, CSS_LINT, CSS_MINIFY, LESS_IMPORTS};
use chirpy::core::{
    ConfiguredExtensions, Engine, EngineError, EngineMetadata, EngineRegistry, EngineResolver,
    EngineResult, EngineSource, ExtensionResolver,
};
use std::sync::Arc;

struct Silent;

impl Engine for Silent {
    fn process(&self, _contents: &str, _filename: &str) -> Result<Vec<EngineResult>, EngineError> {
        Ok(Vec::new())
    }
}

/// Extension table used by the web tooling scenarios below.
struct WebExtensions;

impl ExtensionResolver for WebExtensions {
    fn extension_for_category(&self, category: &str) -> String {
        match category {
            "less" => ".less".to_string(),
            "css" => ".css".to_string(),
            dotted if dotted.contains('.') => dotted.to_string(),
            _ => String::new(),
        }
    }
}

fn resolver_with(engines: &[(&str, &str, bool)]) -> EngineResolver {
    let mut builder = EngineRegistry::builder();
    for (name, category, minifier) in engines {
        builder.register(
            EngineMetadata::new(*name, *category)
                .with_internal(true)
                .with_minifier(*minifier),
            Silent,
        );
    }
    EngineResolver::new(builder.build(), Arc::new(WebExtensions))
}

fn names(resolver: &EngineResolver, filename: &str) -> Option<String> {
    resolver
        .resolve_by_filename(filename)
        .map(|container| container.name().to_string())
}

#[test]
fn repeated_lookups_return_the_same_container() {
    let resolver = resolver_with(&[("LESS", "less", false), ("Lint", "css", false)]);

    let first = resolver.resolve_by_category("less");
    let second = resolver.resolve_by_category("less");
    assert!(Arc::ptr_eq(&first, &second));

    let by_name = resolver.resolve_by_name("lint");
    assert!(Arc::ptr_eq(&by_name, &resolver.resolve_by_name("lint")));
    assert_eq!(by_name.name(), "Lint");
}

#[test]
fn differently_cased_keys_are_distinct_entries_with_equal_members() {
    let resolver = resolver_with(&[("LESS", "less", false)]);

    let lower = resolver.resolve_by_category("less");
    let upper = resolver.resolve_by_category("LESS");
    assert!(!Arc::ptr_eq(&lower, &upper));
    assert_eq!(lower.name(), upper.name());
    assert_eq!(upper.len(), 1);
}

#[test]
fn category_and_name_keys_do_not_collide() {
    let resolver = resolver_with(&[("less", "css", false), ("Compiler", "less", false)]);

    assert_eq!(resolver.resolve_by_category("less").name(), "Compiler");
    assert_eq!(resolver.resolve_by_name("less").name(), "less");
}

#[test]
fn pipe_separated_lookups_union_members() {
    let resolver = resolver_with(&[
        ("LESS", "less", false),
        ("Lint", "css", false),
        ("Coffee", "coffee", false),
    ]);

    let container = resolver.resolve_by_category("LESS|css");
    assert_eq!(container.name(), "LESS|Lint");
    assert_eq!(container.category(), "css|less");

    assert_eq!(resolver.resolve_by_name("coffee|unknown").name(), "Coffee");
    assert!(resolver.resolve_by_name("unknown").is_empty());
}

#[test]
fn dotted_categories_take_precedence_over_plain_ones() {
    let resolver = resolver_with(&[
        ("LESS", "less", false),
        ("CSS Minify", ".min.css", true),
        ("Lint", "css", false),
    ]);

    assert_eq!(names(&resolver, "a.min.css").as_deref(), Some("CSS Minify"));
    assert_eq!(names(&resolver, "a.css").as_deref(), Some("Lint"));
    assert_eq!(names(&resolver, "a.less").as_deref(), Some("LESS"));
    assert_eq!(names(&resolver, "a.txt"), None);
}

#[test]
fn internal_less_and_external_minifier_resolve_by_extension() {
    let mut builder = EngineRegistry::builder();
    builder
        .register(EngineMetadata::new("LESS", "less").with_internal(true), Silent)
        .register(
            EngineMetadata::new("Minify", "css")
                .with_internal(false)
                .with_minifier(true),
            Silent,
        );
    let resolver = EngineResolver::new(builder.build(), Arc::new(WebExtensions));

    let less = resolver.resolve_by_filename("site.less").unwrap();
    assert_eq!(less.name(), "LESS");
    assert!(less.has_internal_engine());
    assert!(!less.has_external_engine());
    assert!(!less.is_minifier());

    let css = resolver.resolve_by_filename("site.css").unwrap();
    assert_eq!(css.name(), "Minify");
    assert!(css.is_minifier());
    assert!(css.has_external_engine());
    assert!(!css.has_internal_engine());

    assert!(resolver.resolve_by_filename("site.unknown").is_none());
}

#[test]
fn filename_lookup_is_suffix_based_and_case_sensitive() {
    let resolver = resolver_with(&[("Lint", "css", false)]);

    assert_eq!(names(&resolver, "styles/site.css").as_deref(), Some("Lint"));
    assert_eq!(names(&resolver, "SITE.CSS"), None);
    assert_eq!(names(&resolver, "site.css.map"), None);
}

#[test]
fn categories_without_an_extension_never_match() {
    let resolver = resolver_with(&[("Mystery", "unknown", false), ("Lint", "css", false)]);

    assert_eq!(names(&resolver, "a.css").as_deref(), Some("Lint"));
    assert_eq!(names(&resolver, "a.unknown"), None);
    assert_eq!(names(&resolver, ""), None);
}

#[test]
fn every_plain_match_joins_the_container() {
    let resolver = resolver_with(&[
        ("Lint", "css", false),
        ("Prefixer", "css", false),
        ("Lint", "css", false),
    ]);

    let container = resolver.resolve_by_filename("site.css").unwrap();
    assert_eq!(container.name(), "Lint|Prefixer");
    assert_eq!(container.len(), 3);
}

#[test]
fn concurrent_lookups_share_one_container() {
    let resolver = resolver_with(&[("LESS", "less", false), ("Lint", "css", false)]);

    let containers: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| resolver.resolve_by_category("css")))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let first = &containers[0];
    assert!(containers.iter().all(|c| Arc::ptr_eq(c, first)));
    assert!(Arc::ptr_eq(first, &resolver.resolve_by_category("css")));
}

#[test]
fn resolver_serves_the_engine_source_surface() {
    let resolver: Arc<dyn EngineSource> =
        Arc::new(resolver_with(&[("Lint", "css", false), ("LESS", "less", false)]));

    assert_eq!(resolver.engine("css").name(), "Lint");
    assert_eq!(resolver.engine_by_name("LESS").category(), "less");
    assert!(resolver.engine_by_filename("a.less").is_some());
    assert!(resolver.engine_by_filename("a.js").is_none());
}

#[test]
fn builtins_resolve_with_configured_extensions() {
    let mut builder = EngineRegistry::builder();
    register_builtins(&mut builder).unwrap();
    let resolver = EngineResolver::new(builder.build(), Arc::new(ConfiguredExtensions::default()));

    let css = resolver.resolve_by_filename("site.css").unwrap();
    assert_eq!(css.name(), format!("{}|{}", CSS_LINT, CSS_MINIFY));
    assert!(css.is_minifier());
    assert!(css.has_internal_engine());
    assert!(!css.has_external_engine());

    let less = resolver.resolve_by_filename("theme.less").unwrap();
    assert_eq!(less.name(), LESS_IMPORTS);
    assert_eq!(
        less.dependencies("@import \"base\";\n@import 'mixins.less';", "theme.less"),
        vec!["base.less", "mixins.less"]
    );
}
