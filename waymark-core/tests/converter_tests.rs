//! Integration tests for the converter registry and custom converters

use waymark_core::{
    Converter, ConverterRegistry, ExactConverter, Params, Router, RouterError, SegmentSpec,
    StrConverter, register_converter, registry, route, unregister_converter,
};

/// Accepts language codes from a fixed list.
struct LangConverter {
    spec: SegmentSpec,
}

impl Converter for LangConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        let identifier = self.identifier()?;
        ["en", "fr", "de"]
            .contains(&segment)
            .then(|| Params::single(identifier, segment))
    }
}

fn lang_registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register("lang", |spec| Ok(Box::new(LangConverter { spec })));
    registry
}

#[test]
fn test_get_register_discard_converters() {
    let mut registry = ConverterRegistry::with_defaults();
    let defaults = registry.tags().into_iter().map(String::from).collect::<Vec<_>>();
    assert_eq!(defaults, vec!["int", "path", "re", "slug", "str", "uuid"]);

    registry.register("test", |spec| Ok(Box::new(StrConverter::new(spec)?)));
    assert!(registry.contains("test"));
    assert!(registry.lookup("test").is_some());

    assert!(registry.unregister("test").is_some());
    assert_eq!(registry.tags(), defaults);
    assert!(registry.unregister("not-a-converter").is_none());
    assert_eq!(registry.tags(), defaults);
}

#[test]
fn test_custom_converter_route() {
    let registry = lang_registry();
    let router = Router::new(vec![
        route("").build_with(&registry).unwrap(),
        route("<lang:lang>/about")
            .handler("about")
            .name("about")
            .build_with(&registry)
            .unwrap(),
    ])
    .unwrap();

    let matched = router.match_path("/fr/about/");
    assert_eq!(matched.as_full().unwrap().params(), &Params::single("lang", "fr"));
    assert!(!router.match_path("/es/about/").is_match());

    assert_eq!(router.find("about", [("lang", "de")]).as_deref(), Some("/de/about/"));
    assert_eq!(router.find("about", [("lang", "es")]), None);
}

#[test]
fn test_custom_converter_unknown_elsewhere() {
    let err = route::<()>("<lang:lang>")
        .build_with(&ConverterRegistry::with_defaults())
        .unwrap_err();
    assert_eq!(err, RouterError::UnknownConverter("lang".to_string()));
}

#[test]
fn test_overwrite_builtin() {
    let mut registry = ConverterRegistry::with_defaults();
    let previous = registry.register("int", |spec| {
        Ok(Box::new(ExactConverter::new(spec.description())))
    });
    assert!(previous.is_some());

    let converter = registry.converter_for("<int:id>").unwrap();
    assert!(converter.accepts("5").is_none());
    assert_eq!(converter.accepts("<int:id>"), Some(Params::new()));
}

#[test]
fn test_global_registration() {
    register_converter("even", |spec| Ok(Box::new(EvenConverter { spec })));
    assert!(registry::global().read().contains("even"));

    let node = route::<()>("<even:n>").handler(()).build().unwrap();
    assert_eq!(node.converter().accepts("4"), Some(Params::single("n", 4)));
    assert_eq!(node.converter().accepts("3"), None);

    assert!(unregister_converter("even").is_some());
    let err = route::<()>("<even:n>").build().unwrap_err();
    assert_eq!(err, RouterError::UnknownConverter("even".to_string()));
}

struct EvenConverter {
    spec: SegmentSpec,
}

impl Converter for EvenConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        let value: i64 = segment.parse().ok()?;
        (value % 2 == 0).then(|| Params::single(self.identifier().unwrap_or("n"), value))
    }
}

#[test]
fn test_builtin_converters_through_routes() {
    let router = Router::new(vec![
        route("").build().unwrap(),
        route("int/<int:value>").handler("int").build().unwrap(),
        route("str/<str:value>").handler("str").build().unwrap(),
        route("slug/<slug:value>").handler("slug").build().unwrap(),
        route("uuid/<uuid:value>").handler("uuid").build().unwrap(),
        route(r"re/<re:page-(?P<value>\d+)?$>").handler("re").build().unwrap(),
    ])
    .unwrap();

    let accepted = [
        "/int/100/",
        "/str/hello/",
        "/slug/hello-world_2/",
        "/uuid/b473e2ca-50a5-11ec-83dc-479fd603abba/",
        "/re/page-5/",
        "/re/page-/",
    ];
    for path in accepted {
        assert!(router.match_path(path).is_match(), "{}", path);
    }

    let rejected = [
        "/int/1.0/",
        "/int/hello/",
        "/str/hello-world/",
        "/str/hello_world/",
        "/slug/hello world/",
        "/uuid/b473e2ca50a511ec83dc479fd603abba/",
        "/re/1.0/",
    ];
    for path in rejected {
        assert!(!router.match_path(path).is_match(), "{}", path);
    }
}

#[test]
fn test_invalid_converter_descriptions() {
    assert!(matches!(
        route::<()>("<int:>").build(),
        Err(RouterError::InvalidConverter { .. })
    ));
    assert!(matches!(
        route::<()>("<re:(unclosed>").build(),
        Err(RouterError::InvalidConverter { .. })
    ));
}

#[test]
fn test_degenerate_brackets_are_literal() {
    let router = Router::new(vec![
        route("").build().unwrap(),
        route("<lang>/x").handler(()).build().unwrap(),
    ])
    .unwrap();

    assert!(router.match_path("/<lang>/x/").is_match());
    assert!(!router.match_path("/en/x/").is_match());
}
