//! Integration tests for router construction

mod common;

use waymark_core::{RootPolicy, Router, RouterConfig, RouterError, route};

#[test]
fn test_initialize_router_with_empty_routes() {
    let err = Router::<()>::new(Vec::new()).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "Trying to initialize router with empty routes.");
}

#[test]
fn test_routes_without_empty_path_strict() {
    let config = RouterConfig::new().root_policy(RootPolicy::Strict);
    let err = Router::with_config(vec![route::<()>("home/").build().unwrap()], config)
        .unwrap_err();
    assert_eq!(err, RouterError::configuration("First route must be '' or '/'."));
}

#[test]
fn test_routes_without_empty_path_synthesize() {
    let router = Router::new(vec![
        route("home/").handler("home").name("home").build().unwrap(),
        route("about/").handler("about").name("about").build().unwrap(),
    ])
    .unwrap();

    assert!(router.tree().is_root());
    assert_eq!(router.tree().children().len(), 2);
    assert!(!router.match_path("/").is_match());
    assert_eq!(router.match_path("/about/").handler(), Some(&"about"));
    assert_eq!(router.find("home", [("unused", 1)]), None);
    assert_eq!(router.find("home", waymark_core::Params::new()).as_deref(), Some("/home/"));
}

#[test]
fn test_root_route_keeps_its_subroutes() {
    let router = Router::new(vec![
        route("")
            .handler("home")
            .subroute(route("inner").handler("inner").build().unwrap())
            .build()
            .unwrap(),
        route("outer").handler("outer").build().unwrap(),
    ])
    .unwrap();

    assert_eq!(router.match_path("/inner/").handler(), Some(&"inner"));
    assert_eq!(router.match_path("/outer/").handler(), Some(&"outer"));
    assert_eq!(router.match_path("/").handler(), Some(&"home"));
}

#[test]
fn test_already_registered_path() {
    let err = Router::<()>::new(vec![
        route("").build().unwrap(),
        route("home/").build().unwrap(),
        route("home/about").build().unwrap(),
    ])
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "A node matching 'home' already exists at this level of the tree."
    );
}

#[test]
fn test_collision_under_synthesized_root() {
    let err = Router::<()>::new(vec![
        route("home/").build().unwrap(),
        route("home/about").build().unwrap(),
    ])
    .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_collision_with_root_subroutes() {
    let err = Router::<()>::new(vec![
        route("").subroute(route("docs").build().unwrap()).build().unwrap(),
        route("docs/more").build().unwrap(),
    ])
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A node matching 'docs' already exists at this level of the tree."
    );
}

#[test]
fn test_placeholders_never_collide() {
    let router = Router::new(vec![
        route("").build().unwrap(),
        route("<int:id>").handler(1).build().unwrap(),
        route("<int:id>/x").handler(2).build().unwrap(),
        route("<str:id>").handler(3).build().unwrap(),
    ])
    .unwrap();

    assert_eq!(router.tree().children().len(), 3);
    assert_eq!(router.match_path("/5/").handler(), Some(&1));
}

#[test]
fn test_config_is_kept() {
    let config = RouterConfig::new().append_slash(false).cache_capacity(8);
    let router = common::router_with(config.clone());
    assert_eq!(router.config(), &config);
    assert!(!router.append_slash());
}

#[test]
fn test_config_from_env() {
    // SAFETY: this is the only test in this binary touching these variables.
    unsafe {
        std::env::set_var("WAYMARK_APPEND_SLASH", "false");
        std::env::set_var("WAYMARK_ROOT_POLICY", "strict");
        std::env::set_var("WAYMARK_CACHE_CAPACITY", "not-a-number");
    }

    let config = RouterConfig::from_env();
    assert!(!config.append_slash);
    assert_eq!(config.root_policy, RootPolicy::Strict);
    assert_eq!(config.cache_capacity, RouterConfig::default().cache_capacity);

    unsafe {
        std::env::remove_var("WAYMARK_APPEND_SLASH");
        std::env::remove_var("WAYMARK_ROOT_POLICY");
        std::env::remove_var("WAYMARK_CACHE_CAPACITY");
    }
    assert_eq!(RouterConfig::from_env(), RouterConfig::default());
}
