use std::collections::HashMap;

use super::{RouteFactory, RouteKind, Router};
use crate::dispatcher::{handler, Dispatchable};
use crate::message::Response;

fn noop() -> Dispatchable {
    Dispatchable::Handler(handler(|_req, res| Ok(res)))
}

#[test]
fn test_classification_precedence() {
    assert_eq!(RouteFactory::classify("/cats/"), RouteKind::Static);
    assert_eq!(RouteFactory::classify("/cats/*"), RouteKind::Prefix);
    assert_eq!(RouteFactory::classify("/cats/{id}"), RouteKind::Template);
    assert_eq!(
        RouteFactory::classify("~/cats/([0-9]+)~"),
        RouteKind::Pattern
    );
    // Delimiters win over a template-looking interior.
    assert_eq!(RouteFactory::classify("~/cats/{id}~"), RouteKind::Pattern);
    // A bare slash pair is a path, not a delimiter pair.
    assert_eq!(RouteFactory::classify("/"), RouteKind::Static);
    assert_eq!(RouteFactory::classify("//"), RouteKind::Static);
}

#[test]
fn test_static_match_exact_only() {
    let mut router = Router::new();
    router.add("/cats/", noop()).unwrap();
    let matched = router.match_path("/cats/").unwrap();
    assert_eq!(matched.route.target(), "/cats/");
    assert!(matched.vars.is_empty());
    assert!(router.match_path("/cats").is_none());
    assert!(router.match_path("/cats/42").is_none());
}

#[test]
fn test_longest_prefix_wins() {
    let mut router = Router::new();
    router.add("/a/*", noop()).unwrap();
    router.add("/a/b/*", noop()).unwrap();
    let matched = router.match_path("/a/b/c").unwrap();
    assert_eq!(matched.route.target(), "/a/b/*");
    let matched = router.match_path("/a/x").unwrap();
    assert_eq!(matched.route.target(), "/a/*");
    assert!(router.match_path("/b/c").is_none());
}

#[test]
fn test_template_default_pattern() {
    let mut router = Router::new();
    router.add("/cats/{id}", noop()).unwrap();
    let matched = router.match_path("/cats/42").unwrap();
    assert_eq!(matched.var("id"), Some("42"));
    // An empty segment is not a slug.
    assert!(router.match_path("/cats/").is_none());
    // Slashes never match a variable.
    assert!(router.match_path("/cats/42/toys").is_none());
}

#[test]
fn test_template_multiple_vars() {
    let mut router = Router::new();
    router.add("/users/{user_id}/posts/{post_id}", noop()).unwrap();
    let matched = router.match_path("/users/7/posts/42").unwrap();
    assert_eq!(matched.var("user_id"), Some("7"));
    assert_eq!(matched.var("post_id"), Some("42"));
}

#[test]
fn test_template_custom_var_pattern() {
    let mut router = Router::new();
    let patterns = HashMap::from([("id".to_string(), "[0-9]+".to_string())]);
    router
        .add_with_patterns("/cats/{id}", noop(), &patterns)
        .unwrap();
    assert!(router.match_path("/cats/42").is_some());
    assert!(router.match_path("/cats/felix").is_none());
}

#[test]
fn test_template_rejects_multi_var_segment() {
    let mut router = Router::new();
    assert!(router.add("/cats/{a}{b}", noop()).is_err());
    assert!(router.add("/cats/{a b}", noop()).is_err());
}

#[test]
fn test_template_escapes_literal_segments() {
    let mut router = Router::new();
    router.add("/v1.0/{id}", noop()).unwrap();
    assert!(router.match_path("/v1.0/42").is_some());
    // The dot is literal, not a regex wildcard.
    assert!(router.match_path("/v1x0/42").is_none());
}

#[test]
fn test_pattern_named_groups() {
    let mut router = Router::new();
    router.add("~/cats/(?P<id>[0-9]+)~", noop()).unwrap();
    let matched = router.match_path("/cats/42").unwrap();
    assert_eq!(matched.route.kind(), RouteKind::Pattern);
    assert_eq!(matched.var("id"), Some("42"));
    assert!(router.match_path("/cats/felix").is_none());
}

#[test]
fn test_pattern_is_anchored() {
    let mut router = Router::new();
    router.add("~/cats/([0-9]+)~", noop()).unwrap();
    assert!(router.match_path("/cats/42").is_some());
    assert!(router.match_path("/pre/cats/42").is_none());
    assert!(router.match_path("/cats/42/post").is_none());
}

#[test]
fn test_pattern_registration_order_preserved() {
    let mut router = Router::new();
    router.add("~/cats/(?P<a>.+)~", noop()).unwrap();
    router.add("/cats/{b}", noop()).unwrap();
    // Both match; the earlier registration wins.
    let matched = router.match_path("/cats/42").unwrap();
    assert_eq!(matched.var("a"), Some("42"));
    assert!(matched.var("b").is_none());
}

#[test]
fn test_exact_beats_prefix_and_pattern() {
    let mut router = Router::new();
    router.add("~/cats/.*~", noop()).unwrap();
    router.add("/cats/*", noop()).unwrap();
    router.add("/cats/42", noop()).unwrap();
    let matched = router.match_path("/cats/42").unwrap();
    assert_eq!(matched.route.kind(), RouteKind::Static);
}

#[test]
fn test_prefix_beats_pattern() {
    let mut router = Router::new();
    router.add("~/cats/.*~", noop()).unwrap();
    router.add("/cats/*", noop()).unwrap();
    let matched = router.match_path("/cats/felix").unwrap();
    assert_eq!(matched.route.kind(), RouteKind::Prefix);
}

#[test]
fn test_invalid_pattern_fails_registration() {
    let mut router = Router::new();
    assert!(router.add("~/cats/([0-9]+~", noop()).is_err());
    assert!(router.is_empty());
}

#[test]
fn test_reregistration_is_idempotent() {
    let mut router = Router::new();
    let first = router.add("/cats/", noop()).unwrap();
    let second = router.add("/cats/", noop()).unwrap();
    assert_eq!(first, second);
    assert_eq!(router.len(), 1);
}

#[test]
fn test_method_map_accumulates_across_registrations() {
    let mut router = Router::new();
    router
        .add_method("/cats/", "GET", handler(|_req, res| Ok(res)))
        .unwrap();
    router
        .add_method("/cats/", "PUT", handler(|_req, res| Ok(res)))
        .unwrap();
    assert_eq!(router.len(), 1);
    let route = router.route_for_target("/cats/").unwrap();
    match route.dispatchable() {
        Dispatchable::MethodMap(map) => assert_eq!(map.allow(), "GET, PUT"),
        other => panic!("expected a method map, got {other:?}"),
    }
}

#[test]
fn test_duplicate_verb_across_registrations_fails() {
    let mut router = Router::new();
    router
        .add_method("/cats/", "GET", handler(|_req, res| Ok(res)))
        .unwrap();
    let err = router
        .add_method("/cats/", "get", handler(|_req, res| Ok(res)))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_match_is_stable_across_calls() {
    let mut router = Router::new();
    let id = router.add("/cats/{id}", noop()).unwrap();
    for _ in 0..3 {
        let matched = router.match_path("/cats/42").unwrap();
        assert_eq!(matched.route_id, id);
        assert_eq!(matched.var("id"), Some("42"));
    }
}

#[test]
fn test_dispatchable_replacement_keeps_route() {
    let mut router = Router::new();
    let id = router.add("/cats/", noop()).unwrap();
    let replacement = Dispatchable::Response(Response::text(200, "cached"));
    let same = router.add("/cats/", replacement).unwrap();
    assert_eq!(id, same);
    let route = router.route_for_target("/cats/").unwrap();
    assert!(matches!(route.dispatchable(), Dispatchable::Response(_)));
}
