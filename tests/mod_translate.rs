use corebridge::errors::BridgeError;
use corebridge::query::{submission_id, translate_count, translate_search};

#[test]
fn routing_extraction_ignores_parameter_order() {
    for query in [
        "kappSlug=services&formSlug=onboarding&status=Open",
        "status=Open&kappSlug=services&formSlug=onboarding",
        "formSlug=onboarding&status=Open&kappSlug=services",
    ] {
        let translated = translate_search(query, None).unwrap();
        assert_eq!(translated.kapp_slug, "services");
        assert_eq!(translated.form_slug.as_deref(), Some("onboarding"));
        assert!(translated.query.starts_with("status=Open&"));
    }
}

#[test]
fn missing_kapp_slug_is_invalid() {
    assert!(matches!(
        translate_search("formSlug=onboarding&status=Open", None),
        Err(BridgeError::InvalidRequest(_))
    ));
    assert!(matches!(
        translate_count("formSlug=onboarding&status=Open"),
        Err(BridgeError::InvalidRequest(_))
    ));
}

#[test]
fn filters_are_form_urlencoded() {
    let translated =
        translate_search("values[Status]=Open Case&kappSlug=services", None).unwrap();
    assert_eq!(
        translated.query,
        "values%5BStatus%5D=Open+Case&include=values,details&limit=200"
    );
}

#[test]
fn caller_limit_is_kept_for_search() {
    let translated = translate_search("kappSlug=services&limit=50", None).unwrap();
    assert_eq!(translated.query, "include=values,details&limit=50");
}

#[test]
fn empty_limit_falls_back_to_default() {
    let translated = translate_search("kappSlug=services&limit=", None).unwrap();
    assert_eq!(translated.query, "include=values,details&limit=200");
}

#[test]
fn metadata_page_token_is_appended_verbatim() {
    let translated = translate_search("kappSlug=services&status=Open", Some("a+b")).unwrap();
    assert_eq!(
        translated.query,
        "status=Open&include=values,details&limit=200&pageToken=a+b"
    );
}

#[test]
fn count_query_drops_caller_limit_and_include() {
    let translated = translate_count("kappSlug=services&limit=5&status=Open").unwrap();
    assert_eq!(translated.query, "status=Open&limit=200");
}

#[test]
fn form_slug_is_optional() {
    let translated = translate_search("kappSlug=services", None).unwrap();
    assert_eq!(translated.form_slug, None);
}

#[test]
fn submission_id_detection() {
    assert_eq!(submission_id("id=42&other=x").as_deref(), Some("42"));
    assert_eq!(submission_id("Id=abc-def").as_deref(), Some("abc-def"));
    assert_eq!(submission_id("other=x&id=42"), None);
    assert_eq!(submission_id("kappSlug=services"), None);
}
