use sstt::http::session::{CookieError, MAX_VISITS, VisitCounter, advance};

#[test]
fn test_advance_increments_below_limit() {
    for n in 1..MAX_VISITS {
        assert_eq!(advance(&format!("cookie_counter={}", n)), Ok(n + 1));
    }
}

#[test]
fn test_advance_holds_at_limit() {
    assert_eq!(advance("cookie_counter=10"), Ok(MAX_VISITS));
}

#[test]
fn test_advance_resets_out_of_range() {
    for value in ["0", "11", "00", "999", "99999999999999999999"] {
        assert_eq!(advance(&format!("cookie_counter={}", value)), Ok(1), "{}", value);
    }
}

#[test]
fn test_advance_ignores_trailing_text() {
    assert_eq!(advance("cookie_counter=3; theme=dark"), Ok(4));
    assert_eq!(advance("cookie_counter=05"), Ok(6));
}

#[test]
fn test_advance_rejects_non_matching() {
    for value in [
        "",
        "cookie_counter",
        "cookie_counter=",
        "cookie_counter=abc",
        "cookie_counter=-1",
        "theme=dark; cookie_counter=3",
        " cookie_counter=3",
        "Cookie_counter=3",
    ] {
        assert_eq!(advance(value), Err(CookieError::Malformed), "{:?}", value);
    }
}

#[test]
fn test_visit_counter_without_cookie_is_fresh() {
    let visits = VisitCounter::from_cookie_header(None).unwrap();
    assert_eq!(visits, VisitCounter::fresh());
    assert_eq!(visits.get(), 1);
    assert!(!visits.is_exhausted());
}

#[test]
fn test_visit_counter_from_cookie() {
    let visits = VisitCounter::from_cookie_header(Some("cookie_counter=9")).unwrap();
    assert_eq!(visits.get(), 10);
    assert!(visits.is_exhausted());

    assert!(VisitCounter::from_cookie_header(Some("nope")).is_err());
}

#[test]
fn test_set_cookie_value() {
    let visits = VisitCounter::from_cookie_header(Some("cookie_counter=2")).unwrap();
    assert_eq!(visits.set_cookie_value(), "cookie_counter=3; Max-Age=120;");
}
