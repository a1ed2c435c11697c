use url::Url;

/// Split a parsed URL into the signature endpoint and its raw query pairs.
///
/// The endpoint drops both the query and the fragment. Query pairs stay in
/// their URL-encoded form and keep duplicates and their relative order, as
/// the normalization step downstream sorts the full set itself.
pub fn endpoint_and_query(url: &Url) -> (String, Vec<(&str, &str)>) {
    let pairs = match url.query() {
        Some(query) => query_to_pairs(query),
        None => Vec::new(),
    };
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    (endpoint.as_str().to_string(), pairs)
}

pub fn query_to_pairs(query: &str) -> Vec<(&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut kv = s.splitn(2, '=');
            (kv.next().unwrap_or_default(), kv.next().unwrap_or_default())
        })
        .collect()
}

#[test]
fn test_endpoint_and_query() {
    let u = Url::parse("http://example.com/res?b=2&a=1&a=0#section").unwrap();
    let (endpoint, pairs) = endpoint_and_query(&u);
    assert_eq!(endpoint, "http://example.com/res");
    assert_eq!(pairs, vec![("b", "2"), ("a", "1"), ("a", "0")]);

    let n = Url::parse("https://example.com/").unwrap();
    let (endpoint, pairs) = endpoint_and_query(&n);
    assert_eq!(endpoint, "https://example.com/");
    assert!(pairs.is_empty());
}

#[test]
fn test_endpoint_drops_fragment_without_query() {
    let u = Url::parse("http://example.com/res#frag").unwrap();
    let (endpoint, pairs) = endpoint_and_query(&u);
    assert_eq!(endpoint, "http://example.com/res");
    assert!(pairs.is_empty());
}

#[test]
fn test_query_to_pairs() {
    let pairs = query_to_pairs("parameter=value&keyonly&&empty=");
    assert_eq!(
        pairs,
        vec![("parameter", "value"), ("keyonly", ""), ("empty", "")]
    );
    assert!(query_to_pairs("").is_empty());

    // a second '=' belongs to the value
    let pairs = query_to_pairs("quever=salting=parsing");
    assert_eq!(pairs, vec![("quever", "salting=parsing")]);
}
