use std::fmt;

use mediatype::MediaType;

/// Classification of the `Content-Type` header of a POST request.
///
/// Only the media type essence is looked at: everything after the first `;` is ignored, so a
/// parameter such as `charset=application/json` never changes the classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// `multipart/form-data`, following the GraphQL multipart request convention.
    Multipart,
    /// `application/graphql`: the body is the query text.
    GraphqlText,
    /// `application/json` or any `+json` structured syntax, e.g. `application/graphql+json`.
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
    /// No `Content-Type` header at all.
    Missing,
    /// Anything else, kept verbatim for error messages.
    Other(String),
}

impl ContentType {
    pub fn extract_from(headers: &http::HeaderMap) -> Self {
        let Some(header) = headers.get(http::header::CONTENT_TYPE) else {
            return ContentType::Missing;
        };

        match header.to_str() {
            Ok(value) => Self::parse(value),
            Err(_) => ContentType::Other(String::from_utf8_lossy(header.as_bytes()).into_owned()),
        }
    }

    pub fn parse(header: &str) -> Self {
        let (essence, _) = header.split_once(';').unwrap_or((header, ""));
        let essence = essence.trim();

        if essence.is_empty() {
            return ContentType::Missing;
        }

        let Ok(media_type) = MediaType::parse(essence) else {
            return ContentType::Other(header.to_owned());
        };

        let ty = media_type.ty.as_str();
        let subty = media_type.subty.as_str();
        let suffix = media_type.suffix.as_ref().map(|suffix| suffix.as_str());

        if ty.eq_ignore_ascii_case("multipart") && subty.eq_ignore_ascii_case("form-data") {
            ContentType::Multipart
        } else if subty.eq_ignore_ascii_case("json") || suffix.is_some_and(|suffix| suffix.eq_ignore_ascii_case("json")) {
            ContentType::Json
        } else if ty.eq_ignore_ascii_case("application") && subty.eq_ignore_ascii_case("graphql") && suffix.is_none() {
            ContentType::GraphqlText
        } else if ty.eq_ignore_ascii_case("application") && subty.eq_ignore_ascii_case("x-www-form-urlencoded") {
            ContentType::FormUrlEncoded
        } else {
            ContentType::Other(header.to_owned())
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Multipart => f.write_str("multipart/form-data"),
            ContentType::GraphqlText => f.write_str("application/graphql"),
            ContentType::Json => f.write_str("application/json"),
            ContentType::FormUrlEncoded => f.write_str("application/x-www-form-urlencoded"),
            ContentType::Missing => f.write_str("none"),
            ContentType::Other(header) => f.write_str(header),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("application/json", ContentType::Json)]
    #[case("application/json;charset=utf-8", ContentType::Json)]
    #[case("Application/JSON; charset=UTF-8", ContentType::Json)]
    #[case("application/graphql+json", ContentType::Json)]
    #[case("application/graphql-response+json", ContentType::Json)]
    #[case("application/graphql", ContentType::GraphqlText)]
    #[case("application/graphql; charset=utf-8", ContentType::GraphqlText)]
    #[case("application/x-www-form-urlencoded", ContentType::FormUrlEncoded)]
    #[case("multipart/form-data; boundary=----WebKitFormBoundary", ContentType::Multipart)]
    #[case("", ContentType::Missing)]
    #[case("  ", ContentType::Missing)]
    #[case("foobar", ContentType::Other("foobar".into()))]
    #[case("application/grapql", ContentType::Other("application/grapql".into()))]
    #[case("application/jsonfoo", ContentType::Other("application/jsonfoo".into()))]
    #[case(
        "application/foo;charset=application/json",
        ContentType::Other("application/foo;charset=application/json".into())
    )]
    fn classification(#[case] header: &str, #[case] expected: ContentType) {
        assert_eq!(ContentType::parse(header), expected);
    }

    #[test]
    fn missing_header() {
        assert_eq!(ContentType::extract_from(&http::HeaderMap::new()), ContentType::Missing);
    }

    #[test]
    fn header_lookup() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("multipart/form-data; boundary=x"),
        );

        assert_eq!(ContentType::extract_from(&headers), ContentType::Multipart);
    }
}
