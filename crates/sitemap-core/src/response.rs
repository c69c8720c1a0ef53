//! HTTP response wrapper for a rendered sitemap.
//!
//! [`SitemapResponse`] is framework neutral. With the `axum` feature enabled
//! it also implements `axum::response::IntoResponse`, so a handler can return
//! it directly.

/// Content type sent with rendered sitemaps.
pub const CONTENT_TYPE: &str = "text/xml";

/// A successful response carrying sitemap XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapResponse {
    /// HTTP status code, always `200`.
    pub status: u16,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Rendered XML.
    pub body: String,
}

impl SitemapResponse {
    /// Wrap rendered XML in a `200 OK` response.
    #[must_use]
    pub const fn ok(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE,
            body,
        }
    }

    /// Header pairs to send with the body.
    #[must_use]
    pub const fn headers(&self) -> [(&'static str, &'static str); 1] {
        [("Content-Type", self.content_type)]
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for SitemapResponse {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status)
            .unwrap_or(axum::http::StatusCode::OK);
        (
            status,
            [(axum::http::header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}
