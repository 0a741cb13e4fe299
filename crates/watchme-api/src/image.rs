//! Image URL resolution.
//!
//! TMDB returns image fields (`poster_path`, `backdrop_path`, `profile_path`)
//! as path tokens such as `/abc123.jpg`. A token is only usable once it is
//! prefixed with the image host base URL; an absent or empty token means the
//! record has no image and a placeholder should be shown.

/// Default image base URL (500px wide renditions).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A resolved image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// No image available; render a placeholder.
    Placeholder,
    /// Fully qualified image URL.
    Url(String),
}

impl ImageRef {
    /// Returns the URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Placeholder => None,
            Self::Url(url) => Some(url),
        }
    }
}

/// Resolves TMDB image path tokens against a fixed base URL.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageResolver {
    /// Creates a resolver for the given base URL (trailing slashes are dropped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a path token.
    #[must_use]
    pub fn resolve(&self, path: Option<&str>) -> ImageRef {
        match path.map(str::trim) {
            None | Some("") => ImageRef::Placeholder,
            Some(token) if token.starts_with('/') => ImageRef::Url(format!("{}{token}", self.base_url)),
            Some(token) => ImageRef::Url(format!("{}/{token}", self.base_url)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_placeholder() {
        // Arrange
        let resolver = ImageResolver::default();

        // Act & Assert
        assert_eq!(resolver.resolve(Some("")), ImageRef::Placeholder);
        assert_eq!(resolver.resolve(Some("  ")), ImageRef::Placeholder);
        assert_eq!(resolver.resolve(None), ImageRef::Placeholder);
    }

    #[test]
    fn test_path_is_prefixed_with_base_url() {
        // Arrange
        let resolver = ImageResolver::default();

        // Act
        let image = resolver.resolve(Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"));

        // Assert
        assert_eq!(
            image.url(),
            Some("https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        // Arrange
        let resolver = ImageResolver::new("http://localhost:8080/img/");

        // Act
        let image = resolver.resolve(Some("/poster.jpg"));

        // Assert
        assert_eq!(resolver.base_url(), "http://localhost:8080/img");
        assert_eq!(image, ImageRef::Url(String::from("http://localhost:8080/img/poster.jpg")));
    }
}
