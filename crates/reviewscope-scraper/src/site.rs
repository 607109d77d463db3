//! Source-site classification by URL hostname.

use std::fmt;

/// The e-commerce origins the engine knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Amazon,
    Flipkart,
    Snapdeal,
}

impl Site {
    /// All supported sites, in classification order. The first site whose
    /// [`host_marker`](Site::host_marker) the hostname contains wins.
    pub const ALL: [Site; 3] = [Site::Amazon, Site::Flipkart, Site::Snapdeal];

    /// Substring a hostname must contain to belong to this site.
    #[must_use]
    pub fn host_marker(self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
            Site::Snapdeal => "snapdeal",
        }
    }

    /// Query-string suffix appended to a base URL before the page number.
    #[must_use]
    pub fn page_suffix(self) -> &'static str {
        match self {
            Site::Amazon => "?th=1&pageNumber=",
            Site::Flipkart => "&page=",
            Site::Snapdeal => "?page=",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
            Site::Snapdeal => "snapdeal",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a URL by its hostname.
///
/// Returns `None` when the URL cannot be parsed, has no hostname, or the
/// hostname contains none of the known markers. Matching is case-sensitive
/// substring containment of each [`Site::host_marker`], tested in
/// [`Site::ALL`] order.
#[must_use]
pub fn classify(url: &str) -> Option<Site> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    classify_host(host)
}

fn classify_host(host: &str) -> Option<Site> {
    Site::ALL
        .into_iter()
        .find(|site| host.contains(site.host_marker()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_supported_hosts() {
        assert_eq!(
            classify("https://www.amazon.in/product-reviews/B0CHX1W1XY"),
            Some(Site::Amazon)
        );
        assert_eq!(
            classify("https://www.flipkart.com/apple-iphone-15/product-reviews/itm6ac?pid=MOBGTAGPTB3VS24W"),
            Some(Site::Flipkart)
        );
        assert_eq!(
            classify("https://www.snapdeal.com/product/boat-rockerz/638123/reviews"),
            Some(Site::Snapdeal)
        );
    }

    #[test]
    fn classifies_regional_amazon_domains() {
        assert_eq!(classify("https://amazon.co.uk/dp/X"), Some(Site::Amazon));
        assert_eq!(classify("http://smile.amazon.com/"), Some(Site::Amazon));
    }

    #[test]
    fn unknown_host_is_unsupported() {
        assert_eq!(classify("https://www.ebay.com/itm/1234"), None);
        assert_eq!(classify("https://example.org/amazon/reviews"), None);
    }

    #[test]
    fn unparseable_or_hostless_url_is_unsupported() {
        assert_eq!(classify("not a url"), None);
        assert_eq!(classify("amazon.in/product-reviews/X"), None);
        assert_eq!(classify("data:text/plain,amazon"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn first_marker_wins_when_host_contains_several() {
        assert_eq!(
            classify("https://snapdeal-flipkart-amazon.example.com/"),
            Some(Site::Amazon)
        );
        assert_eq!(
            classify("https://snapdeal.flipkart.example.com/"),
            Some(Site::Flipkart)
        );
    }

    #[test]
    fn each_marker_classifies_to_its_own_site() {
        for site in Site::ALL {
            let host = format!("www.{}.example", site.host_marker());
            assert_eq!(classify_host(&host), Some(site));
        }
    }

    #[test]
    fn host_matching_is_case_sensitive_on_the_raw_host() {
        // URL parsing lowercases hostnames, so mixed case still matches.
        assert_eq!(classify("https://WWW.AMAZON.IN/x"), Some(Site::Amazon));
        assert_eq!(classify_host("WWW.AMAZON.IN"), None);
    }

    #[test]
    fn page_suffixes_match_each_site() {
        assert_eq!(Site::Amazon.page_suffix(), "?th=1&pageNumber=");
        assert_eq!(Site::Flipkart.page_suffix(), "&page=");
        assert_eq!(Site::Snapdeal.page_suffix(), "?page=");
    }
}
